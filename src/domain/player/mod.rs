// SPDX-License-Identifier: MPL-2.0
//! Playback domain types.
//!
//! Value objects shared by the media session, the input dispatcher and the
//! configuration layer, independent of any host or presentation concerns.

pub mod newtypes;

pub use newtypes::{speed_bounds, volume_bounds, PlaybackSpeed, Volume};
