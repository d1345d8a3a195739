// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core playback rules with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`error`]: Domain error types ([`PlaybackError`](error::PlaybackError),
//!   [`Capability`](error::Capability))
//! - [`player`]: Playback value objects ([`Volume`](player::Volume),
//!   [`PlaybackSpeed`](player::PlaybackSpeed))

pub mod error;
pub mod player;
