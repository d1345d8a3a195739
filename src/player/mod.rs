// SPDX-License-Identifier: MPL-2.0
//! Playback controller for catalog titles.
//!
//! The controller mirrors a host-provided media surface, attaches adaptive
//! streams, and decides what the control chrome shows. Rendering and the
//! actual decoding live on the host side of the [`MediaSurface`],
//! [`StreamBackend`] and [`PresentationHost`] traits.

pub mod attachment;
pub mod controller;
pub mod driver;
mod hide_timer;
pub mod input;
pub mod presentation;
pub mod session;
pub mod settings_menu;
pub mod surface;
pub mod time_format;
pub mod view_model;
pub mod visibility;

pub use attachment::{
    AttachmentStatus, Epoch, NativeOnly, SourceKind, StreamAttachmentManager, StreamBackend,
    StreamEvent, StreamSession,
};
pub use controller::{Control, Effect, Message, PlayerController, PlayerProps};
pub use input::{FocusTarget, Key, KeyInput, PointerEvent, TrackGeometry};
pub use presentation::{NoPresentation, PresentationHost, PresentationMode};
pub use session::{MediaSession, PlaybackPreferences};
pub use surface::{BufferedRange, MediaSurface, SurfaceEvent};
pub use time_format::format_clock;
pub use view_model::ControlsView;
