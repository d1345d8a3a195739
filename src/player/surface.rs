// SPDX-License-Identifier: MPL-2.0
//! Boundary with the underlying media surface.
//!
//! The controller never reads state back from the surface. It issues
//! commands through [`MediaSurface`] and mirrors whatever the surface
//! reports through [`SurfaceEvent`].

use crate::error::PlaybackError;

/// Commands the controller issues to the playback primitive.
pub trait MediaSurface {
    /// Starts or resumes playback.
    ///
    /// The surface may refuse (autoplay policy, decode error); the refusal
    /// is reported here rather than through an event.
    fn play(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self);

    fn set_current_time(&mut self, secs: f64);

    /// Sets the output gain (0.0 to 1.0). Mute is expressed as gain 0.
    fn set_volume(&mut self, volume: f32);

    fn set_playback_rate(&mut self, rate: f64);

    /// Points the surface straight at `source` for native playback.
    fn load_native(&mut self, source: &str);

    /// Drops whatever source the surface currently holds.
    fn clear_source(&mut self);
}

/// A contiguous buffered span, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferedRange {
    pub start: f64,
    pub end: f64,
}

impl BufferedRange {
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// Lifecycle events reported by the media surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    MetadataLoaded { duration_secs: f64 },
    TimeUpdate { current_secs: f64 },
    /// Buffered ranges in ascending order.
    Progress { buffered: Vec<BufferedRange> },
    Waiting,
    CanPlay,
    Play,
    Pause,
    Ended,
    Error(String),
}

impl SurfaceEvent {
    /// End of the furthest buffered range, if anything is buffered.
    #[must_use]
    pub fn buffered_end(buffered: &[BufferedRange]) -> Option<f64> {
        buffered.last().map(|range| range.end)
    }
}
