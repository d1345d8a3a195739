// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and recording fakes for the player
//! boundaries.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

use crate::error::PlaybackError;
use crate::player::attachment::{Epoch, StreamBackend, StreamSession};
use crate::player::presentation::{PresentationHost, PresentationMode};
use crate::player::surface::MediaSurface;
use std::cell::RefCell;
use std::rc::Rc;

// Re-export approx macros for convenient use in tests
pub use approx::assert_abs_diff_eq;

// =============================================================================
// Media surface
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Play,
    Pause,
    SetCurrentTime(f64),
    SetVolume(f32),
    SetPlaybackRate(f64),
    LoadNative(String),
    ClearSource,
}

/// Records every command; refuses `play` when `reject_play` is set.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    pub reject_play: bool,
}

impl MediaSurface for RecordingSurface {
    fn play(&mut self) -> Result<(), PlaybackError> {
        self.calls.push(SurfaceCall::Play);
        if self.reject_play {
            return Err(PlaybackError::SurfaceRejected("autoplay blocked".into()));
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.calls.push(SurfaceCall::Pause);
    }

    fn set_current_time(&mut self, secs: f64) {
        self.calls.push(SurfaceCall::SetCurrentTime(secs));
    }

    fn set_volume(&mut self, volume: f32) {
        self.calls.push(SurfaceCall::SetVolume(volume));
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.calls.push(SurfaceCall::SetPlaybackRate(rate));
    }

    fn load_native(&mut self, source: &str) {
        self.calls.push(SurfaceCall::LoadNative(source.to_string()));
    }

    fn clear_source(&mut self) {
        self.calls.push(SurfaceCall::ClearSource);
    }
}

// =============================================================================
// Stream backend
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Attach(String, Epoch),
    Detach(String, Epoch),
}

type CallLog = Rc<RefCell<Vec<BackendCall>>>;

#[derive(Debug)]
pub struct FakeSession {
    source: String,
    epoch: Epoch,
    log: CallLog,
}

impl StreamSession for FakeSession {
    fn detach(&mut self) {
        self.log
            .borrow_mut()
            .push(BackendCall::Detach(self.source.clone(), self.epoch));
    }
}

/// Backend whose first `failures` attach attempts fail.
#[derive(Debug, Clone)]
pub struct FakeBackend {
    failures: u32,
    log: CallLog,
}

impl FakeBackend {
    pub fn supported() -> Self {
        Self::failing(0)
    }

    pub fn failing(failures: u32) -> Self {
        Self {
            failures,
            log: Rc::default(),
        }
    }

    /// Shared handle to the call log; stays valid after the backend moves.
    pub fn log(&self) -> CallLog {
        Rc::clone(&self.log)
    }
}

impl StreamBackend for FakeBackend {
    type Session = FakeSession;

    fn is_supported(&self) -> bool {
        true
    }

    fn attach(
        &mut self,
        source: &str,
        epoch: Epoch,
        _surface: &mut dyn MediaSurface,
    ) -> Result<Self::Session, PlaybackError> {
        self.log
            .borrow_mut()
            .push(BackendCall::Attach(source.to_string(), epoch));
        if self.failures > 0 {
            self.failures -= 1;
            return Err(PlaybackError::AttachFailed("manifest unreachable".into()));
        }
        Ok(FakeSession {
            source: source.to_string(),
            epoch,
            log: Rc::clone(&self.log),
        })
    }
}

// =============================================================================
// Presentation host
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCall {
    Request(PresentationMode),
    Exit(PresentationMode),
}

/// Records requests. Supports nothing unless built with [`Self::supporting_all`].
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub calls: Vec<HostCall>,
    pub supported: Vec<PresentationMode>,
    pub refuse: bool,
}

impl RecordingHost {
    pub fn supporting_all() -> Self {
        Self {
            supported: vec![PresentationMode::Fullscreen, PresentationMode::PictureInPicture],
            ..Self::default()
        }
    }

    fn outcome(&self, mode: PresentationMode) -> Result<(), PlaybackError> {
        if self.refuse {
            Err(PlaybackError::CapabilityUnavailable(mode.capability()))
        } else {
            Ok(())
        }
    }
}

impl PresentationHost for RecordingHost {
    fn supports(&self, mode: PresentationMode) -> bool {
        self.supported.contains(&mode)
    }

    fn request(&mut self, mode: PresentationMode) -> Result<(), PlaybackError> {
        self.calls.push(HostCall::Request(mode));
        self.outcome(mode)
    }

    fn exit(&mut self, mode: PresentationMode) -> Result<(), PlaybackError> {
        self.calls.push(HostCall::Exit(mode));
        self.outcome(mode)
    }
}
