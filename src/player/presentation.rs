// SPDX-License-Identifier: MPL-2.0
//! Fullscreen and picture-in-picture.
//!
//! Requests go to the host, but the mirrored flags only change when the
//! host reports a change. A request can be denied or resolve later, so its
//! return value says nothing about the resulting mode.

use crate::error::{Capability, PlaybackError};

/// The two exclusive presentation modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationMode {
    Fullscreen,
    PictureInPicture,
}

impl PresentationMode {
    #[must_use]
    pub fn capability(self) -> Capability {
        match self {
            Self::Fullscreen => Capability::Fullscreen,
            Self::PictureInPicture => Capability::PictureInPicture,
        }
    }
}

/// Window-system side of presentation changes.
pub trait PresentationHost {
    fn supports(&self, mode: PresentationMode) -> bool;

    /// Asks to enter `mode`. The outcome arrives later as a change notification.
    fn request(&mut self, mode: PresentationMode) -> Result<(), PlaybackError>;

    /// Asks to leave `mode`.
    fn exit(&mut self, mode: PresentationMode) -> Result<(), PlaybackError>;
}

/// Host without fullscreen or picture-in-picture.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPresentation;

impl PresentationHost for NoPresentation {
    fn supports(&self, _mode: PresentationMode) -> bool {
        false
    }

    fn request(&mut self, mode: PresentationMode) -> Result<(), PlaybackError> {
        Err(PlaybackError::CapabilityUnavailable(mode.capability()))
    }

    fn exit(&mut self, mode: PresentationMode) -> Result<(), PlaybackError> {
        Err(PlaybackError::CapabilityUnavailable(mode.capability()))
    }
}

/// Mirrored presentation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresentationState {
    fullscreen: bool,
    picture_in_picture: bool,
}

impl PresentationState {
    /// Requests the opposite of the mirrored state for `mode`.
    ///
    /// An unsupported mode or a refused request is logged and otherwise
    /// ignored.
    pub fn toggle(&mut self, mode: PresentationMode, host: &mut dyn PresentationHost) {
        if !host.supports(mode) {
            tracing::debug!(?mode, "presentation mode unavailable, ignoring toggle");
            return;
        }
        let result = if self.is_active(mode) {
            host.exit(mode)
        } else {
            host.request(mode)
        };
        if let Err(err) = result {
            tracing::debug!(?mode, error = %err, "presentation request refused");
        }
    }

    /// Mirrors a host notification. Returns whether the flag changed.
    pub fn on_changed(&mut self, mode: PresentationMode, active: bool) -> bool {
        let flag = match mode {
            PresentationMode::Fullscreen => &mut self.fullscreen,
            PresentationMode::PictureInPicture => &mut self.picture_in_picture,
        };
        let changed = *flag != active;
        *flag = active;
        changed
    }

    /// Leaves any active mode on unmount.
    pub fn exit_all(&mut self, host: &mut dyn PresentationHost) {
        for mode in [PresentationMode::Fullscreen, PresentationMode::PictureInPicture] {
            if self.is_active(mode) {
                if let Err(err) = host.exit(mode) {
                    tracing::debug!(?mode, error = %err, "could not leave presentation mode");
                }
            }
        }
    }

    #[must_use]
    pub fn is_active(&self, mode: PresentationMode) -> bool {
        match mode {
            PresentationMode::Fullscreen => self.fullscreen,
            PresentationMode::PictureInPicture => self.picture_in_picture,
        }
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    #[must_use]
    pub fn is_picture_in_picture(&self) -> bool {
        self.picture_in_picture
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{HostCall, RecordingHost};

    #[test]
    fn toggle_requests_but_does_not_assume_success() {
        let mut host = RecordingHost::supporting_all();
        let mut state = PresentationState::default();

        state.toggle(PresentationMode::Fullscreen, &mut host);
        assert_eq!(host.calls, vec![HostCall::Request(PresentationMode::Fullscreen)]);
        assert!(!state.is_fullscreen());
    }

    #[test]
    fn toggle_exits_when_mirrored_active() {
        let mut host = RecordingHost::supporting_all();
        let mut state = PresentationState::default();
        assert!(state.on_changed(PresentationMode::PictureInPicture, true));

        state.toggle(PresentationMode::PictureInPicture, &mut host);
        assert_eq!(host.calls, vec![HostCall::Exit(PresentationMode::PictureInPicture)]);
        assert!(state.is_picture_in_picture());
    }

    #[test]
    fn unsupported_mode_is_a_no_op() {
        let mut host = NoPresentation;
        let mut state = PresentationState::default();
        state.toggle(PresentationMode::Fullscreen, &mut host);
        state.toggle(PresentationMode::PictureInPicture, &mut host);
        assert_eq!(state, PresentationState::default());
    }

    #[test]
    fn refused_request_keeps_state() {
        let mut host = RecordingHost::supporting_all();
        host.refuse = true;
        let mut state = PresentationState::default();
        state.toggle(PresentationMode::Fullscreen, &mut host);
        assert!(!state.is_fullscreen());
    }

    #[test]
    fn change_notifications_report_transitions_only() {
        let mut state = PresentationState::default();
        assert!(state.on_changed(PresentationMode::Fullscreen, true));
        assert!(!state.on_changed(PresentationMode::Fullscreen, true));
        assert!(state.on_changed(PresentationMode::Fullscreen, false));
        assert!(!state.is_picture_in_picture());
    }

    #[test]
    fn exit_all_leaves_active_modes() {
        let mut host = RecordingHost::supporting_all();
        let mut state = PresentationState::default();
        state.on_changed(PresentationMode::Fullscreen, true);

        state.exit_all(&mut host);
        assert_eq!(host.calls, vec![HostCall::Exit(PresentationMode::Fullscreen)]);
    }
}
