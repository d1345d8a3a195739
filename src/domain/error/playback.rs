// SPDX-License-Identifier: MPL-2.0
//! Playback error taxonomy.

use std::fmt;

/// Host capabilities the controller may find missing at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Element fullscreen API.
    Fullscreen,
    /// Picture-in-picture window.
    PictureInPicture,
    /// Adaptive-bitrate stream attachment (HLS manifests).
    AdaptiveStreaming,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Fullscreen => write!(f, "fullscreen"),
            Capability::PictureInPicture => write!(f, "picture-in-picture"),
            Capability::AdaptiveStreaming => write!(f, "adaptive streaming"),
        }
    }
}

/// Errors raised while driving playback.
///
/// None of these are meant to reach the end user as a crash: the controller
/// degrades (native playback, no-op toggle) or stays in a stable
/// paused/loading state. They exist so the host can log and localise them.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackError {
    /// No stream identifier was supplied to the controller.
    MissingSource,

    /// The adaptive backend cannot run in this environment.
    AttachmentUnsupported,

    /// The adaptive backend failed to attach or decode the stream.
    AttachFailed(String),

    /// A presentation capability is not available on the host.
    CapabilityUnavailable(Capability),

    /// The media surface refused a command (e.g. autoplay policy).
    SurfaceRejected(String),
}

impl PlaybackError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            PlaybackError::MissingSource => "error-playback-missing-source",
            PlaybackError::AttachmentUnsupported => "error-playback-attachment-unsupported",
            PlaybackError::AttachFailed(_) => "error-playback-attach-failed",
            PlaybackError::CapabilityUnavailable(_) => "error-playback-capability-unavailable",
            PlaybackError::SurfaceRejected(_) => "error-playback-surface-rejected",
        }
    }

    /// Returns true if the error only means "fall back to something simpler".
    pub fn is_degradable(&self) -> bool {
        matches!(
            self,
            PlaybackError::AttachmentUnsupported | PlaybackError::CapabilityUnavailable(_)
        )
    }
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::MissingSource => write!(f, "No media source provided"),
            PlaybackError::AttachmentUnsupported => {
                write!(f, "Adaptive streaming is not supported here")
            }
            PlaybackError::AttachFailed(msg) => write!(f, "Stream attachment failed: {}", msg),
            PlaybackError::CapabilityUnavailable(cap) => {
                write!(f, "Capability unavailable: {}", cap)
            }
            PlaybackError::SurfaceRejected(msg) => write!(f, "Media surface rejected command: {}", msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degradable_errors_are_capability_related() {
        assert!(PlaybackError::AttachmentUnsupported.is_degradable());
        assert!(PlaybackError::CapabilityUnavailable(Capability::Fullscreen).is_degradable());
        assert!(!PlaybackError::AttachFailed("boom".into()).is_degradable());
        assert!(!PlaybackError::MissingSource.is_degradable());
    }

    #[test]
    fn i18n_keys_are_distinct() {
        let keys = [
            PlaybackError::MissingSource.i18n_key(),
            PlaybackError::AttachmentUnsupported.i18n_key(),
            PlaybackError::AttachFailed(String::new()).i18n_key(),
            PlaybackError::CapabilityUnavailable(Capability::PictureInPicture).i18n_key(),
            PlaybackError::SurfaceRejected(String::new()).i18n_key(),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn display_names_the_capability() {
        let err = PlaybackError::CapabilityUnavailable(Capability::PictureInPicture);
        assert_eq!(
            format!("{}", err),
            "Capability unavailable: picture-in-picture"
        );
    }
}
