// SPDX-License-Identifier: MPL-2.0
//! Adaptive-stream attachment lifecycle.
//!
//! Each source identifier, and each retry of it, opens an *epoch*. The
//! session attached for an epoch lives in an [`AttachmentGuard`] whose `Drop`
//! detaches it, so every way out of the epoch (source change, teardown, fatal
//! stream error, the manager itself being dropped) releases the decoder.
//! Events tagged with an older epoch are discarded before they can reach a
//! released session or its replacement.

use super::surface::MediaSurface;
use crate::config::{PlayerSettings, StreamMode};
use crate::error::PlaybackError;
use std::convert::Infallible;
use std::time::{Duration, Instant};

/// Identifies one attachment lifetime. Strictly increasing per manager.
pub type Epoch = u64;

/// A live decoder session bound to the media surface.
pub trait StreamSession {
    /// Releases the session. Called exactly once.
    fn detach(&mut self);
}

/// Creates adaptive-stream sessions.
pub trait StreamBackend {
    type Session: StreamSession;

    /// Whether adaptive attachment works in this environment at all.
    fn is_supported(&self) -> bool;

    /// Loads `source` and binds the decoder to `surface`.
    ///
    /// Events the session later reports must carry `epoch`.
    fn attach(
        &mut self,
        source: &str,
        epoch: Epoch,
        surface: &mut dyn MediaSurface,
    ) -> Result<Self::Session, PlaybackError>;
}

/// Backend for environments without adaptive streaming support.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeOnly;

impl StreamSession for Infallible {
    fn detach(&mut self) {
        match *self {}
    }
}

impl StreamBackend for NativeOnly {
    type Session = Infallible;

    fn is_supported(&self) -> bool {
        false
    }

    fn attach(
        &mut self,
        _source: &str,
        _epoch: Epoch,
        _surface: &mut dyn MediaSurface,
    ) -> Result<Self::Session, PlaybackError> {
        Err(PlaybackError::AttachmentUnsupported)
    }
}

/// Owns a session for one epoch and detaches it when dropped.
#[derive(Debug)]
pub struct AttachmentGuard<S: StreamSession> {
    session: Option<S>,
    epoch: Epoch,
}

impl<S: StreamSession> AttachmentGuard<S> {
    fn new(session: S, epoch: Epoch) -> Self {
        Self {
            session: Some(session),
            epoch,
        }
    }

    #[must_use]
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }
}

impl<S: StreamSession> Drop for AttachmentGuard<S> {
    fn drop(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.detach();
            tracing::debug!(epoch = self.epoch, "stream session detached");
        }
    }
}

/// How a source identifier should be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// A segmented manifest (`.m3u8`) that needs the adaptive backend.
    AdaptiveManifest,
    /// A plain media file the surface can play by itself.
    Progressive,
}

impl SourceKind {
    #[must_use]
    pub fn detect(source: &str) -> Self {
        let path = source
            .split(['?', '#'])
            .next()
            .unwrap_or(source)
            .to_ascii_lowercase();
        if path.ends_with(".m3u8") {
            Self::AdaptiveManifest
        } else {
            Self::Progressive
        }
    }
}

/// Notifications reported by a live session.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Manifest parsed; media is flowing.
    Ready,
    /// The backend switched renditions.
    QualityChanged { label: String },
    /// The session died and cannot recover by itself.
    Fatal(String),
}

/// What the controller should reflect after a stream event or retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamNotice {
    Ready,
    QualityChanged,
    /// Session lost; media is stalled until a retry succeeds.
    Stalled,
}

/// Observable attachment state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentStatus {
    /// No source.
    Idle,
    /// The surface plays the identifier directly.
    Native,
    /// An adaptive session is live.
    Adaptive,
    /// Attachment failed; another attempt is scheduled.
    Retrying { attempt: u32, retry_at: Instant },
    /// Attempts exhausted for this source.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Native,
    Adaptive { attempts: u32 },
    Retrying { attempts: u32, retry_at: Instant },
    Failed,
}

/// Keeps exactly one live attachment for the current source.
pub struct StreamAttachmentManager<B: StreamBackend> {
    backend: B,
    mode: StreamMode,
    max_attempts: u32,
    backoff: Duration,
    epoch: Epoch,
    source: Option<String>,
    live: Option<AttachmentGuard<B::Session>>,
    phase: Phase,
    quality: Option<String>,
}

impl<B: StreamBackend> std::fmt::Debug for StreamAttachmentManager<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamAttachmentManager")
            .field("mode", &self.mode)
            .field("epoch", &self.epoch)
            .field("source", &self.source)
            .field("phase", &self.phase)
            .field("live", &self.live.is_some())
            .finish_non_exhaustive()
    }
}

impl<B: StreamBackend> StreamAttachmentManager<B> {
    #[must_use]
    pub fn new(backend: B, settings: &PlayerSettings) -> Self {
        Self {
            backend,
            mode: settings.stream_mode,
            max_attempts: settings.max_attach_attempts.max(1),
            backoff: settings.retry_backoff,
            epoch: 0,
            source: None,
            live: None,
            phase: Phase::Idle,
            quality: None,
        }
    }

    /// Switches to `source`, releasing the previous attachment first.
    ///
    /// Setting the current source again is a no-op. Returns the epoch that
    /// is current afterwards.
    pub fn set_source(
        &mut self,
        source: Option<&str>,
        now: Instant,
        surface: &mut dyn MediaSurface,
    ) -> Epoch {
        if self.epoch > 0 && self.source.as_deref() == source {
            return self.epoch;
        }

        self.release();
        self.epoch += 1;
        self.source = source.map(str::to_owned);
        self.quality = None;

        let Some(source) = source else {
            surface.clear_source();
            self.phase = Phase::Idle;
            tracing::debug!(epoch = self.epoch, "source cleared");
            return self.epoch;
        };

        let kind = SourceKind::detect(source);
        if self.mode == StreamMode::Direct || kind == SourceKind::Progressive {
            self.play_natively(source, surface);
        } else if !self.backend.is_supported() {
            tracing::info!(source, "adaptive streaming unavailable, using native playback");
            self.play_natively(source, surface);
        } else {
            self.try_attach(1, now, surface);
        }
        self.epoch
    }

    /// Runs a scheduled retry once its time has come.
    ///
    /// Returns `true` if an attempt was made.
    pub fn poll_retry(&mut self, now: Instant, surface: &mut dyn MediaSurface) -> bool {
        match self.phase {
            Phase::Retrying { attempts, retry_at } if now >= retry_at => {
                // Events still queued from the released session must not reach the retry
                self.epoch += 1;
                self.try_attach(attempts + 1, now, surface);
                true
            }
            _ => false,
        }
    }

    /// Routes an event from the session opened in `epoch`.
    ///
    /// Events from released epochs are dropped.
    pub fn on_stream_event(
        &mut self,
        epoch: Epoch,
        event: StreamEvent,
        now: Instant,
    ) -> Option<StreamNotice> {
        let attempts = match self.phase {
            Phase::Adaptive { attempts } if epoch == self.epoch && self.live.is_some() => attempts,
            _ => {
                tracing::debug!(epoch, current = self.epoch, ?event, "ignoring stale stream event");
                return None;
            }
        };

        match event {
            StreamEvent::Ready => Some(StreamNotice::Ready),
            StreamEvent::QualityChanged { label } => {
                tracing::debug!(epoch, quality = %label, "stream quality changed");
                self.quality = Some(label);
                Some(StreamNotice::QualityChanged)
            }
            StreamEvent::Fatal(message) => {
                tracing::warn!(epoch, error = %message, "stream session failed");
                self.release();
                self.schedule_retry(attempts, now);
                Some(StreamNotice::Stalled)
            }
        }
    }

    /// Releases the live attachment. Late events for it are ignored.
    pub fn teardown(&mut self) {
        self.release();
        self.source = None;
        self.phase = Phase::Idle;
        self.epoch += 1;
    }

    #[must_use]
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Current rendition label reported by the adaptive backend.
    #[must_use]
    pub fn quality(&self) -> Option<&str> {
        self.quality.as_deref()
    }

    #[must_use]
    pub fn status(&self) -> AttachmentStatus {
        match self.phase {
            Phase::Idle => AttachmentStatus::Idle,
            Phase::Native => AttachmentStatus::Native,
            Phase::Adaptive { .. } => AttachmentStatus::Adaptive,
            Phase::Retrying { attempts, retry_at } => AttachmentStatus::Retrying {
                attempt: attempts + 1,
                retry_at,
            },
            Phase::Failed => AttachmentStatus::Failed,
        }
    }

    /// Number of live adaptive sessions; never more than one.
    #[must_use]
    pub fn live_sessions(&self) -> usize {
        usize::from(self.live.is_some())
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Retrying { retry_at, .. } => Some(retry_at),
            _ => None,
        }
    }

    fn release(&mut self) {
        // Dropping the guard detaches
        self.live = None;
    }

    fn play_natively(&mut self, source: &str, surface: &mut dyn MediaSurface) {
        surface.load_native(source);
        self.phase = Phase::Native;
        tracing::debug!(epoch = self.epoch, source, "native playback");
    }

    fn try_attach(&mut self, attempt: u32, now: Instant, surface: &mut dyn MediaSurface) {
        let Some(source) = self.source.clone() else {
            self.phase = Phase::Idle;
            return;
        };

        match self.backend.attach(&source, self.epoch, surface) {
            Ok(session) => {
                self.live = Some(AttachmentGuard::new(session, self.epoch));
                self.phase = Phase::Adaptive { attempts: attempt };
                tracing::info!(epoch = self.epoch, source = %source, attempt, "stream attached");
            }
            Err(err) if err.is_degradable() => {
                tracing::info!(source = %source, error = %err, "adaptive attach unavailable, using native playback");
                self.play_natively(&source, surface);
            }
            Err(err) => {
                tracing::warn!(epoch = self.epoch, source = %source, attempt, error = %err, "stream attach failed");
                self.schedule_retry(attempt, now);
            }
        }
    }

    fn schedule_retry(&mut self, attempts: u32, now: Instant) {
        if attempts >= self.max_attempts {
            tracing::warn!(epoch = self.epoch, attempts, "giving up on stream attachment");
            self.phase = Phase::Failed;
            return;
        }
        let factor = 1u32 << (attempts - 1).min(16);
        let retry_at = now + self.backoff.saturating_mul(factor);
        self.phase = Phase::Retrying { attempts, retry_at };
    }
}
