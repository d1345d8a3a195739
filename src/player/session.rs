// SPDX-License-Identifier: MPL-2.0
//! Authoritative mirror of playback state.
//!
//! Commands update the mirror optimistically and forward to the surface.
//! Surface events always overwrite whatever a command guessed, so the last
//! authoritative event wins.

use super::surface::{MediaSurface, SurfaceEvent};
use crate::config::PlayerSettings;
use crate::domain::player::{PlaybackSpeed, Volume};
use crate::error::PlaybackError;

/// Volume, mute and speed as they stood when the player unmounted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackPreferences {
    pub volume: Volume,
    pub muted: bool,
    pub speed: PlaybackSpeed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaSession {
    current_secs: f64,
    duration_secs: f64,
    buffered_fraction: f64,
    volume: Volume,
    previous_volume: Volume,
    muted: bool,
    playing: bool,
    loading: bool,
    speed: PlaybackSpeed,
    has_started: bool,
}

impl MediaSession {
    /// Creates the mirror for a fresh mount.
    ///
    /// Without a source there is nothing to wait for, so `loading` starts off.
    #[must_use]
    pub fn new(settings: &PlayerSettings, has_source: bool) -> Self {
        let (volume, previous_volume) = if settings.muted {
            (Volume::SILENT, settings.volume)
        } else {
            (settings.volume, settings.volume)
        };
        Self {
            current_secs: 0.0,
            duration_secs: 0.0,
            buffered_fraction: 0.0,
            volume,
            previous_volume,
            muted: settings.muted || volume.is_silent(),
            playing: false,
            loading: has_source,
            speed: settings.speed,
            has_started: false,
        }
    }

    /// Pushes gain and rate to the surface, which resets them on every new source.
    pub fn apply_to(&self, surface: &mut dyn MediaSurface) {
        surface.set_volume(self.volume.value());
        surface.set_playback_rate(self.speed.value());
    }

    /// Forgets everything tied to the previous source; keeps volume and speed.
    pub fn reset_for_source(&mut self, has_source: bool) {
        self.current_secs = 0.0;
        self.duration_secs = 0.0;
        self.buffered_fraction = 0.0;
        self.playing = false;
        self.loading = has_source;
        self.has_started = false;
    }

    // -------------------------------------------------------------------------
    // Surface events
    // -------------------------------------------------------------------------

    pub fn handle_event(&mut self, event: &SurfaceEvent) {
        match event {
            SurfaceEvent::MetadataLoaded { duration_secs } => self.on_metadata_loaded(*duration_secs),
            SurfaceEvent::TimeUpdate { current_secs } => self.on_time_update(*current_secs),
            SurfaceEvent::Progress { buffered } => {
                if let Some(end) = SurfaceEvent::buffered_end(buffered) {
                    self.on_progress(end);
                }
            }
            SurfaceEvent::Waiting => self.on_waiting(),
            SurfaceEvent::CanPlay => self.on_can_play(),
            SurfaceEvent::Play => self.playing = true,
            SurfaceEvent::Pause | SurfaceEvent::Ended => self.playing = false,
            SurfaceEvent::Error(message) => {
                tracing::warn!(error = %message, "media surface reported an error");
                self.playing = false;
                self.loading = true;
            }
        }
    }

    pub fn on_metadata_loaded(&mut self, duration_secs: f64) {
        self.duration_secs = if duration_secs.is_finite() {
            duration_secs.max(0.0)
        } else {
            // Live streams report an infinite duration
            0.0
        };
        self.loading = false;
    }

    /// Trusts the surface; no clamping.
    pub fn on_time_update(&mut self, current_secs: f64) {
        self.current_secs = current_secs;
    }

    pub fn on_progress(&mut self, buffered_end: f64) {
        self.buffered_fraction = if self.duration_secs > 0.0 && buffered_end.is_finite() {
            (buffered_end / self.duration_secs).clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    pub fn on_waiting(&mut self) {
        self.loading = true;
    }

    pub fn on_can_play(&mut self) {
        self.loading = false;
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Starts playback. A refused play leaves the mirror as it was.
    pub fn play(&mut self, surface: &mut dyn MediaSurface) -> Result<(), PlaybackError> {
        let was_started = self.has_started;
        self.playing = true;
        self.has_started = true;
        if let Err(err) = surface.play() {
            tracing::warn!(error = %err, "surface refused to play");
            self.playing = false;
            self.has_started = was_started;
            return Err(err);
        }
        Ok(())
    }

    pub fn pause(&mut self, surface: &mut dyn MediaSurface) {
        surface.pause();
        self.playing = false;
    }

    pub fn toggle_play(&mut self, surface: &mut dyn MediaSurface) -> Result<(), PlaybackError> {
        if self.playing {
            self.pause(surface);
            Ok(())
        } else {
            self.play(surface)
        }
    }

    /// Seeks to `secs` clamped to `[0, duration]`. NaN seeks to the start.
    pub fn seek_to(&mut self, secs: f64, surface: &mut dyn MediaSurface) {
        let target = if secs.is_nan() {
            0.0
        } else {
            secs.clamp(0.0, self.duration_secs)
        };
        surface.set_current_time(target);
        self.current_secs = target;
    }

    pub fn skip(&mut self, delta_secs: f64, surface: &mut dyn MediaSurface) {
        self.seek_to(self.current_secs + delta_secs, surface);
    }

    /// Sets the volume from the slider; zero mutes, anything else unmutes.
    pub fn set_volume(&mut self, volume: f32, surface: &mut dyn MediaSurface) {
        self.volume = Volume::new(volume);
        self.muted = self.volume.is_silent();
        surface.set_volume(self.volume.value());
    }

    /// One keyboard step up (unmutes) or down (mutes on reaching zero).
    pub fn nudge_volume(&mut self, up: bool, surface: &mut dyn MediaSurface) {
        if up {
            self.volume = self.volume.increase();
            self.muted = false;
        } else {
            self.volume = self.volume.decrease();
            if self.volume.is_silent() {
                self.muted = true;
            }
        }
        surface.set_volume(self.volume.value());
    }

    pub fn toggle_mute(&mut self, surface: &mut dyn MediaSurface) {
        if self.muted {
            self.volume = self.previous_volume;
            self.muted = false;
        } else {
            self.previous_volume = self.volume;
            self.volume = Volume::SILENT;
            self.muted = true;
        }
        surface.set_volume(self.volume.value());
    }

    /// Applies a preset speed. Any other value is ignored and returns `false`.
    pub fn set_speed(&mut self, speed: f64, surface: &mut dyn MediaSurface) -> bool {
        let Some(speed) = PlaybackSpeed::from_value(speed) else {
            tracing::debug!(speed, "ignoring non-preset playback speed");
            return false;
        };
        surface.set_playback_rate(speed.value());
        self.speed = speed;
        true
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn current_secs(&self) -> f64 {
        self.current_secs
    }

    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    #[must_use]
    pub fn buffered_fraction(&self) -> f64 {
        self.buffered_fraction
    }

    #[must_use]
    pub fn volume(&self) -> Volume {
        self.volume
    }

    #[must_use]
    pub fn previous_volume(&self) -> Volume {
        self.previous_volume
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    #[must_use]
    pub fn has_started(&self) -> bool {
        self.has_started
    }

    /// Position as a percentage of duration; 0 while duration is unknown.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        if self.duration_secs > 0.0 {
            (self.current_secs / self.duration_secs) * 100.0
        } else {
            0.0
        }
    }

    /// Preferences worth carrying to the next mount. A muted session reports
    /// the volume it would unmute to.
    #[must_use]
    pub fn preferences(&self) -> PlaybackPreferences {
        PlaybackPreferences {
            volume: if self.muted {
                self.previous_volume
            } else {
                self.volume
            },
            muted: self.muted,
            speed: self.speed,
        }
    }
}
