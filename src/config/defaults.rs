// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Volume / Speed**: Initial audio and rate settings
//! - **Controls**: Auto-hide delays for the control chrome
//! - **Navigation**: Skip step and the "skip intro" window
//! - **Streaming**: Attachment retry policy

use crate::domain::player::{speed_bounds, volume_bounds};

// ==========================================================================
// Volume / Speed Defaults
// ==========================================================================

/// Volume at mount (0.0 to 1.0).
pub const DEFAULT_VOLUME: f32 = volume_bounds::DEFAULT;

/// Volume change per arrow key press.
pub const VOLUME_STEP: f32 = volume_bounds::STEP;

/// Playback speed at mount.
pub const DEFAULT_PLAYBACK_SPEED: f64 = speed_bounds::DEFAULT;

// ==========================================================================
// Controls Defaults
// ==========================================================================

/// Controls stay visible this long after pointer/touch/key activity while playing.
pub const HIDE_AFTER_ACTIVITY_MS: u64 = 3000;

/// Controls stay visible this long after the pointer leaves a playing player.
pub const HIDE_AFTER_POINTER_LEAVE_MS: u64 = 1000;

// ==========================================================================
// Navigation Defaults
// ==========================================================================

/// Seconds skipped by arrow keys and the rewind/forward buttons.
pub const SKIP_STEP_SECS: f64 = 10.0;

/// "Skip intro" is offered strictly after this position (seconds).
pub const INTRO_WINDOW_START_SECS: f64 = 5.0;

/// "Skip intro" is offered strictly before this position (seconds).
pub const INTRO_WINDOW_END_SECS: f64 = 30.0;

/// Seconds skipped by the "skip intro" affordance.
pub const INTRO_SKIP_SECS: f64 = 25.0;

// ==========================================================================
// Streaming Defaults
// ==========================================================================

/// Attachment attempts per source before giving up (first attempt included).
pub const DEFAULT_MAX_ATTACH_ATTEMPTS: u32 = 3;

/// Upper bound on configured attempts.
pub const MAX_ATTACH_ATTEMPTS: u32 = 10;

/// Delay before the first retry; doubles on each further attempt.
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 1000;

/// Bounds for the configured retry backoff.
pub const MIN_RETRY_BACKOFF_MS: u64 = 100;
pub const MAX_RETRY_BACKOFF_MS: u64 = 30_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_VOLUME >= volume_bounds::MIN);
    assert!(DEFAULT_VOLUME <= volume_bounds::MAX);
    assert!(VOLUME_STEP > 0.0);

    // Shorter delay after leaving, longer after activity
    assert!(HIDE_AFTER_POINTER_LEAVE_MS < HIDE_AFTER_ACTIVITY_MS);

    assert!(INTRO_WINDOW_START_SECS < INTRO_WINDOW_END_SECS);
    assert!(INTRO_SKIP_SECS > 0.0);
    assert!(SKIP_STEP_SECS > 0.0);

    assert!(DEFAULT_MAX_ATTACH_ATTEMPTS >= 1);
    assert!(DEFAULT_MAX_ATTACH_ATTEMPTS <= MAX_ATTACH_ATTEMPTS);
    assert!(MIN_RETRY_BACKOFF_MS > 0);
    assert!(DEFAULT_RETRY_BACKOFF_MS >= MIN_RETRY_BACKOFF_MS);
    assert!(DEFAULT_RETRY_BACKOFF_MS <= MAX_RETRY_BACKOFF_MS);
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::player::PlaybackSpeed;

    #[test]
    fn default_speed_is_a_preset() {
        assert!(PlaybackSpeed::from_value(DEFAULT_PLAYBACK_SPEED).is_some());
    }

    #[test]
    fn hide_delays_match_player_behaviour() {
        assert_eq!(HIDE_AFTER_ACTIVITY_MS, 3000);
        assert_eq!(HIDE_AFTER_POINTER_LEAVE_MS, 1000);
    }

    #[test]
    fn intro_skip_lands_past_the_window() {
        // Skipping from anywhere inside the window must leave it
        assert!(INTRO_WINDOW_START_SECS + INTRO_SKIP_SECS >= INTRO_WINDOW_END_SECS);
    }
}
