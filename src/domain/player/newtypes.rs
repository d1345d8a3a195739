// SPDX-License-Identifier: MPL-2.0
//! Playback newtypes.
//!
//! This module provides type-safe wrappers for playback values,
//! ensuring they are always within valid ranges.

// =============================================================================
// Volume
// =============================================================================

/// Volume bounds (0.0 to 1.0, the range of the media surface's output gain).
pub mod volume_bounds {
    /// Minimum volume level.
    pub const MIN: f32 = 0.0;
    /// Maximum volume level.
    pub const MAX: f32 = 1.0;
    /// Volume at mount when nothing else is configured.
    pub const DEFAULT: f32 = 1.0;
    /// Volume adjustment step per arrow key press (10%).
    pub const STEP: f32 = 0.1;
}

/// Volume level, guaranteed to be within valid range (0.0–1.0).
///
/// Values are kept at slider precision (hundredths) so that repeated
/// keyboard steps land exactly on 0.0 and 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(f32);

impl Volume {
    /// Silent volume.
    pub const SILENT: Volume = Volume(volume_bounds::MIN);

    /// Creates a new volume level, clamping to valid range.
    ///
    /// NaN is treated as silence.
    #[must_use]
    pub fn new(volume: f32) -> Self {
        if volume.is_nan() {
            return Self::SILENT;
        }
        let rounded = (volume * 100.0).round() / 100.0;
        Self(rounded.clamp(volume_bounds::MIN, volume_bounds::MAX))
    }

    /// Returns the volume value as f32.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns true if the volume is exactly zero.
    #[must_use]
    pub fn is_silent(self) -> bool {
        self.0 <= volume_bounds::MIN
    }

    /// Increases volume by one step, clamping to maximum.
    #[must_use]
    pub fn increase(self) -> Self {
        Self::new(self.0 + volume_bounds::STEP)
    }

    /// Decreases volume by one step, clamping to minimum.
    #[must_use]
    pub fn decrease(self) -> Self {
        Self::new(self.0 - volume_bounds::STEP)
    }

    /// Volume as a rounded percentage, for labels.
    #[must_use]
    pub fn percent(self) -> u8 {
        (self.0 * 100.0).round() as u8
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(volume_bounds::DEFAULT)
    }
}

// =============================================================================
// PlaybackSpeed
// =============================================================================

/// Playback speed presets offered by the speed submenu.
pub mod speed_bounds {
    /// Normal playback speed.
    pub const DEFAULT: f64 = 1.0;
    /// The only speeds the controller accepts.
    pub const PRESETS: [f64; 6] = [0.5, 0.75, 1.0, 1.25, 1.5, 2.0];
}

/// Playback speed restricted to one of [`speed_bounds::PRESETS`].
///
/// Unlike [`Volume`], out-of-set values are rejected rather than clamped:
/// the menu only ever offers the presets, so anything else is a caller bug.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSpeed(f64);

impl PlaybackSpeed {
    /// Returns the preset matching `speed`, or `None` for any other value.
    #[must_use]
    pub fn from_value(speed: f64) -> Option<Self> {
        speed_bounds::PRESETS
            .iter()
            .find(|&&preset| (preset - speed).abs() < 0.001)
            .map(|&preset| Self(preset))
    }

    /// Iterates over every accepted speed, slowest first.
    pub fn presets() -> impl Iterator<Item = PlaybackSpeed> {
        speed_bounds::PRESETS.iter().map(|&s| Self(s))
    }

    /// Returns the speed value as f64.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns true for 1.0x.
    #[must_use]
    pub fn is_normal(self) -> bool {
        (self.0 - speed_bounds::DEFAULT).abs() < 0.001
    }

    /// Compact label without trailing zeros ("0.5", "1.25", "2").
    #[must_use]
    pub fn label(self) -> String {
        let text = format!("{:.2}", self.0);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

impl Default for PlaybackSpeed {
    fn default() -> Self {
        Self(speed_bounds::DEFAULT)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Volume tests
    // -------------------------------------------------------------------------

    #[test]
    fn volume_clamps_to_valid_range() {
        assert!((Volume::new(-0.5).value() - volume_bounds::MIN).abs() < f32::EPSILON);
        assert!((Volume::new(2.0).value() - volume_bounds::MAX).abs() < f32::EPSILON);
        assert!((Volume::new(0.5).value() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn volume_nan_is_silent() {
        assert!(Volume::new(f32::NAN).is_silent());
    }

    #[test]
    fn volume_steps_reach_zero_exactly() {
        let mut vol = Volume::new(0.8);
        for _ in 0..8 {
            vol = vol.decrease();
        }
        assert!(vol.is_silent());
        assert_eq!(vol.value(), 0.0);
    }

    #[test]
    fn volume_steps_reach_max_exactly() {
        let mut vol = Volume::new(0.3);
        for _ in 0..10 {
            vol = vol.increase();
        }
        assert_eq!(vol.value(), 1.0);
    }

    #[test]
    fn volume_percent_rounds() {
        assert_eq!(Volume::new(0.8).percent(), 80);
        assert_eq!(Volume::new(0.0).percent(), 0);
        assert_eq!(Volume::new(1.0).percent(), 100);
    }

    // -------------------------------------------------------------------------
    // PlaybackSpeed tests
    // -------------------------------------------------------------------------

    #[test]
    fn speed_accepts_only_presets() {
        for preset in speed_bounds::PRESETS {
            assert!(PlaybackSpeed::from_value(preset).is_some());
        }
        assert!(PlaybackSpeed::from_value(3.0).is_none());
        assert!(PlaybackSpeed::from_value(0.1).is_none());
        assert!(PlaybackSpeed::from_value(f64::NAN).is_none());
    }

    #[test]
    fn speed_default_is_normal() {
        assert!(PlaybackSpeed::default().is_normal());
        assert!(!PlaybackSpeed::from_value(1.5).is_some_and(PlaybackSpeed::is_normal));
    }

    #[test]
    fn speed_labels_drop_trailing_zeros() {
        let labels: Vec<String> = PlaybackSpeed::presets().map(PlaybackSpeed::label).collect();
        assert_eq!(labels, vec!["0.5", "0.75", "1", "1.25", "1.5", "2"]);
    }
}
