// SPDX-License-Identifier: MPL-2.0
//! This module handles the player configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language
//! - `[playback]` - Initial volume, mute, speed, autoplay and whether they persist
//! - `[controls]` - Custom or native chrome, keyboard capture scope
//! - `[streaming]` - Adaptive or direct playback, attachment retry policy
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `CATALOG_PLAYER_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use catalog_player::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! config.general.language = Some("pt-BR".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::domain::player::{PlaybackSpeed, Volume};
use crate::error::{Error, Result};
use crate::player::PlaybackPreferences;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Enums (shared between sections)
// =============================================================================

/// Which control surface the player renders.
///
/// `Native` is the degraded configuration: the host shows the media
/// surface's built-in controls, so the auto-hide machine and keyboard table
/// stay inert.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ChromeMode {
    #[default]
    Custom,
    Native,
}

/// When the keyboard table is active.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum KeyboardCapture {
    /// Only while the player region has focus.
    Focused,
    /// For every key press while the player is mounted.
    #[default]
    Global,
}

/// How stream identifiers are fed to the media surface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StreamMode {
    /// Manifests go through the adaptive backend when it is supported.
    #[default]
    Adaptive,
    /// Every identifier is handed straight to the media surface.
    Direct,
}

/// Whether volume, mute and speed survive across player instances.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PersistencePolicy {
    /// Every mount starts from the configured values.
    #[default]
    Reset,
    /// The controller hands its final preferences back on unmount.
    Remember,
}

// =============================================================================
// Section Structs
// =============================================================================

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "pt-BR").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Playback settings applied at mount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaybackConfig {
    /// Start playing as soon as a source is attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,

    /// Volume (0.0 to 1.0).
    #[serde(default = "default_volume", skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,

    /// Whether audio starts muted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted: Option<bool>,

    /// Playback speed; must be one of the menu presets.
    #[serde(
        default = "default_playback_speed",
        skip_serializing_if = "Option::is_none"
    )]
    pub playback_speed: Option<f64>,

    /// Whether the values above are written back after each session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistence: Option<PersistencePolicy>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            autoplay: Some(false),
            volume: default_volume(),
            muted: Some(false),
            playback_speed: default_playback_speed(),
            persistence: Some(PersistencePolicy::default()),
        }
    }
}

/// Control chrome settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControlsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chrome: Option<ChromeMode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyboard_capture: Option<KeyboardCapture>,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            chrome: Some(ChromeMode::default()),
            keyboard_capture: Some(KeyboardCapture::default()),
        }
    }
}

/// Stream attachment settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreamingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<StreamMode>,

    /// Attachment attempts per source, first attempt included.
    #[serde(
        default = "default_max_attach_attempts",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_attach_attempts: Option<u32>,

    /// Delay before the first retry in milliseconds; doubles per attempt.
    #[serde(
        default = "default_retry_backoff_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub retry_backoff_ms: Option<u64>,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            mode: Some(StreamMode::default()),
            max_attach_attempts: default_max_attach_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Player configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub controls: ControlsConfig,

    #[serde(default)]
    pub streaming: StreamingConfig,
}

/// Fully resolved settings consumed by the controller.
///
/// Every field is validated: out-of-range numbers are clamped and
/// non-preset speeds fall back to normal speed.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSettings {
    pub autoplay: bool,
    pub volume: Volume,
    pub muted: bool,
    pub speed: PlaybackSpeed,
    pub persistence: PersistencePolicy,
    pub chrome: ChromeMode,
    pub keyboard_capture: KeyboardCapture,
    pub stream_mode: StreamMode,
    pub max_attach_attempts: u32,
    pub retry_backoff: Duration,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Config::default().player_settings()
    }
}

impl Config {
    /// Resolves the optional sections into validated [`PlayerSettings`].
    pub fn player_settings(&self) -> PlayerSettings {
        let speed = match self.playback.playback_speed {
            Some(value) => PlaybackSpeed::from_value(value).unwrap_or_else(|| {
                tracing::warn!(speed = value, "configured playback speed is not a preset");
                PlaybackSpeed::default()
            }),
            None => PlaybackSpeed::default(),
        };

        PlayerSettings {
            autoplay: self.playback.autoplay.unwrap_or(false),
            volume: Volume::new(self.playback.volume.unwrap_or(DEFAULT_VOLUME)),
            muted: self.playback.muted.unwrap_or(false),
            speed,
            persistence: self.playback.persistence.unwrap_or_default(),
            chrome: self.controls.chrome.unwrap_or_default(),
            keyboard_capture: self.controls.keyboard_capture.unwrap_or_default(),
            stream_mode: self.streaming.mode.unwrap_or_default(),
            max_attach_attempts: self
                .streaming
                .max_attach_attempts
                .unwrap_or(DEFAULT_MAX_ATTACH_ATTEMPTS)
                .clamp(1, MAX_ATTACH_ATTEMPTS),
            retry_backoff: Duration::from_millis(
                self.streaming
                    .retry_backoff_ms
                    .unwrap_or(DEFAULT_RETRY_BACKOFF_MS)
                    .clamp(MIN_RETRY_BACKOFF_MS, MAX_RETRY_BACKOFF_MS),
            ),
        }
    }

    /// Stores preferences handed back by an unmounted controller.
    ///
    /// Ignored unless the persistence policy is `remember`.
    pub fn remember(&mut self, prefs: &PlaybackPreferences) -> bool {
        if self.playback.persistence != Some(PersistencePolicy::Remember) {
            return false;
        }
        self.playback.volume = Some(prefs.volume.value());
        self.playback.muted = Some(prefs.muted);
        self.playback.playback_speed = Some(prefs.speed.value());
        true
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_volume() -> Option<f32> {
    Some(DEFAULT_VOLUME)
}

fn default_playback_speed() -> Option<f64> {
    Some(DEFAULT_PLAYBACK_SPEED)
}

fn default_max_attach_attempts() -> Option<u32> {
    Some(DEFAULT_MAX_ATTACH_ATTEMPTS)
}

fn default_retry_backoff_ms() -> Option<u64> {
    Some(DEFAULT_RETRY_BACKOFF_MS)
}

// =============================================================================
// Load Functions
// =============================================================================

fn config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "failed to load settings");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
