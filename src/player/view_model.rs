// SPDX-License-Identifier: MPL-2.0
//! Render snapshot of the player.
//!
//! Everything a renderer needs to draw the chrome, already localised and
//! derived from controller state. The renderer never reads controller
//! internals directly.

use super::controller::PlayerProps;
use super::input::{skip_intro_offered, HoverPreview};
use super::presentation::PresentationState;
use super::session::MediaSession;
use super::settings_menu::SettingsMenu;
use super::time_format::format_clock;
use crate::domain::player::{PlaybackSpeed, Volume};
use crate::i18n::I18n;

/// Icon variant for the mute button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeLevel {
    Muted,
    Low,
    High,
}

impl VolumeLevel {
    #[must_use]
    pub fn from_state(volume: Volume, muted: bool) -> Self {
        if muted || volume.is_silent() {
            Self::Muted
        } else if volume.value() < 0.5 {
            Self::Low
        } else {
            Self::High
        }
    }
}

/// One row of the speed submenu.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedOption {
    pub speed: PlaybackSpeed,
    pub label: String,
    pub accessible_label: String,
    pub selected: bool,
}

/// Borrowed controller state the snapshot is built from.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    pub props: &'a PlayerProps,
    pub session: &'a MediaSession,
    pub controls_visible: bool,
    pub hover: &'a HoverPreview,
    pub volume_popover_open: bool,
    pub menu: SettingsMenu,
    pub presentation: &'a PresentationState,
    pub subtitles_enabled: bool,
    pub quality: Option<&'a str>,
    pub native_chrome: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlsView {
    pub region_label: String,
    pub video_label: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub poster: Option<String>,
    /// No source: render the poster and nothing that plays.
    pub poster_only: bool,
    /// Surface shows its own controls; draw no custom chrome.
    pub native_controls: bool,

    pub controls_visible: bool,
    pub back: Option<String>,

    pub start_overlay: Option<String>,
    pub spinner: Option<String>,
    pub pause_badge: bool,

    pub playing: bool,
    pub play_pause_label: String,
    pub rewind_label: String,
    pub forward_label: String,

    pub progress_percent: f64,
    /// Progress rounded for the slider value.
    pub progress_value: u8,
    pub buffered_percent: f64,
    pub progress_text: String,
    pub current_time: String,
    pub duration: String,
    pub hover_time: Option<String>,
    pub hover_offset: Option<f64>,

    pub volume_level: VolumeLevel,
    pub volume_percent: u8,
    pub volume_label: String,
    pub mute_label: String,
    pub volume_slider_open: bool,

    pub skip_intro: Option<String>,

    pub settings_label: String,
    pub settings_open: bool,
    pub speed_menu_open: bool,
    pub speed_label: String,
    pub speed_options: Vec<SpeedOption>,
    pub quality: Option<String>,

    pub subtitles_enabled: bool,
    pub subtitles_label: String,
    pub picture_in_picture: bool,
    pub pip_label: String,
    pub fullscreen: bool,
    pub fullscreen_label: String,
}

impl ControlsView {
    #[must_use]
    pub fn build(ctx: &ViewContext<'_>, i18n: &I18n) -> Self {
        let session = ctx.session;
        let props = ctx.props;
        let poster_only = props.src.is_none();

        let title = props
            .title
            .clone()
            .unwrap_or_else(|| i18n.tr("player-untitled"));
        let current_time = format_clock(session.current_secs());
        let duration = format_clock(session.duration_secs());
        let progress_percent = session.progress_percent();
        let speed = session.speed();
        let speed_text = speed.label();

        let start_overlay = (!poster_only && !session.has_started() && !session.is_playing())
            .then(|| i18n.tr("player-start"));
        let spinner = (session.is_loading() && session.has_started())
            .then(|| i18n.tr("player-loading"));
        let skip_intro = (!poster_only && skip_intro_offered(session.current_secs()))
            .then(|| i18n.tr("player-skip-intro"));

        let volume = session.volume();
        let volume_level = VolumeLevel::from_state(volume, session.is_muted());
        let volume_percent = volume.percent();
        let percent_text = volume_percent.to_string();

        Self {
            region_label: i18n.tr_with_args("player-region", &[("title", title.as_str())]),
            video_label: i18n.tr_with_args("player-video", &[("title", title.as_str())]),
            subtitle: props.subtitle.clone(),
            poster: props.poster.clone(),
            poster_only,
            native_controls: ctx.native_chrome,

            controls_visible: ctx.controls_visible,
            back: props.back_enabled.then(|| i18n.tr("player-back")),

            start_overlay,
            spinner,
            pause_badge: session.has_started() && !session.is_playing() && ctx.controls_visible,

            playing: session.is_playing(),
            play_pause_label: if session.is_playing() {
                i18n.tr("player-pause")
            } else {
                i18n.tr("player-play")
            },
            rewind_label: i18n.tr("player-rewind"),
            forward_label: i18n.tr("player-forward"),

            progress_percent,
            progress_value: progress_percent.round().clamp(0.0, 100.0) as u8,
            buffered_percent: session.buffered_fraction() * 100.0,
            progress_text: i18n.tr_with_args(
                "player-progress",
                &[("current", current_time.as_str()), ("duration", duration.as_str())],
            ),
            current_time,
            duration,
            hover_time: ctx.hover.time_secs.map(format_clock),
            hover_offset: ctx.hover.pixel_offset,

            volume_level,
            volume_percent,
            volume_label: i18n.tr_with_args("player-volume", &[("percent", percent_text.as_str())]),
            mute_label: if volume_level == VolumeLevel::Muted {
                i18n.tr("player-unmute")
            } else {
                i18n.tr("player-mute")
            },
            volume_slider_open: ctx.volume_popover_open,

            skip_intro,

            settings_label: i18n.tr_with_args("player-settings", &[("speed", speed_text.as_str())]),
            settings_open: ctx.menu.is_main_open(),
            speed_menu_open: ctx.menu.is_speed_open(),
            speed_label: speed_option_label(speed, i18n),
            speed_options: speed_options(speed, i18n),
            quality: ctx.quality.map(str::to_owned),

            subtitles_enabled: ctx.subtitles_enabled,
            subtitles_label: i18n.tr("player-subtitles"),
            picture_in_picture: ctx.presentation.is_picture_in_picture(),
            pip_label: i18n.tr("player-pip"),
            fullscreen: ctx.presentation.is_fullscreen(),
            fullscreen_label: if ctx.presentation.is_fullscreen() {
                i18n.tr("player-fullscreen-exit")
            } else {
                i18n.tr("player-fullscreen-enter")
            },

            title,
        }
    }
}

fn speed_option_label(speed: PlaybackSpeed, i18n: &I18n) -> String {
    if speed.is_normal() {
        i18n.tr("player-speed-normal")
    } else {
        i18n.tr_with_args("player-speed-option", &[("speed", speed.label().as_str())])
    }
}

fn speed_options(current: PlaybackSpeed, i18n: &I18n) -> Vec<SpeedOption> {
    PlaybackSpeed::presets()
        .map(|speed| SpeedOption {
            speed,
            label: speed_option_label(speed, i18n),
            accessible_label: if speed.is_normal() {
                i18n.tr("player-speed-normal-label")
            } else {
                i18n.tr_with_args("player-speed-option-label", &[("speed", speed.label().as_str())])
            },
            selected: speed == current,
        })
        .collect()
}
