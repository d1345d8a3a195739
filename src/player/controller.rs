// SPDX-License-Identifier: MPL-2.0
//! Player controller.
//!
//! One controller per mounted player. It owns the media surface, the
//! stream attachment and the presentation host, and keeps every piece of
//! player state in a dedicated sub-component:
//!
//! - [`MediaSession`] mirrors playback
//! - [`visibility::State`] decides when the chrome hides
//! - [`StreamAttachmentManager`] keeps one stream attachment per source
//! - [`InputDispatcher`] maps raw input to commands
//! - [`PresentationState`] mirrors fullscreen and picture-in-picture
//! - [`SettingsMenu`] tracks the settings popover
//!
//! All changes go through [`PlayerController::handle`]. Time is passed in
//! with each message; the controller never reads the clock.

use super::attachment::{Epoch, StreamAttachmentManager, StreamBackend, StreamEvent, StreamNotice};
use super::input::{skip_intro_offered, Activity, Command, Dispatch, InputDispatcher, KeyInput, PointerEvent};
use super::presentation::{PresentationHost, PresentationMode, PresentationState};
use super::session::{MediaSession, PlaybackPreferences};
use super::settings_menu::SettingsMenu;
use super::surface::{MediaSurface, SurfaceEvent};
use super::view_model::{ControlsView, ViewContext};
use super::visibility::{self, Visibility};
use crate::catalog::CatalogEntry;
use crate::config::{
    ChromeMode, PersistencePolicy, PlayerSettings, INTRO_SKIP_SECS, SKIP_STEP_SECS,
};
use crate::error::PlaybackError;
use crate::i18n::I18n;
use std::time::Instant;

/// Construction parameters supplied by the host page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerProps {
    /// Stream identifier. `None` renders a poster-only player.
    pub src: Option<String>,
    pub poster: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    /// Whether the host handles "back"; the affordance is shown only then.
    pub back_enabled: bool,
    pub auto_play: bool,
}

impl PlayerProps {
    #[must_use]
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            ..Self::default()
        }
    }

    /// Builds props from a catalog record.
    ///
    /// Episodes get a "Season N: Episode M" subtitle, or whichever half is known.
    #[must_use]
    pub fn from_catalog(entry: &CatalogEntry, i18n: &I18n, settings: &PlayerSettings) -> Self {
        let subtitle = entry
            .is_episode()
            .then(|| episode_subtitle(entry.season_number, entry.episode_number, i18n));

        Self {
            src: entry.source().map(str::to_owned),
            poster: entry.poster().map(str::to_owned),
            title: entry.display_title().map(str::to_owned),
            subtitle,
            back_enabled: false,
            auto_play: settings.autoplay,
        }
    }
}

fn episode_subtitle(season: Option<u32>, episode: Option<u32>, i18n: &I18n) -> String {
    match (season, episode) {
        (Some(season), Some(episode)) => i18n.tr_with_args(
            "player-episode-subtitle",
            &[
                ("season", season.to_string().as_str()),
                ("episode", episode.to_string().as_str()),
            ],
        ),
        (Some(season), None) => i18n.tr_with_args(
            "player-season-subtitle",
            &[("season", season.to_string().as_str())],
        ),
        (None, episode) => i18n.tr_with_args(
            "player-episode-only-subtitle",
            &[("episode", episode.unwrap_or_default().to_string().as_str())],
        ),
    }
}

/// Buttons and sliders in the custom chrome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control {
    TogglePlay,
    Rewind,
    Forward,
    SkipIntro,
    ToggleMute,
    SetVolume(f32),
    ToggleSettings,
    ToggleSpeedMenu,
    SelectSpeed(f64),
    ToggleSubtitles,
    TogglePictureInPicture,
    ToggleFullscreen,
    Back,
}

/// Messages accepted by the controller.
#[derive(Debug, Clone)]
pub enum Message {
    /// Lifecycle event reported by the media surface.
    Surface { event: SurfaceEvent, now: Instant },
    /// Event from the stream session opened in `epoch`.
    Stream {
        epoch: Epoch,
        event: StreamEvent,
        now: Instant,
    },
    Pointer { event: PointerEvent, now: Instant },
    Key { input: KeyInput, now: Instant },
    Control { action: Control, now: Instant },
    /// Host reports entering or leaving fullscreen.
    FullscreenChanged(bool),
    /// Host reports entering or leaving picture-in-picture.
    PictureInPictureChanged(bool),
    SourceChanged { src: Option<String>, now: Instant },
    /// Time has advanced to `now`; due deadlines run.
    Tick(Instant),
    Unmount,
}

/// What the host should do after a message.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// State changed; re-render.
    Render,
    /// The chrome was shown (`true`) or hidden.
    VisibilityChanged(bool),
    /// A key was handled; suppress its default action and re-render.
    PreventDefault,
    NavigateBack,
    /// Controller released everything. Carries preferences when they persist.
    Unmounted(Option<PlaybackPreferences>),
}

#[derive(Debug, Default)]
struct Outcome {
    changed: bool,
    visibility: Option<bool>,
    prevent_default: bool,
}

impl Outcome {
    fn absorb(&mut self, effect: visibility::Effect) {
        if let visibility::Effect::VisibilityChanged(visible) = effect {
            self.visibility = Some(visible);
        }
    }

    fn into_effect(self) -> Effect {
        if self.prevent_default {
            Effect::PreventDefault
        } else if let Some(visible) = self.visibility {
            Effect::VisibilityChanged(visible)
        } else if self.changed {
            Effect::Render
        } else {
            Effect::None
        }
    }
}

/// Playback controller for one mounted player.
pub struct PlayerController<S, B, P>
where
    S: MediaSurface,
    B: StreamBackend,
    P: PresentationHost,
{
    props: PlayerProps,
    settings: PlayerSettings,
    surface: S,
    host: P,
    session: MediaSession,
    visibility: visibility::State,
    attachment: StreamAttachmentManager<B>,
    input: InputDispatcher,
    menu: SettingsMenu,
    presentation: PresentationState,
    subtitles_enabled: bool,
    mounted: bool,
}

impl<S, B, P> std::fmt::Debug for PlayerController<S, B, P>
where
    S: MediaSurface,
    B: StreamBackend,
    P: PresentationHost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerController")
            .field("props", &self.props)
            .field("session", &self.session)
            .field("visibility", &self.visibility.visibility())
            .field("attachment", &self.attachment)
            .field("menu", &self.menu)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}

impl<S, B, P> PlayerController<S, B, P>
where
    S: MediaSurface,
    B: StreamBackend,
    P: PresentationHost,
{
    /// Mounts a player: attaches the source and applies initial settings.
    pub fn mount(
        props: PlayerProps,
        settings: PlayerSettings,
        mut surface: S,
        backend: B,
        host: P,
        now: Instant,
    ) -> Self {
        let session = MediaSession::new(&settings, props.src.is_some());
        session.apply_to(&mut surface);

        let mut controller = Self {
            attachment: StreamAttachmentManager::new(backend, &settings),
            input: InputDispatcher::new(settings.keyboard_capture),
            visibility: visibility::State::default(),
            menu: SettingsMenu::default(),
            presentation: PresentationState::default(),
            subtitles_enabled: false,
            mounted: true,
            session,
            props,
            settings,
            surface,
            host,
        };

        controller
            .attachment
            .set_source(controller.props.src.as_deref(), now, &mut controller.surface);

        match controller.props.src.as_deref() {
            Some(src) => tracing::info!(source = src, chrome = ?controller.settings.chrome, "player mounted"),
            None => tracing::warn!(error = %PlaybackError::MissingSource, "player mounted without a source"),
        }

        if controller.props.auto_play {
            let mut outcome = Outcome::default();
            controller.start_playback(now, &mut outcome);
        }
        controller
    }

    /// Applies one message and reports what the host should do.
    pub fn handle(&mut self, msg: Message) -> Effect {
        if !self.mounted {
            return Effect::None;
        }

        let mut outcome = Outcome::default();
        match msg {
            Message::Surface { event, now } => {
                let was_playing = self.session.is_playing();
                self.session.handle_event(&event);
                self.sync_visibility(was_playing, now, &mut outcome);
                outcome.changed = true;
            }
            Message::Stream { epoch, event, now } => {
                match self.attachment.on_stream_event(epoch, event, now) {
                    Some(StreamNotice::Stalled) => {
                        self.session.on_waiting();
                        outcome.changed = true;
                    }
                    Some(StreamNotice::Ready | StreamNotice::QualityChanged) => {
                        outcome.changed = true;
                    }
                    None => {}
                }
            }
            Message::Pointer { event, now } => {
                if self.custom_chrome() {
                    let dispatch = self.input.pointer(
                        event,
                        self.visibility.is_visible(),
                        self.session.duration_secs(),
                    );
                    outcome.changed = true;
                    self.apply_dispatch(dispatch, now, &mut outcome);
                }
            }
            Message::Key { input, now } => {
                if self.custom_chrome() {
                    let dispatch = self.input.key(&input);
                    outcome.prevent_default = dispatch.prevent_default;
                    self.apply_dispatch(dispatch, now, &mut outcome);
                }
            }
            Message::Control { action, now } => {
                self.apply_control(action, now, &mut outcome);
                if matches!(action, Control::Back) {
                    return if self.props.back_enabled {
                        Effect::NavigateBack
                    } else {
                        Effect::None
                    };
                }
            }
            Message::FullscreenChanged(active) => {
                outcome.changed = self.presentation.on_changed(PresentationMode::Fullscreen, active);
            }
            Message::PictureInPictureChanged(active) => {
                outcome.changed = self
                    .presentation
                    .on_changed(PresentationMode::PictureInPicture, active);
            }
            Message::SourceChanged { src, now } => {
                self.change_source(src, now, &mut outcome);
            }
            Message::Tick(now) => {
                outcome.absorb(self.visibility.handle(visibility::Message::Tick { now }));
                if self.attachment.poll_retry(now, &mut self.surface) {
                    self.session.apply_to(&mut self.surface);
                    outcome.changed = true;
                }
            }
            Message::Unmount => {
                return Effect::Unmounted(self.teardown());
            }
        }
        outcome.into_effect()
    }

    /// Earliest pending deadline (hide timer or attach retry).
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        if !self.mounted {
            return None;
        }
        match (self.visibility.next_deadline(), self.attachment.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Releases the hide timer, the stream attachment and presentation modes.
    ///
    /// Idempotent; also runs on drop.
    pub fn teardown(&mut self) -> Option<PlaybackPreferences> {
        if !self.mounted {
            return None;
        }
        self.mounted = false;
        self.visibility.handle(visibility::Message::Teardown);
        self.attachment.teardown();
        self.presentation.exit_all(&mut self.host);
        tracing::info!("player unmounted");

        (self.settings.persistence == PersistencePolicy::Remember)
            .then(|| self.session.preferences())
    }

    #[must_use]
    pub fn view(&self, i18n: &I18n) -> ControlsView {
        let ctx = ViewContext {
            props: &self.props,
            session: &self.session,
            controls_visible: !self.custom_chrome() || self.visibility.is_visible(),
            hover: self.input.hover(),
            volume_popover_open: self.input.volume_popover_open(),
            menu: self.menu,
            presentation: &self.presentation,
            subtitles_enabled: self.subtitles_enabled,
            quality: self.attachment.quality(),
            native_chrome: !self.custom_chrome(),
        };
        ControlsView::build(&ctx, i18n)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn props(&self) -> &PlayerProps {
        &self.props
    }

    #[must_use]
    pub fn session(&self) -> &MediaSession {
        &self.session
    }

    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility.visibility()
    }

    #[must_use]
    pub fn controls_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    #[must_use]
    pub fn attachment(&self) -> &StreamAttachmentManager<B> {
        &self.attachment
    }

    #[must_use]
    pub fn input(&self) -> &InputDispatcher {
        &self.input
    }

    #[must_use]
    pub fn settings_menu(&self) -> SettingsMenu {
        self.menu
    }

    #[must_use]
    pub fn presentation(&self) -> &PresentationState {
        &self.presentation
    }

    #[must_use]
    pub fn subtitles_enabled(&self) -> bool {
        self.subtitles_enabled
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn host(&self) -> &P {
        &self.host
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn custom_chrome(&self) -> bool {
        self.settings.chrome == ChromeMode::Custom
    }

    fn apply_dispatch(&mut self, dispatch: Dispatch, now: Instant, outcome: &mut Outcome) {
        if let Some(command) = dispatch.command {
            self.execute(command, now, outcome);
        }
        let playing = self.session.is_playing();
        let message = match dispatch.activity {
            Activity::None => return,
            Activity::Interacted => visibility::Message::Activity { now, playing },
            Activity::PointerLeft => visibility::Message::PointerLeft { now, playing },
        };
        outcome.absorb(self.visibility.handle(message));
    }

    fn apply_control(&mut self, action: Control, now: Instant, outcome: &mut Outcome) {
        outcome.changed = true;
        match action {
            Control::TogglePlay => self.execute(Command::TogglePlay, now, outcome),
            Control::Rewind => self.execute(Command::Skip(-SKIP_STEP_SECS), now, outcome),
            Control::Forward => self.execute(Command::Skip(SKIP_STEP_SECS), now, outcome),
            Control::SkipIntro => {
                if skip_intro_offered(self.session.current_secs()) {
                    self.execute(Command::Skip(INTRO_SKIP_SECS), now, outcome);
                }
            }
            Control::ToggleMute => self.execute(Command::ToggleMute, now, outcome),
            Control::SetVolume(volume) => self.session.set_volume(volume, &mut self.surface),
            Control::ToggleSettings => self.menu.toggle_main(),
            Control::ToggleSpeedMenu => self.menu.toggle_speed_submenu(),
            Control::SelectSpeed(speed) => {
                if self.session.set_speed(speed, &mut self.surface) {
                    self.menu.close();
                }
            }
            Control::ToggleSubtitles => self.subtitles_enabled = !self.subtitles_enabled,
            Control::TogglePictureInPicture => {
                self.execute_presentation(PresentationMode::PictureInPicture);
            }
            Control::ToggleFullscreen => self.execute(Command::ToggleFullscreen, now, outcome),
            Control::Back => return,
        }

        if self.custom_chrome() {
            let playing = self.session.is_playing();
            outcome.absorb(
                self.visibility
                    .handle(visibility::Message::Activity { now, playing }),
            );
        }
    }

    fn execute(&mut self, command: Command, now: Instant, outcome: &mut Outcome) {
        outcome.changed = true;
        match command {
            Command::TogglePlay => {
                if self.session.is_playing() {
                    self.session.pause(&mut self.surface);
                    self.sync_visibility(true, now, outcome);
                } else {
                    self.start_playback(now, outcome);
                }
            }
            Command::ToggleFullscreen => self.execute_presentation(PresentationMode::Fullscreen),
            Command::ToggleMute => self.session.toggle_mute(&mut self.surface),
            Command::Skip(delta) => self.session.skip(delta, &mut self.surface),
            Command::SeekTo(secs) => self.session.seek_to(secs, &mut self.surface),
            Command::VolumeStep { up } => self.session.nudge_volume(up, &mut self.surface),
        }
    }

    fn execute_presentation(&mut self, mode: PresentationMode) {
        self.presentation.toggle(mode, &mut self.host);
    }

    fn start_playback(&mut self, now: Instant, outcome: &mut Outcome) {
        if self.props.src.is_none() {
            tracing::debug!(error = %PlaybackError::MissingSource, "ignoring play");
            return;
        }
        let was_playing = self.session.is_playing();
        if let Err(err) = self.session.play(&mut self.surface) {
            tracing::debug!(error = %err, key = err.i18n_key(), "play refused, staying paused");
        }
        self.sync_visibility(was_playing, now, outcome);
    }

    /// Feeds play/pause transitions into the visibility machine.
    fn sync_visibility(&mut self, was_playing: bool, now: Instant, outcome: &mut Outcome) {
        let playing = self.session.is_playing();
        if playing == was_playing || !self.custom_chrome() {
            return;
        }
        let message = if playing {
            visibility::Message::Played { now }
        } else {
            visibility::Message::Paused
        };
        outcome.absorb(self.visibility.handle(message));
    }

    fn change_source(&mut self, src: Option<String>, now: Instant, outcome: &mut Outcome) {
        if src == self.props.src {
            return;
        }
        tracing::info!(from = ?self.props.src, to = ?src, "source changed");
        let was_playing = self.session.is_playing();

        self.props.src = src;
        self.session.reset_for_source(self.props.src.is_some());
        self.input.reset();
        self.menu.close();
        self.attachment
            .set_source(self.props.src.as_deref(), now, &mut self.surface);
        self.session.apply_to(&mut self.surface);
        self.sync_visibility(was_playing, now, outcome);
        outcome.changed = true;

        if self.props.auto_play {
            self.start_playback(now, outcome);
        }
    }
}

impl<S, B, P> Drop for PlayerController<S, B, P>
where
    S: MediaSurface,
    B: StreamBackend,
    P: PresentationHost,
{
    fn drop(&mut self) {
        self.teardown();
    }
}
