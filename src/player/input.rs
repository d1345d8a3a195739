// SPDX-License-Identifier: MPL-2.0
//! Pointer, touch and keyboard routing.
//!
//! The dispatcher turns raw input into a [`Dispatch`]: whether the input
//! counts as activity for the visibility machine, and which playback
//! [`Command`] (if any) it triggers. It owns the scrub-track hover preview
//! and the volume popover hover flag; everything else is the controller's.

use crate::config::{
    KeyboardCapture, INTRO_WINDOW_END_SECS, INTRO_WINDOW_START_SECS, SKIP_STEP_SECS,
};

// =============================================================================
// Scrub track geometry
// =============================================================================

/// Horizontal extent of the scrub track in pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGeometry {
    pub left: f64,
    pub width: f64,
}

impl TrackGeometry {
    #[must_use]
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Position of `pointer_x` along the track, clamped to `[0, 1]`.
    ///
    /// A collapsed track (zero or negative width) maps everything to 0.
    #[must_use]
    pub fn fraction_at(&self, pointer_x: f64) -> f64 {
        if self.width <= 0.0 || !self.width.is_finite() {
            return 0.0;
        }
        let fraction = (pointer_x - self.left) / self.width;
        if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        }
    }
}

/// Time tooltip shown while hovering the scrub track.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HoverPreview {
    pub time_secs: Option<f64>,
    pub pixel_offset: Option<f64>,
}

impl HoverPreview {
    pub fn update(&mut self, pointer_x: f64, track: TrackGeometry, duration_secs: f64) {
        self.time_secs = Some(track.fraction_at(pointer_x) * duration_secs);
        self.pixel_offset = Some(pointer_x - track.left);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.time_secs.is_some()
    }
}

// =============================================================================
// Raw input
// =============================================================================

/// Keys the table cares about, plus everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Space,
    Enter,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    /// A printable key, lowercased.
    Char(char),
    Other(String),
}

impl Key {
    /// Parses a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            " " | "Spacebar" => Self::Space,
            "Enter" => Self::Enter,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c.to_ascii_lowercase()),
                    _ => Self::Other(key.to_string()),
                }
            }
        }
    }
}

/// Which part of the player holds keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTarget {
    /// Focus is elsewhere on the page.
    #[default]
    Outside,
    Player,
    ProgressTrack,
    StartOverlay,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub focus: FocusTarget,
}

impl KeyInput {
    #[must_use]
    pub fn new(key: Key, focus: FocusTarget) -> Self {
        Self { key, focus }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved anywhere over the player.
    Moved,
    /// Pointer left the player bounds.
    Left,
    TouchStart,
    VideoClicked,
    VideoDoubleClicked,
    /// Click on the bare container, outside any control.
    ContainerClicked,
    TrackClicked { x: f64, track: TrackGeometry },
    TrackHovered { x: f64, track: TrackGeometry },
    TrackLeft,
    /// Pointer entered (`true`) or left the volume control.
    VolumeHover(bool),
}

// =============================================================================
// Routing result
// =============================================================================

/// Playback commands produced by input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    TogglePlay,
    ToggleFullscreen,
    ToggleMute,
    /// Relative seek in seconds.
    Skip(f64),
    /// Absolute seek in seconds.
    SeekTo(f64),
    /// One volume step up or down.
    VolumeStep { up: bool },
}

/// How the input affects control visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activity {
    #[default]
    None,
    /// Reveal the controls and restart the idle countdown.
    Interacted,
    /// Pointer left; shorten the countdown.
    PointerLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dispatch {
    pub activity: Activity,
    pub command: Option<Command>,
    /// The host should suppress the key's default action (scrolling, etc.).
    pub prevent_default: bool,
}

impl Dispatch {
    const IGNORED: Self = Self {
        activity: Activity::None,
        command: None,
        prevent_default: false,
    };

    fn activity(activity: Activity) -> Self {
        Self {
            activity,
            ..Self::IGNORED
        }
    }

    fn interacted(command: Command) -> Self {
        Self {
            activity: Activity::Interacted,
            command: Some(command),
            prevent_default: false,
        }
    }
}

/// Whether the "skip intro" button is offered at `current_secs`.
#[must_use]
pub fn skip_intro_offered(current_secs: f64) -> bool {
    current_secs > INTRO_WINDOW_START_SECS && current_secs < INTRO_WINDOW_END_SECS
}

// =============================================================================
// Dispatcher
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct InputDispatcher {
    capture: KeyboardCapture,
    hover: HoverPreview,
    volume_popover_open: bool,
}

impl InputDispatcher {
    #[must_use]
    pub fn new(capture: KeyboardCapture) -> Self {
        Self {
            capture,
            ..Self::default()
        }
    }

    /// Routes a key press.
    ///
    /// Any key that reaches the player counts as activity; only keys in the
    /// table suppress their default action.
    #[must_use]
    pub fn key(&self, input: &KeyInput) -> Dispatch {
        if self.capture == KeyboardCapture::Focused && input.focus == FocusTarget::Outside {
            return Dispatch::IGNORED;
        }

        let command = match (&input.key, input.focus) {
            (Key::Enter | Key::Space, FocusTarget::StartOverlay) => Some(Command::TogglePlay),
            (Key::Space | Key::Char('k'), _) => Some(Command::TogglePlay),
            (Key::Char('f'), _) => Some(Command::ToggleFullscreen),
            (Key::Char('m'), _) => Some(Command::ToggleMute),
            (Key::ArrowLeft, _) => Some(Command::Skip(-SKIP_STEP_SECS)),
            (Key::ArrowRight, _) => Some(Command::Skip(SKIP_STEP_SECS)),
            (Key::ArrowUp, _) => Some(Command::VolumeStep { up: true }),
            (Key::ArrowDown, _) => Some(Command::VolumeStep { up: false }),
            _ => None,
        };

        Dispatch {
            activity: Activity::Interacted,
            command,
            prevent_default: command.is_some(),
        }
    }

    /// Routes a pointer or touch event.
    pub fn pointer(
        &mut self,
        event: PointerEvent,
        controls_visible: bool,
        duration_secs: f64,
    ) -> Dispatch {
        match event {
            PointerEvent::Moved | PointerEvent::TouchStart => {
                Dispatch::activity(Activity::Interacted)
            }
            PointerEvent::Left => Dispatch::activity(Activity::PointerLeft),
            PointerEvent::VideoClicked => {
                // First tap on hidden controls only brings them back
                if controls_visible {
                    Dispatch::interacted(Command::TogglePlay)
                } else {
                    Dispatch::activity(Activity::Interacted)
                }
            }
            PointerEvent::VideoDoubleClicked => Dispatch::interacted(Command::ToggleFullscreen),
            PointerEvent::ContainerClicked => {
                if controls_visible {
                    Dispatch::IGNORED
                } else {
                    Dispatch::activity(Activity::Interacted)
                }
            }
            PointerEvent::TrackClicked { x, track } => {
                Dispatch::interacted(Command::SeekTo(track.fraction_at(x) * duration_secs))
            }
            PointerEvent::TrackHovered { x, track } => {
                self.hover.update(x, track, duration_secs);
                Dispatch::activity(Activity::Interacted)
            }
            PointerEvent::TrackLeft => {
                self.hover.clear();
                Dispatch::IGNORED
            }
            PointerEvent::VolumeHover(open) => {
                self.volume_popover_open = open;
                Dispatch::IGNORED
            }
        }
    }

    #[must_use]
    pub fn hover(&self) -> &HoverPreview {
        &self.hover
    }

    #[must_use]
    pub fn volume_popover_open(&self) -> bool {
        self.volume_popover_open
    }

    #[must_use]
    pub fn capture(&self) -> KeyboardCapture {
        self.capture
    }

    /// Drops transient pointer state, e.g. when the source changes.
    pub fn reset(&mut self) {
        self.hover.clear();
        self.volume_popover_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn track() -> TrackGeometry {
        TrackGeometry::new(100.0, 400.0)
    }

    fn key(dom: &str, focus: FocusTarget) -> KeyInput {
        KeyInput::new(Key::from_dom_key(dom), focus)
    }

    #[test]
    fn fraction_is_clamped_to_track() {
        assert_eq!(track().fraction_at(100.0), 0.0);
        assert_eq!(track().fraction_at(300.0), 0.5);
        assert_eq!(track().fraction_at(500.0), 1.0);
        assert_eq!(track().fraction_at(20.0), 0.0);
        assert_eq!(track().fraction_at(900.0), 1.0);
    }

    #[test]
    fn collapsed_track_maps_to_start() {
        assert_eq!(TrackGeometry::new(0.0, 0.0).fraction_at(50.0), 0.0);
        assert_eq!(TrackGeometry::new(0.0, -10.0).fraction_at(50.0), 0.0);
        assert_eq!(track().fraction_at(f64::NAN), 0.0);
    }

    #[test]
    fn track_click_seeks_proportionally() {
        let mut input = InputDispatcher::default();
        let dispatch = input.pointer(
            PointerEvent::TrackClicked { x: 200.0, track: track() },
            true,
            120.0,
        );
        assert_eq!(dispatch.command, Some(Command::SeekTo(30.0)));
        assert_eq!(dispatch.activity, Activity::Interacted);
    }

    #[test]
    fn hover_preview_follows_pointer_and_clears_on_leave() {
        let mut input = InputDispatcher::default();
        input.pointer(PointerEvent::TrackHovered { x: 400.0, track: track() }, true, 200.0);
        assert_abs_diff_eq!(input.hover().time_secs.unwrap_or_default(), 150.0);
        assert_eq!(input.hover().pixel_offset, Some(300.0));

        // Offset is not clamped; the time is
        input.pointer(PointerEvent::TrackHovered { x: 600.0, track: track() }, true, 200.0);
        assert_eq!(input.hover().time_secs, Some(200.0));
        assert_eq!(input.hover().pixel_offset, Some(500.0));

        input.pointer(PointerEvent::TrackLeft, true, 200.0);
        assert!(!input.hover().is_active());
        assert_eq!(input.hover().pixel_offset, None);
    }

    #[test]
    fn video_click_reveals_hidden_controls_without_toggling() {
        let mut input = InputDispatcher::default();
        let hidden = input.pointer(PointerEvent::VideoClicked, false, 60.0);
        assert_eq!(hidden.command, None);
        assert_eq!(hidden.activity, Activity::Interacted);

        let visible = input.pointer(PointerEvent::VideoClicked, true, 60.0);
        assert_eq!(visible.command, Some(Command::TogglePlay));
    }

    #[test]
    fn container_click_only_reveals() {
        let mut input = InputDispatcher::default();
        assert_eq!(
            input.pointer(PointerEvent::ContainerClicked, false, 60.0).activity,
            Activity::Interacted
        );
        assert_eq!(
            input.pointer(PointerEvent::ContainerClicked, true, 60.0),
            Dispatch::default()
        );
    }

    #[test]
    fn double_click_toggles_fullscreen() {
        let mut input = InputDispatcher::default();
        let dispatch = input.pointer(PointerEvent::VideoDoubleClicked, true, 60.0);
        assert_eq!(dispatch.command, Some(Command::ToggleFullscreen));
    }

    #[test]
    fn pointer_leave_and_volume_hover() {
        let mut input = InputDispatcher::default();
        assert_eq!(
            input.pointer(PointerEvent::Left, true, 60.0).activity,
            Activity::PointerLeft
        );
        input.pointer(PointerEvent::VolumeHover(true), true, 60.0);
        assert!(input.volume_popover_open());
        input.pointer(PointerEvent::VolumeHover(false), true, 60.0);
        assert!(!input.volume_popover_open());
    }

    #[test]
    fn key_table() {
        let input = InputDispatcher::new(KeyboardCapture::Global);
        let cases = [
            (" ", Some(Command::TogglePlay)),
            ("k", Some(Command::TogglePlay)),
            ("K", Some(Command::TogglePlay)),
            ("f", Some(Command::ToggleFullscreen)),
            ("m", Some(Command::ToggleMute)),
            ("ArrowLeft", Some(Command::Skip(-10.0))),
            ("ArrowRight", Some(Command::Skip(10.0))),
            ("ArrowUp", Some(Command::VolumeStep { up: true })),
            ("ArrowDown", Some(Command::VolumeStep { up: false })),
            ("x", None),
            ("Escape", None),
        ];
        for (dom, expected) in cases {
            let dispatch = input.key(&key(dom, FocusTarget::Outside));
            assert_eq!(dispatch.command, expected, "key {:?}", dom);
            assert_eq!(dispatch.prevent_default, expected.is_some(), "key {:?}", dom);
            assert_eq!(dispatch.activity, Activity::Interacted, "key {:?}", dom);
        }
    }

    #[test]
    fn focused_capture_ignores_keys_outside_player() {
        let input = InputDispatcher::new(KeyboardCapture::Focused);
        assert_eq!(input.key(&key(" ", FocusTarget::Outside)), Dispatch::default());
        assert_eq!(
            input.key(&key(" ", FocusTarget::Player)).command,
            Some(Command::TogglePlay)
        );
    }

    #[test]
    fn enter_on_start_overlay_plays() {
        let input = InputDispatcher::new(KeyboardCapture::Focused);
        assert_eq!(
            input.key(&key("Enter", FocusTarget::StartOverlay)).command,
            Some(Command::TogglePlay)
        );
        assert_eq!(input.key(&key("Enter", FocusTarget::Player)).command, None);
    }

    #[test]
    fn progress_track_arrows_skip_once() {
        let input = InputDispatcher::new(KeyboardCapture::Focused);
        let dispatch = input.key(&key("ArrowLeft", FocusTarget::ProgressTrack));
        assert_eq!(dispatch.command, Some(Command::Skip(-10.0)));
    }

    #[test]
    fn skip_intro_window_is_exclusive() {
        assert!(!skip_intro_offered(5.0));
        assert!(skip_intro_offered(5.01));
        assert!(skip_intro_offered(10.0));
        assert!(skip_intro_offered(29.9));
        assert!(!skip_intro_offered(30.0));
        assert!(!skip_intro_offered(0.0));
    }

    #[test]
    fn reset_clears_transient_state() {
        let mut input = InputDispatcher::default();
        input.pointer(PointerEvent::TrackHovered { x: 150.0, track: track() }, true, 60.0);
        input.pointer(PointerEvent::VolumeHover(true), true, 60.0);
        input.reset();
        assert!(!input.hover().is_active());
        assert!(!input.volume_popover_open());
    }
}
