// SPDX-License-Identifier: MPL-2.0
//! Controls visibility sub-component.
//!
//! Controls stay up while paused. While playing they hide 3 s after the
//! last activity, or 1 s after the pointer leaves the player.

use super::hide_timer::HideTimer;
use crate::config::{HIDE_AFTER_ACTIVITY_MS, HIDE_AFTER_POINTER_LEAVE_MS};
use std::time::{Duration, Instant};

const HIDE_AFTER_ACTIVITY: Duration = Duration::from_millis(HIDE_AFTER_ACTIVITY_MS);
const HIDE_AFTER_POINTER_LEAVE: Duration = Duration::from_millis(HIDE_AFTER_POINTER_LEAVE_MS);

/// Where the machine currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Shown with no countdown (paused, or just interacted while paused).
    ActiveVisible,
    /// Shown, hiding at `deadline` unless something resets it.
    ScheduledHide { deadline: Instant },
    Hidden,
}

/// Visibility state for the control chrome.
#[derive(Debug, Clone)]
pub struct State {
    visible: bool,
    timer: HideTimer,
}

impl Default for State {
    fn default() -> Self {
        Self {
            visible: true,
            timer: HideTimer::new(),
        }
    }
}

/// Messages for the visibility sub-component.
#[derive(Debug, Clone, Copy)]
pub enum Message {
    /// Pointer move, touch start, key press or click on the player.
    Activity { now: Instant, playing: bool },
    /// Pointer left the player bounds.
    PointerLeft { now: Instant, playing: bool },
    /// Playback stopped.
    Paused,
    /// Playback started.
    Played { now: Instant },
    /// Time has advanced; hides if the deadline is reached.
    Tick { now: Instant },
    /// Player is going away.
    Teardown,
}

/// Effects produced by visibility changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    VisibilityChanged(bool),
}

impl State {
    /// Handle a visibility message.
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Activity { now, playing } => {
                if playing {
                    self.timer.arm(now, HIDE_AFTER_ACTIVITY);
                } else {
                    self.timer.cancel();
                }
                self.show()
            }
            Message::PointerLeft { now, playing } => {
                if playing {
                    self.timer.arm(now, HIDE_AFTER_POINTER_LEAVE);
                }
                Effect::None
            }
            Message::Paused => {
                self.timer.cancel();
                self.show()
            }
            Message::Played { now } => {
                // A pending countdown from recent activity keeps its deadline
                if !self.timer.is_armed() {
                    self.timer.arm(now, HIDE_AFTER_ACTIVITY);
                }
                Effect::None
            }
            Message::Tick { now } => {
                if self.timer.fire(now) && self.visible {
                    self.visible = false;
                    tracing::debug!("controls hidden");
                    return Effect::VisibilityChanged(false);
                }
                Effect::None
            }
            Message::Teardown => {
                self.timer.cancel();
                Effect::None
            }
        }
    }

    fn show(&mut self) -> Effect {
        if self.visible {
            Effect::None
        } else {
            self.visible = true;
            Effect::VisibilityChanged(true)
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn visibility(&self) -> Visibility {
        match (self.visible, self.timer.deadline()) {
            (false, _) => Visibility::Hidden,
            (true, Some(deadline)) => Visibility::ScheduledHide { deadline },
            (true, None) => Visibility::ActiveVisible,
        }
    }

    /// When the next [`Message::Tick`] is due, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }
}
