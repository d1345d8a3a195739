// SPDX-License-Identifier: MPL-2.0
//! Settings popover with its nested speed submenu.
//!
//! A single enum keeps "submenu open while the main menu is closed"
//! unrepresentable.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsMenu {
    #[default]
    Closed,
    /// Main settings list open.
    Main,
    /// Main list open with the speed options expanded.
    Speed,
}

impl SettingsMenu {
    /// Settings button: opens the main list, or closes everything.
    pub fn toggle_main(&mut self) {
        *self = match *self {
            Self::Closed => Self::Main,
            Self::Main | Self::Speed => Self::Closed,
        };
    }

    /// Speed row inside the main list. Ignored while closed.
    pub fn toggle_speed_submenu(&mut self) {
        *self = match *self {
            Self::Closed => Self::Closed,
            Self::Main => Self::Speed,
            Self::Speed => Self::Main,
        };
    }

    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    #[must_use]
    pub fn is_main_open(self) -> bool {
        self != Self::Closed
    }

    #[must_use]
    pub fn is_speed_open(self) -> bool {
        self == Self::Speed
    }
}
