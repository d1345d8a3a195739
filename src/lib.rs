// SPDX-License-Identifier: MPL-2.0
//! `catalog_player` is the playback controller behind a streaming catalog's
//! video page.
//!
//! It mirrors a host media surface, attaches adaptive streams, and drives
//! the custom control chrome (auto-hiding controls, keyboard shortcuts,
//! scrubbing, speed menu, fullscreen and picture-in-picture). Labels are
//! localised with Fluent and user preferences live in a TOML file.

#![doc(html_root_url = "https://docs.rs/catalog_player/0.1.0")]

pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod player;

#[cfg(test)]
mod test_utils;
