// SPDX-License-Identifier: MPL-2.0
//! Tracing subscriber setup.
//!
//! Logs go to stderr so the CLI can keep stdout for its own output.
//! `RUST_LOG` takes precedence over the level passed to [`init`].

use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// Installs the global `fmt` subscriber.
///
/// Returns `false` if a subscriber was already installed (tests, embedding
/// hosts); the existing one is kept.
pub fn init(default_level: LevelFilter) -> bool {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}

/// Maps the CLI verbosity flag to a default level.
#[must_use]
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_keeps_first_subscriber() {
        let _ = init(LevelFilter::WARN);
        assert!(!init(LevelFilter::DEBUG));
    }

    #[test]
    fn verbose_flag_selects_debug() {
        assert_eq!(level_for(true), LevelFilter::DEBUG);
        assert_eq!(level_for(false), LevelFilter::INFO);
    }
}
