// SPDX-License-Identifier: MPL-2.0
//! `catalog-player`: plays one catalog record through the controller.
//!
//! The media surface here only logs what it is told, so the binary is a
//! scripted walk through a playback session: load, play, let the controls
//! hide, then unmount and store preferences when configured to.

use catalog_player::catalog::CatalogEntry;
use catalog_player::config::{self, paths};
use catalog_player::error::PlaybackError;
use catalog_player::i18n::I18n;
use catalog_player::logging;
use catalog_player::player::driver;
use catalog_player::player::{
    Effect, FocusTarget, Key, KeyInput, MediaSurface, Message, NativeOnly, NoPresentation,
    PlayerController, PlayerProps, SurfaceEvent,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

const HELP: &str = "\
catalog-player

USAGE:
  catalog-player [OPTIONS] <ENTRY.json>

OPTIONS:
  --lang <LOCALE>        UI language (en-US, pt-BR)
  --config-dir <DIR>     directory holding settings.toml
  --duration <SECS>      length of the simulated title [default: 8]
  -v, --verbose          debug logging
  -h, --help             print this help
";

const DEFAULT_DURATION_SECS: u32 = 8;

struct Args {
    lang: Option<String>,
    config_dir: Option<String>,
    duration_secs: u32,
    verbose: bool,
    entry: PathBuf,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let parsed = Args {
        lang: args.opt_value_from_str("--lang")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        duration_secs: args
            .opt_value_from_str("--duration")?
            .unwrap_or(DEFAULT_DURATION_SECS),
        verbose: args.contains(["-v", "--verbose"]),
        entry: args.free_from_str()?,
    };
    Ok(Some(parsed))
}

/// Surface that logs every command instead of decoding anything.
#[derive(Debug, Default)]
struct TracingSurface;

impl MediaSurface for TracingSurface {
    fn play(&mut self) -> Result<(), PlaybackError> {
        tracing::debug!("surface: play");
        Ok(())
    }

    fn pause(&mut self) {
        tracing::debug!("surface: pause");
    }

    fn set_current_time(&mut self, secs: f64) {
        tracing::debug!(secs, "surface: seek");
    }

    fn set_volume(&mut self, volume: f32) {
        tracing::debug!(volume, "surface: volume");
    }

    fn set_playback_rate(&mut self, rate: f64) {
        tracing::debug!(rate, "surface: playback rate");
    }

    fn load_native(&mut self, source: &str) {
        tracing::debug!(source, "surface: load");
    }

    fn clear_source(&mut self) {
        tracing::debug!("surface: clear");
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    paths::init_cli_override(args.config_dir);
    logging::init(logging::level_for(args.verbose));

    let (mut config, warning) = config::load();
    let i18n = I18n::new(args.lang, &config);
    if let Some(key) = warning {
        tracing::warn!("{}", i18n.tr(&key));
    }

    let entry = match CatalogEntry::load_from_path(&args.entry) {
        Ok(entry) => entry,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let settings = config.player_settings();
    let props = PlayerProps::from_catalog(&entry, &i18n, &settings);
    let controller = PlayerController::mount(
        props,
        settings,
        TracingSurface,
        NativeOnly,
        NoPresentation,
        Instant::now().into_std(),
    );

    let view = controller.view(&i18n);
    println!("{}", view.title);
    if let Some(subtitle) = &view.subtitle {
        println!("{subtitle}");
    }
    if view.poster_only {
        println!("{}", i18n.tr(PlaybackError::MissingSource.i18n_key()));
        return ExitCode::SUCCESS;
    }

    let duration_secs = args.duration_secs;
    let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
    let (effects_tx, mut effects_rx) = mpsc::unbounded_channel();

    let script = async move {
        let send = |msg: Message| {
            if inbox_tx.send(msg).is_err() {
                tracing::debug!("player already stopped");
            }
        };
        let now = || Instant::now().into_std();

        send(Message::Surface {
            event: SurfaceEvent::MetadataLoaded {
                duration_secs: f64::from(duration_secs),
            },
            now: now(),
        });
        send(Message::Surface {
            event: SurfaceEvent::CanPlay,
            now: now(),
        });
        send(Message::Key {
            input: KeyInput::new(Key::Space, FocusTarget::Player),
            now: now(),
        });
        for secs in 1..=duration_secs {
            tokio::time::sleep(Duration::from_secs(1)).await;
            send(Message::Surface {
                event: SurfaceEvent::TimeUpdate {
                    current_secs: f64::from(secs),
                },
                now: now(),
            });
        }
        send(Message::Surface {
            event: SurfaceEvent::Ended,
            now: now(),
        });
        send(Message::Unmount);
    };

    let report = async {
        while let Some(effect) = effects_rx.recv().await {
            match effect {
                Effect::VisibilityChanged(true) => println!("controls shown"),
                Effect::VisibilityChanged(false) => println!("controls hidden"),
                Effect::Unmounted(_) => println!("stopped"),
                other => tracing::debug!(effect = ?other, "player effect"),
            }
        }
    };

    let (prefs, (), ()) = tokio::join!(driver::run(controller, inbox_rx, effects_tx), script, report);

    if let Some(prefs) = prefs {
        if config.remember(&prefs) {
            if let Err(err) = config::save(&config) {
                tracing::warn!(error = %err, "could not save playback preferences");
            }
        }
    }
    ExitCode::SUCCESS
}
