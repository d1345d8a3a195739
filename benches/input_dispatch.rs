// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for the per-event hot path.
//!
//! Measures the performance of:
//! - Key routing through the dispatcher
//! - Pointer hover over the scrub track (runs on every mouse move)
//! - Building the render snapshot after a state change

use catalog_player::config::{KeyboardCapture, PlayerSettings};
use catalog_player::error::PlaybackError;
use catalog_player::i18n::I18n;
use catalog_player::player::input::InputDispatcher;
use catalog_player::player::{
    FocusTarget, Key, KeyInput, MediaSurface, Message, NativeOnly, NoPresentation,
    PlayerController, PlayerProps, PointerEvent, SurfaceEvent, TrackGeometry,
};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::time::Instant;

struct NullSurface;

impl MediaSurface for NullSurface {
    fn play(&mut self) -> Result<(), PlaybackError> {
        Ok(())
    }
    fn pause(&mut self) {}
    fn set_current_time(&mut self, _secs: f64) {}
    fn set_volume(&mut self, _volume: f32) {}
    fn set_playback_rate(&mut self, _rate: f64) {}
    fn load_native(&mut self, _source: &str) {}
    fn clear_source(&mut self) {}
}

fn bench_key_routing(c: &mut Criterion) {
    let mut group = c.benchmark_group("input_dispatch");
    let dispatcher = InputDispatcher::new(KeyboardCapture::Global);
    let keys: Vec<KeyInput> = [" ", "k", "f", "ArrowLeft", "ArrowUp", "x", "Escape"]
        .iter()
        .map(|dom| KeyInput::new(Key::from_dom_key(dom), FocusTarget::Player))
        .collect();

    group.bench_function("key_table", |b| {
        b.iter(|| {
            for input in &keys {
                black_box(dispatcher.key(black_box(input)));
            }
        });
    });

    group.finish();
}

fn bench_track_hover(c: &mut Criterion) {
    let mut group = c.benchmark_group("input_dispatch");
    let mut dispatcher = InputDispatcher::new(KeyboardCapture::Global);
    let track = TrackGeometry::new(24.0, 1200.0);

    group.bench_function("track_hover", |b| {
        let mut x = 0.0;
        b.iter(|| {
            x = (x + 7.0) % 1300.0;
            black_box(dispatcher.pointer(
                PointerEvent::TrackHovered { x, track },
                true,
                black_box(5400.0),
            ));
        });
    });

    group.finish();
}

fn bench_view_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("input_dispatch");
    let i18n = I18n::default();
    let now = Instant::now();
    let mut controller = PlayerController::mount(
        PlayerProps::new("movie.mp4"),
        PlayerSettings::default(),
        NullSurface,
        NativeOnly,
        NoPresentation,
        now,
    );
    controller.handle(Message::Surface {
        event: SurfaceEvent::MetadataLoaded { duration_secs: 5400.0 },
        now,
    });

    group.bench_function("controls_view", |b| {
        b.iter(|| black_box(controller.view(&i18n)));
    });

    group.finish();
}

criterion_group!(benches, bench_key_routing, bench_track_hover, bench_view_snapshot);
criterion_main!(benches);
