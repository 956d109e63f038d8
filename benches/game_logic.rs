use criterion::{black_box, criterion_group, criterion_main, Criterion};
use snek::core::GameState;
use snek::host::Core;
use snek::render::{FrameBuffer, GameView};
use snek::term::{CellBuffer, ScreenView, Viewport};
use snek::types::{Cell, InputState};

/// Playing on an open field so the snake survives long benchmark runs.
fn open_field() -> GameState {
    let mut state = GameState::new(12345);
    state.run_frame(InputState::start());
    state.grid_mut().clear();
    state.set_phase_timer(u32::MAX);
    state.set_food(Cell::new(1, 1));
    state
}

fn bench_run_frame(c: &mut Criterion) {
    let mut state = open_field();

    c.bench_function("run_frame", |b| {
        b.iter(|| {
            state.run_frame(black_box(InputState::NONE));
        })
    });
}

fn bench_step(c: &mut Criterion) {
    let mut state = open_field();

    c.bench_function("step", |b| {
        b.iter(|| {
            black_box(state.step());
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let state = open_field();
    let view = GameView::new();
    let mut fb = FrameBuffer::default();

    c.bench_function("render_640x480", |b| {
        b.iter(|| {
            view.render_into(black_box(&state), &mut fb);
        })
    });
}

fn bench_host_frame(c: &mut Criterion) {
    let mut core = Core::new(12345);

    c.bench_function("host_frame", |b| {
        b.iter(|| {
            let frame = core.run_input(black_box(InputState::NONE));
            black_box(frame.video.len());
        })
    });
}

fn bench_downsample(c: &mut Criterion) {
    let state = open_field();
    let fb = GameView::new().render(&state);
    let view = ScreenView::default();
    let viewport = Viewport::new(120, 40);
    let mut cells = CellBuffer::new(viewport.width, viewport.height);

    c.bench_function("terminal_downsample", |b| {
        b.iter(|| {
            view.render_into(black_box(&fb), viewport, &mut cells);
        })
    });
}

fn bench_save_state(c: &mut Criterion) {
    let state = open_field();
    let mut buf = vec![0u8; GameState::serialize_size()];

    c.bench_function("serialize", |b| {
        b.iter(|| {
            black_box(state.serialize(&mut buf).ok());
        })
    });
}

criterion_group!(
    benches,
    bench_run_frame,
    bench_step,
    bench_render,
    bench_host_frame,
    bench_downsample,
    bench_save_state
);
criterion_main!(benches);
