//! Terminal snake player (default binary).
//!
//! Drives the host [`Core`] at 60 Hz: crossterm key events are latched into a
//! joypad sample each frame, and the 640x480 frame is downsampled to
//! half-block cells for the terminal.

use std::env;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::LevelFilter;

use snek::host::Core;
use snek::input::{should_quit, InputLatch};
use snek::term::{CellBuffer, ScreenView, TerminalPresenter, Viewport, DEFAULT_SCALE};
use snek::types::FPS;

/// Runtime options, read from the environment.
#[derive(Debug, Clone)]
struct PlayerConfig {
    seed: u32,
    scale: u16,
    log_path: Option<PathBuf>,
    log_level: LevelFilter,
    print_info: bool,
}

impl PlayerConfig {
    fn from_env() -> Self {
        let seed = env::var("SNEK_SEED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(clock_seed);
        let scale = env::var("SNEK_SCALE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SCALE);
        let log_path = env::var_os("SNEK_LOG_PATH").map(PathBuf::from);
        let log_level = env::var("SNEK_LOG_LEVEL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(LevelFilter::Info);
        let print_info = env::var("SNEK_INFO").map(|v| v == "1").unwrap_or(false);

        Self {
            seed,
            scale,
            log_path,
            log_level,
            print_info,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

/// Appends log lines to a file; the terminal is in raw mode while playing.
struct FileLogger {
    file: Mutex<File>,
    level: LevelFilter,
}

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{:<5} {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

fn init_logging(config: &PlayerConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    log::set_boxed_logger(Box::new(FileLogger {
        file: Mutex::new(file),
        level: config.log_level,
    }))?;
    log::set_max_level(config.log_level);
    Ok(())
}

fn main() -> Result<()> {
    let config = PlayerConfig::from_env();

    if config.print_info {
        println!("{}", serde_json::to_string_pretty(&Core::info())?);
        return Ok(());
    }

    init_logging(&config)?;
    log::info!("[Main] seed {} scale {}", config.seed, config.scale);

    let mut term = TerminalPresenter::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    log::info!("[Main] exit");
    log::logger().flush();
    result
}

fn run(term: &mut TerminalPresenter, config: &PlayerConfig) -> Result<()> {
    let mut core = Core::new(config.seed);
    let view = ScreenView::new(config.scale);
    let mut latch = InputLatch::new();
    let mut cells = CellBuffer::new(0, 0);

    let frame_duration = Duration::from_secs_f64(1.0 / FPS);
    let mut next_frame = Instant::now();

    loop {
        // Input until the next frame is due.
        while event::poll(next_frame.saturating_duration_since(Instant::now()))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        return Ok(());
                    }
                    latch.handle_key(key, Instant::now());
                }
                Event::Resize(w, h) => {
                    log::debug!("[Main] resize {w}x{h}");
                    term.invalidate();
                }
                Event::FocusLost => latch.clear(),
                _ => {}
            }
        }

        // Drop missed frames after a stall.
        let now = Instant::now();
        next_frame = (next_frame + frame_duration).max(now);

        core.run_input(latch.sample(now));

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(core.framebuffer(), Viewport::new(w, h), &mut cells);
        term.present_swap(&mut cells)?;
    }
}
