//! Terminal presentation for the snake game.
//!
//! The game renders into a 640x480 pixel buffer; this crate squeezes that
//! buffer into half-block character cells and flushes it to a terminal.
//!
//! Goals:
//! - Keep rendering pure: [`ScreenView`] maps pixels to cells with no I/O
//! - Write only what changed between frames

pub mod cells;
pub mod game_view;
pub mod renderer;

pub use snek_render as render;
pub use snek_types as types;

pub use cells::{CellBuffer, CellStyle, TermCell};
pub use game_view::{ScreenView, Viewport, DEFAULT_SCALE, MAX_SCALE, MIN_SCALE};
pub use renderer::{encode_diff_into, encode_full_into, TerminalPresenter};
