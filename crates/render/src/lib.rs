//! Software renderer for the snake game.
//!
//! Draws a [`GameState`](snek_core::GameState) into a 640x480 packed
//! `0x00RRGGBB` pixel buffer. Everything is procedural: sprites are computed
//! per pixel from cell coordinates, so there are no image assets.
//!
//! Goals:
//! - Byte-for-byte reproducible frames for a given state
//! - No allocation on the per-frame path once a buffer exists

pub mod fb;
pub mod font;
pub mod game_view;
pub mod hud;
pub mod sprites;

pub use snek_core as core;
pub use snek_types as types;

pub use fb::FrameBuffer;
pub use game_view::{GameView, SnakePalette};
