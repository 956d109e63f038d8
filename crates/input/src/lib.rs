//! Terminal input module.
//!
//! Maps `crossterm` key events onto the six joypad buttons and latches them
//! into the per-frame [`InputState`](snek_types::InputState) the core samples.
//! Many terminals never report key releases, so a held button also expires
//! after a short timeout without a fresh press or repeat.

pub mod latch;
pub mod map;

pub use snek_types as types;

pub use latch::InputLatch;
pub use map::{map_key, should_quit};
