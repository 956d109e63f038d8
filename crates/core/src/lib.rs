//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **no dependencies** on rendering, terminals or the host boundary, making it:
//!
//! - **Deterministic**: Same seed and input sequence produce identical games
//! - **Testable**: Unit tests for every rule
//! - **Fixed-size**: The snake body and particle pool never reallocate during play
//!
//! # Module Structure
//!
//! - [`grid`]: 40x30 obstacle lattice and layout generation
//! - [`snake`]: Body, heading and the pending-heading reversal guard
//! - [`particles`]: Fixed pool of decorative burst particles
//! - [`game_state`]: Mode state machine, frame loop and simulation step
//! - [`rng`]: Deterministic LCG used for every random draw
//! - [`savestate`]: Fixed-size save block serialization
//!
//! # Game Rules
//!
//! - **Movement**: The snake steps one cell every 8 frames (4 with the speed effect)
//! - **Food**: Eating grows the snake by one and awards 10 points
//! - **Power-ups**: Phase lets the snake wrap through the edge and cross itself;
//!   speed halves the move interval. Each lasts 300 frames.
//! - **Death**: Wall (without phase), own body (without phase) or any obstacle
//!
//! # Example
//!
//! ```
//! use snek_core::GameState;
//! use snek_types::{GameMode, InputState};
//!
//! let mut game = GameState::new(12345);
//! assert_eq!(game.mode(), GameMode::Title);
//!
//! game.run_frame(InputState::start());
//! assert_eq!(game.mode(), GameMode::Playing);
//! ```

pub mod game_state;
pub mod grid;
pub mod particles;
pub mod rng;
pub mod savestate;
pub mod snake;

pub use snek_types as types;

// Re-export commonly used types for convenience
pub use game_state::{Collision, GameState, PlacementError, PowerUp, StepEvent};
pub use grid::Grid;
pub use particles::{Particle, ParticlePool};
pub use rng::SimpleRng;
pub use savestate::{SaveStateError, SAVE_STATE_SIZE};
pub use snake::Snake;
