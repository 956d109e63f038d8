//! Save-state serialization.
//!
//! Flattens a [`GameState`] into a fixed-size little-endian byte block and back.
//! The layout is only guaranteed to be self-consistent within one build:
//!
//! | Field | Encoding |
//! |-------|----------|
//! | magic | `b"SNK1"` |
//! | snake x, then snake y | `SNAKE_CAPACITY` × `i32` each (unused slots zero) |
//! | length, heading, pending heading | `u32` |
//! | food x, y | `i32` |
//! | power-up kind (0 = none), x, y | `u32`, `i32`, `i32` |
//! | phase timer, speed timer | `u32` |
//! | score, high score | `u32` |
//! | mode | `u32` |
//! | move counter | `i32` |
//! | frame counter | `u64` |
//! | RNG state | `u32` |
//! | obstacle mask | bitset, `GRID_BITSET_LEN` bytes |
//!
//! Particles are not saved; a restore clears them.

use thiserror::Error;

use snek_types::{
    Cell, Direction, GameMode, PowerUpKind, BASE_MOVE_INTERVAL, INITIAL_SNAKE_LENGTH, SNAKE_CAPACITY,
};

use crate::game_state::{GameState, PowerUp};
use crate::grid::{Grid, GRID_BITSET_LEN};

pub const SAVE_MAGIC: [u8; 4] = *b"SNK1";

/// Size in bytes of every save block produced by this build.
pub const SAVE_STATE_SIZE: usize =
    SAVE_MAGIC.len() + SNAKE_CAPACITY * 4 * 2 + 15 * 4 + 8 + GRID_BITSET_LEN;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveStateError {
    #[error("save buffer too small: need {expected} bytes, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },
    #[error("save block has an unknown magic")]
    BadMagic,
    #[error("invalid heading code {0}")]
    InvalidHeading(u32),
    #[error("invalid game mode code {0}")]
    InvalidMode(u32),
    #[error("invalid power-up code {0}")]
    InvalidPowerUp(u32),
    #[error("snake length {0} out of range")]
    LengthOutOfRange(u32),
    #[error("cell ({x}, {y}) is off the grid")]
    CellOutOfRange { x: i32, y: i32 },
    #[error("move countdown {0} out of range")]
    MoveCounterOutOfRange(i32),
}

struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl Writer<'_> {
    fn bytes(&mut self, b: &[u8]) {
        self.buf[self.pos..self.pos + b.len()].copy_from_slice(b);
        self.pos += b.len();
    }

    fn u32(&mut self, v: u32) {
        self.bytes(&v.to_le_bytes());
    }

    fn i32(&mut self, v: i32) {
        self.bytes(&v.to_le_bytes());
    }

    fn u64(&mut self, v: u64) {
        self.bytes(&v.to_le_bytes());
    }
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn bytes(&mut self, n: usize) -> &'a [u8] {
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        out
    }

    fn u32(&mut self) -> u32 {
        let mut b = [0u8; 4];
        b.copy_from_slice(self.bytes(4));
        u32::from_le_bytes(b)
    }

    fn i32(&mut self) -> i32 {
        self.u32() as i32
    }

    fn u64(&mut self) -> u64 {
        let mut b = [0u8; 8];
        b.copy_from_slice(self.bytes(8));
        u64::from_le_bytes(b)
    }
}

fn checked_cell(x: i32, y: i32) -> Result<Cell, SaveStateError> {
    let cell = Cell::new(x, y);
    if cell.in_bounds() {
        Ok(cell)
    } else {
        Err(SaveStateError::CellOutOfRange { x, y })
    }
}

fn check_len(actual: usize) -> Result<(), SaveStateError> {
    if actual < SAVE_STATE_SIZE {
        return Err(SaveStateError::BufferTooSmall {
            expected: SAVE_STATE_SIZE,
            actual,
        });
    }
    Ok(())
}

impl GameState {
    pub fn serialize_size() -> usize {
        SAVE_STATE_SIZE
    }

    /// Write the save block into the front of `out`; returns bytes written.
    pub fn serialize(&self, out: &mut [u8]) -> Result<usize, SaveStateError> {
        check_len(out.len())?;
        let mut w = Writer { buf: out, pos: 0 };

        w.bytes(&SAVE_MAGIC);
        let segments = self.snake.segments();
        for i in 0..SNAKE_CAPACITY {
            w.i32(segments.get(i).map(|c| c.x).unwrap_or(0));
        }
        for i in 0..SNAKE_CAPACITY {
            w.i32(segments.get(i).map(|c| c.y).unwrap_or(0));
        }
        w.u32(segments.len() as u32);
        w.u32(self.snake.heading().code());
        w.u32(self.snake.pending().code());
        w.i32(self.food.x);
        w.i32(self.food.y);
        match self.power_up {
            Some(p) => {
                w.u32(p.kind.code());
                w.i32(p.cell.x);
                w.i32(p.cell.y);
            }
            None => {
                w.u32(0);
                w.i32(0);
                w.i32(0);
            }
        }
        w.u32(self.phase_timer);
        w.u32(self.speed_timer);
        w.u32(self.score);
        w.u32(self.high_score);
        w.u32(self.mode.code());
        w.i32(self.move_counter);
        w.u64(self.frame_count);
        w.u32(self.rng.state());

        let mut bits = [0u8; GRID_BITSET_LEN];
        self.grid.write_bits(&mut bits);
        w.bytes(&bits);

        debug_assert_eq!(w.pos, SAVE_STATE_SIZE);
        Ok(w.pos)
    }

    /// Restore from a save block.
    ///
    /// The whole block is validated before anything is written, so on error the
    /// state is unchanged.
    pub fn deserialize(&mut self, data: &[u8]) -> Result<(), SaveStateError> {
        check_len(data.len())?;
        let mut r = Reader { buf: data, pos: 0 };

        if r.bytes(SAVE_MAGIC.len()) != SAVE_MAGIC {
            return Err(SaveStateError::BadMagic);
        }

        let xs = r.bytes(SNAKE_CAPACITY * 4);
        let ys = r.bytes(SNAKE_CAPACITY * 4);
        let len = r.u32();
        if (len as usize) < INITIAL_SNAKE_LENGTH || len as usize > SNAKE_CAPACITY {
            return Err(SaveStateError::LengthOutOfRange(len));
        }
        let mut body = Vec::with_capacity(len as usize);
        for i in 0..len as usize {
            let mut xb = Reader { buf: xs, pos: i * 4 };
            let mut yb = Reader { buf: ys, pos: i * 4 };
            body.push(checked_cell(xb.i32(), yb.i32())?);
        }

        let heading_code = r.u32();
        let heading =
            Direction::from_code(heading_code).ok_or(SaveStateError::InvalidHeading(heading_code))?;
        let pending_code = r.u32();
        let pending =
            Direction::from_code(pending_code).ok_or(SaveStateError::InvalidHeading(pending_code))?;

        let food = checked_cell(r.i32(), r.i32())?;

        let kind_code = r.u32();
        let kind = PowerUpKind::from_code(kind_code).ok_or(SaveStateError::InvalidPowerUp(kind_code))?;
        let (px, py) = (r.i32(), r.i32());
        let power_up = match kind {
            Some(kind) => Some(PowerUp {
                kind,
                cell: checked_cell(px, py)?,
            }),
            None => None,
        };

        let phase_timer = r.u32();
        let speed_timer = r.u32();
        let score = r.u32();
        let high_score = r.u32();
        let mode_code = r.u32();
        let mode = GameMode::from_code(mode_code).ok_or(SaveStateError::InvalidMode(mode_code))?;
        let move_counter = r.i32();
        if !(1..=BASE_MOVE_INTERVAL).contains(&move_counter) {
            return Err(SaveStateError::MoveCounterOutOfRange(move_counter));
        }
        let frame_count = r.u64();
        let rng_state = r.u32();
        let grid = Grid::from_bits(r.bytes(GRID_BITSET_LEN));

        // Commit.
        self.snake.restore(&body, heading, pending);
        self.food = food;
        self.power_up = power_up;
        self.phase_timer = phase_timer;
        self.speed_timer = speed_timer;
        self.score = score;
        self.high_score = high_score;
        self.mode = mode;
        self.move_counter = move_counter;
        self.frame_count = frame_count;
        self.rng.set_state(rng_state);
        self.grid = grid;
        self.particles.clear();

        log::debug!("restored save block at frame {}", frame_count);
        Ok(())
    }
}
