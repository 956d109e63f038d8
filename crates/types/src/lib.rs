//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no I/O, making them usable from the simulation,
//! the renderer and the host boundary alike.
//!
//! # Grid Dimensions
//!
//! The play field is fixed at build time:
//!
//! - **Width**: 40 columns (indexed 0-39)
//! - **Height**: 30 rows (indexed 0-29)
//! - **Cell size**: 16x16 pixels, giving a 640x480 framebuffer
//!
//! # Timing Constants
//!
//! All timing is expressed in frames at the nominal 60 Hz:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_MOVE_INTERVAL` | 8 | Frames between snake steps |
//! | `PHASE_DURATION` | 300 | Frames of wall/self immunity |
//! | `SPEED_DURATION` | 300 | Frames of halved move interval |
//! | `EFFECT_BLINK_FRAMES` | 60 | Final window in which an effect blinks |
//!
//! # Examples
//!
//! ```
//! use snek_types::{Cell, Direction, GRID_HEIGHT, GRID_WIDTH};
//!
//! let head = Cell::new(GRID_WIDTH / 2, GRID_HEIGHT / 2);
//! assert_eq!(head.offset(Direction::Right), Cell::new(21, 15));
//! assert!(Direction::Left.is_reverse_of(Direction::Right));
//! ```

/// Grid width in cells (40 columns)
pub const GRID_WIDTH: i32 = 40;

/// Grid height in cells (30 rows)
pub const GRID_HEIGHT: i32 = 30;

/// Total number of grid cells
pub const GRID_CELLS: usize = (GRID_WIDTH * GRID_HEIGHT) as usize;

/// Pixel size of a single grid cell
pub const CELL_SIZE: i32 = 16;

/// Framebuffer width in pixels (grid width × cell size)
pub const FB_WIDTH: usize = (GRID_WIDTH * CELL_SIZE) as usize;

/// Framebuffer height in pixels (grid height × cell size)
pub const FB_HEIGHT: usize = (GRID_HEIGHT * CELL_SIZE) as usize;

/// Maximum snake length; the body can never hold more segments than the grid has cells.
pub const SNAKE_CAPACITY: usize = GRID_CELLS;

/// Snake length after a reset
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Fixed size of the particle pool
pub const MAX_PARTICLES: usize = 128;

/// Frames between snake steps at normal speed
pub const BASE_MOVE_INTERVAL: i32 = 8;

/// Phase effect duration in frames (5 seconds)
pub const PHASE_DURATION: u32 = 60 * 5;

/// Speed effect duration in frames (5 seconds)
pub const SPEED_DURATION: u32 = 60 * 5;

/// Final window of an effect (1 second) during which the snake blinks
pub const EFFECT_BLINK_FRAMES: u32 = 60;

/// Blink half-period in frames
pub const EFFECT_BLINK_PERIOD: u64 = 6;

/// Score awarded per food item
pub const FOOD_REWARD: u32 = 10;

/// Chance that eating food spawns a power-up (when none is on the field)
pub const POWER_UP_PROBABILITY: f32 = 0.5;

/// Interior obstacles placed per reset (about 1% of the grid)
pub const INTERIOR_OBSTACLES: usize = GRID_CELLS / 100;

/// Nominal frame rate
pub const FPS: f64 = 60.0;

/// Audio sample rate in Hz
pub const SAMPLE_RATE: f64 = 48000.0;

/// Stereo audio frames emitted per video frame (48000 / 60)
pub const AUDIO_FRAMES_PER_VIDEO_FRAME: usize = 800;

/// A grid coordinate. Signed so that a candidate head one step past an edge is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell one unit step along `dir` (may leave the grid).
    pub fn offset(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Check if the cell lies inside the grid
    pub fn in_bounds(self) -> bool {
        self.x >= 0 && self.x < GRID_WIDTH && self.y >= 0 && self.y < GRID_HEIGHT
    }

    /// Wrap out-of-range coordinates to the opposite edge.
    pub fn wrapped(self) -> Self {
        Self::new(
            self.x.rem_euclid(GRID_WIDTH),
            self.y.rem_euclid(GRID_HEIGHT),
        )
    }

    /// Pixel-space centre of the cell
    pub fn pixel_center(self) -> (f32, f32) {
        (
            self.x as f32 * CELL_SIZE as f32 + CELL_SIZE as f32 / 2.0,
            self.y as f32 * CELL_SIZE as f32 + CELL_SIZE as f32 / 2.0,
        )
    }
}

/// Snake heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector in grid space (y grows downwards)
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_reverse_of(self, other: Direction) -> bool {
        self.reverse() == other
    }

    /// Stable numeric code used by the save block
    pub fn code(self) -> u32 {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Direction::Up),
            1 => Some(Direction::Down),
            2 => Some(Direction::Left),
            3 => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    /// Wall wrap and self-collision immunity
    Phase,
    /// Halved move interval
    Speed,
}

impl PowerUpKind {
    pub fn color(self) -> Rgb {
        match self {
            PowerUpKind::Phase => PHASE_COLOR,
            PowerUpKind::Speed => SPEED_COLOR,
        }
    }

    pub fn duration(self) -> u32 {
        match self {
            PowerUpKind::Phase => PHASE_DURATION,
            PowerUpKind::Speed => SPEED_DURATION,
        }
    }

    /// Save block code; 0 is reserved for "no power-up".
    pub fn code(self) -> u32 {
        match self {
            PowerUpKind::Phase => 1,
            PowerUpKind::Speed => 2,
        }
    }

    pub fn from_code(code: u32) -> Option<Option<Self>> {
        match code {
            0 => Some(None),
            1 => Some(Some(PowerUpKind::Phase)),
            2 => Some(Some(PowerUpKind::Speed)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Phase => "phase",
            PowerUpKind::Speed => "speed",
        }
    }
}

/// Top-level game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    #[default]
    Title,
    Playing,
    Paused,
    GameOver,
}

impl GameMode {
    pub fn code(self) -> u32 {
        match self {
            GameMode::Title => 0,
            GameMode::Playing => 1,
            GameMode::Paused => 2,
            GameMode::GameOver => 3,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(GameMode::Title),
            1 => Some(GameMode::Playing),
            2 => Some(GameMode::Paused),
            3 => Some(GameMode::GameOver),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Title => "title",
            GameMode::Playing => "playing",
            GameMode::Paused => "paused",
            GameMode::GameOver => "game_over",
        }
    }
}

/// The six joypad buttons the core reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    Start,
    Select,
}

impl Button {
    pub const ALL: [Button; 6] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::Start,
        Button::Select,
    ];

    /// Position in [`Button::ALL`].
    pub fn index(self) -> usize {
        match self {
            Button::Up => 0,
            Button::Down => 1,
            Button::Left => 2,
            Button::Right => 3,
            Button::Start => 4,
            Button::Select => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Button::Up => "up",
            Button::Down => "down",
            Button::Left => "left",
            Button::Right => "right",
            Button::Start => "start",
            Button::Select => "select",
        }
    }
}

/// One frame's sample of the six buttons the core listens to.
///
/// Level-triggered: a field is `true` for every frame the button is held.
/// Edge detection is done by the core against the previous frame's sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub start: bool,
    pub select: bool,
}

impl InputState {
    pub const NONE: InputState = InputState {
        up: false,
        down: false,
        left: false,
        right: false,
        start: false,
        select: false,
    };

    pub fn start() -> Self {
        Self {
            start: true,
            ..Self::NONE
        }
    }

    pub fn select() -> Self {
        Self {
            select: true,
            ..Self::NONE
        }
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        match button {
            Button::Up => self.up,
            Button::Down => self.down,
            Button::Left => self.left,
            Button::Right => self.right,
            Button::Start => self.start,
            Button::Select => self.select,
        }
    }

    pub fn set(&mut self, button: Button, pressed: bool) {
        match button {
            Button::Up => self.up = pressed,
            Button::Down => self.down = pressed,
            Button::Left => self.left = pressed,
            Button::Right => self.right = pressed,
            Button::Start => self.start = pressed,
            Button::Select => self.select = pressed,
        }
    }

    pub fn direction(dir: Direction) -> Self {
        let mut s = Self::NONE;
        match dir {
            Direction::Up => s.up = true,
            Direction::Down => s.down = true,
            Direction::Left => s.left = true,
            Direction::Right => s.right = true,
        }
        s
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packed 0x00RRGGBB (top byte unused).
    #[inline(always)]
    pub const fn to_xrgb(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    #[inline(always)]
    pub const fn from_xrgb(px: u32) -> Self {
        Self {
            r: ((px >> 16) & 0xFF) as u8,
            g: ((px >> 8) & 0xFF) as u8,
            b: (px & 0xFF) as u8,
        }
    }

    /// Per-channel linear interpolation, truncated to 8 bits.
    #[inline]
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let ch = |a: u8, b: u8| ((1.0 - t) * a as f32 + t * b as f32) as u8;
        Rgb::new(ch(self.r, other.r), ch(self.g, other.g), ch(self.b, other.b))
    }

    /// Multiply every channel by `f`, truncating (and saturating) to 8 bits.
    #[inline]
    pub fn scale(self, f: f32) -> Rgb {
        Rgb::new(
            (self.r as f32 * f) as u8,
            (self.g as f32 * f) as u8,
            (self.b as f32 * f) as u8,
        )
    }
}

// Palette.
pub const BG_TOP_COLOR: Rgb = Rgb::new(30, 30, 40);
pub const BG_BOTTOM_COLOR: Rgb = Rgb::new(10, 10, 20);
pub const SNAKE_HEAD_COLOR: Rgb = Rgb::new(200, 200, 40);
pub const SNAKE_BODY_COLOR: Rgb = Rgb::new(80, 200, 80);
pub const FOOD_COLOR: Rgb = Rgb::new(200, 80, 80);
pub const PHASE_COLOR: Rgb = Rgb::new(80, 80, 200);
pub const SPEED_COLOR: Rgb = Rgb::new(200, 160, 40);
pub const HUD_TEXT_COLOR: Rgb = Rgb::new(240, 240, 240);
pub const GAME_OVER_COLOR: Rgb = Rgb::new(255, 60, 60);
