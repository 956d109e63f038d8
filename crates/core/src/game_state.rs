//! Game state module - manages the complete game state
//!
//! This module ties together all core components: grid, snake, food, power-up,
//! effect timers, particles and the gameplay RNG. It owns the per-frame entry
//! point ([`GameState::run_frame`]), the mode state machine and the discrete
//! simulation step.
//!
//! # Frame order
//!
//! 1. Edge-detect `start`/`select` against the previous input sample and apply
//!    mode transitions; steer the snake while playing.
//! 2. While playing: decrement both effect timers, count the move interval down
//!    and run one [`GameState::step`] when it reaches zero, then age particles.
//! 3. Increment the frame counter.

use snek_types::*;
use thiserror::Error;

use crate::grid::{Grid, PLACEMENT_ATTEMPTS};
use crate::particles::ParticlePool;
use crate::rng::SimpleRng;
use crate::snake::Snake;

/// A power-up lying on the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub cell: Cell,
}

/// Why a step ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collision {
    Wall,
    SelfBody,
    Obstacle,
    /// No free cell was left to relocate the food.
    GridFull,
}

impl Collision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collision::Wall => "wall",
            Collision::SelfBody => "self",
            Collision::Obstacle => "obstacle",
            Collision::GridFull => "grid_full",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("no free cell left on the grid")]
    GridFull,
}

/// What happened during the last simulation step (consumed by observers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepEvent {
    pub collision: Option<Collision>,
    pub ate_food: bool,
    pub power_up: Option<PowerUpKind>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) grid: Grid,
    pub(crate) snake: Snake,
    pub(crate) food: Cell,
    pub(crate) power_up: Option<PowerUp>,
    pub(crate) phase_timer: u32,
    pub(crate) speed_timer: u32,
    pub(crate) particles: ParticlePool,
    pub(crate) score: u32,
    pub(crate) high_score: u32,
    pub(crate) mode: GameMode,
    /// Frames left until the next step.
    pub(crate) move_counter: i32,
    /// Monotonic; survives resets.
    pub(crate) frame_count: u64,
    /// Input sample from the previous frame, for edge detection.
    pub(crate) prev_input: InputState,
    pub(crate) rng: SimpleRng,
    last_event: Option<StepEvent>,
}

impl GameState {
    /// Create a new game on the title screen with the given RNG seed
    pub fn new(seed: u32) -> Self {
        let mut state = Self {
            grid: Grid::new(),
            snake: Snake::new(),
            food: Cell::default(),
            power_up: None,
            phase_timer: 0,
            speed_timer: 0,
            particles: ParticlePool::new(),
            score: 0,
            high_score: 0,
            mode: GameMode::Title,
            move_counter: BASE_MOVE_INTERVAL,
            frame_count: 0,
            prev_input: InputState::NONE,
            rng: SimpleRng::new(seed),
            last_event: None,
        };
        state.reset();
        state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn power_up(&self) -> Option<PowerUp> {
        self.power_up
    }

    pub fn phase_timer(&self) -> u32 {
        self.phase_timer
    }

    pub fn speed_timer(&self) -> u32 {
        self.speed_timer
    }

    pub fn phase_active(&self) -> bool {
        self.phase_timer > 0
    }

    pub fn speed_active(&self) -> bool {
        self.speed_timer > 0
    }

    pub fn particles(&self) -> &ParticlePool {
        &self.particles
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn move_counter(&self) -> i32 {
        self.move_counter
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    /// Frames between steps; halved while the speed effect runs.
    pub fn move_interval(&self) -> i32 {
        if self.speed_active() {
            BASE_MOVE_INTERVAL / 2
        } else {
            BASE_MOVE_INTERVAL
        }
    }

    /// Take and clear the last step event.
    pub fn take_last_event(&mut self) -> Option<StepEvent> {
        self.last_event.take()
    }

    // Scenario setup. Gameplay never calls these; tests and tools use them to
    // stage a field without replaying input.

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }

    pub fn set_food(&mut self, food: Cell) {
        self.food = food;
    }

    pub fn set_power_up(&mut self, power_up: Option<PowerUp>) {
        self.power_up = power_up;
    }

    pub fn set_phase_timer(&mut self, frames: u32) {
        self.phase_timer = frames;
    }

    pub fn set_speed_timer(&mut self, frames: u32) {
        self.speed_timer = frames;
    }

    pub fn set_score(&mut self, score: u32) {
        self.score = score;
        self.high_score = self.high_score.max(score);
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
    }

    /// Start a new round: fresh snake, cleared score/timers/power-up/particles,
    /// new obstacle layout, then food.
    ///
    /// Mode, high score and frame counter are left alone.
    pub fn reset(&mut self) {
        self.snake = Snake::new();
        self.score = 0;
        self.phase_timer = 0;
        self.speed_timer = 0;
        self.power_up = None;
        self.move_counter = BASE_MOVE_INTERVAL;
        self.particles.clear();
        self.last_event = None;

        let snake = &self.snake;
        self.grid.place_obstacles(&mut self.rng, |c| snake.contains(c));

        if self.place_food().is_err() {
            // Unreachable with a three-segment snake on a 40x30 grid.
            log::error!("no free cell for food after reset");
        }

        log::info!(
            "reset: {} obstacles, food at ({}, {})",
            self.grid.obstacle_count(),
            self.food.x,
            self.food.y
        );
    }

    /// Pick a uniformly random cell that is not snake, obstacle, power-up or `extra`.
    ///
    /// After [`PLACEMENT_ATTEMPTS`] misses the search falls back to a row-major
    /// scan, so it only fails when the grid is completely full.
    fn random_free_cell(&mut self, extra: Option<Cell>) -> Result<Cell, PlacementError> {
        let power_up = self.power_up.map(|p| p.cell);
        let blocked = |grid: &Grid, snake: &Snake, c: Cell| {
            grid.is_obstacle(c) || snake.contains(c) || Some(c) == power_up || Some(c) == extra
        };

        for _ in 0..PLACEMENT_ATTEMPTS {
            let cell = Cell::new(
                self.rng.next_range(GRID_WIDTH as u32) as i32,
                self.rng.next_range(GRID_HEIGHT as u32) as i32,
            );
            if !blocked(&self.grid, &self.snake, cell) {
                return Ok(cell);
            }
        }

        log::warn!("random placement exhausted, scanning for a free cell");
        (0..GRID_HEIGHT)
            .flat_map(|y| (0..GRID_WIDTH).map(move |x| Cell::new(x, y)))
            .find(|&c| !blocked(&self.grid, &self.snake, c))
            .ok_or(PlacementError::GridFull)
    }

    /// Move the food to a random free cell
    pub fn place_food(&mut self) -> Result<(), PlacementError> {
        self.food = self.random_free_cell(None)?;
        Ok(())
    }

    /// Maybe drop a power-up on the field.
    ///
    /// Does nothing while one is already present; otherwise spawns with
    /// [`POWER_UP_PROBABILITY`], kind chosen uniformly. Never lands on the food.
    pub fn try_spawn_power_up(&mut self) -> Option<PowerUp> {
        if self.power_up.is_some() {
            return None;
        }
        if self.rng.next_unit() > POWER_UP_PROBABILITY {
            return None;
        }
        let kind = if self.rng.next_range(2) == 1 {
            PowerUpKind::Phase
        } else {
            PowerUpKind::Speed
        };
        let cell = self.random_free_cell(Some(self.food)).ok()?;
        let power_up = PowerUp { kind, cell };
        self.power_up = Some(power_up);
        log::debug!("power-up {} spawned at ({}, {})", kind.as_str(), cell.x, cell.y);
        Some(power_up)
    }

    /// Apply one frame of input: mode transitions on `start`/`select` edges,
    /// steering while playing.
    pub fn handle_input(&mut self, input: InputState) {
        let prev = self.prev_input;
        self.prev_input = input;

        if input.start && !prev.start {
            match self.mode {
                GameMode::Title | GameMode::GameOver => {
                    self.mode = GameMode::Playing;
                    self.reset();
                }
                GameMode::Playing => self.mode = GameMode::Paused,
                GameMode::Paused => self.mode = GameMode::Playing,
            }
            log::info!("mode -> {}", self.mode.as_str());
        }

        if input.select && !prev.select && self.mode == GameMode::Title {
            self.high_score = 0;
            log::info!("high score cleared");
        }

        if self.mode != GameMode::Playing {
            return;
        }

        // First acceptable direction wins, in up/down/left/right order.
        let wanted = [
            (input.up, Direction::Up),
            (input.down, Direction::Down),
            (input.left, Direction::Left),
            (input.right, Direction::Right),
        ];
        for (held, dir) in wanted {
            if held && self.snake.steer(dir) {
                break;
            }
        }
    }

    /// Advance one frame. Rendering is left to the caller.
    pub fn run_frame(&mut self, input: InputState) {
        self.handle_input(input);

        if self.mode == GameMode::Playing {
            self.phase_timer = self.phase_timer.saturating_sub(1);
            self.speed_timer = self.speed_timer.saturating_sub(1);

            self.move_counter = self.move_counter.saturating_sub(1);
            if self.move_counter <= 0 {
                // A speed pickup takes effect after the reload, not on it.
                let interval = self.move_interval();
                self.step();
                self.move_counter = interval;
            }

            self.particles.age_all();
        }

        self.frame_count = self.frame_count.wrapping_add(1);
    }

    fn end_run(&mut self, collision: Collision) -> StepEvent {
        self.mode = GameMode::GameOver;
        log::info!(
            "game over ({}) at score {}",
            collision.as_str(),
            self.score
        );
        StepEvent {
            collision: Some(collision),
            ..StepEvent::default()
        }
    }

    /// One discrete grid advance.
    ///
    /// A fatal collision switches to [`GameMode::GameOver`] and leaves the
    /// snake, food, score and timers untouched.
    pub fn step(&mut self) -> StepEvent {
        let heading = self.snake.commit_heading();
        let mut next = self.snake.head().offset(heading);
        let phasing = self.phase_active();

        let event = 'step: {
            if !next.in_bounds() {
                if phasing {
                    next = next.wrapped();
                } else {
                    break 'step self.end_run(Collision::Wall);
                }
            }
            if !phasing && self.snake.contains(next) {
                break 'step self.end_run(Collision::SelfBody);
            }
            // Phase never protects against obstacles.
            if self.grid.is_obstacle(next) {
                break 'step self.end_run(Collision::Obstacle);
            }

            self.snake.advance(next);
            let mut event = StepEvent::default();

            if next == self.food {
                event.ate_food = true;
                self.snake.grow();
                self.score = self.score.saturating_add(FOOD_REWARD);
                self.high_score = self.high_score.max(self.score);
                self.particles.spawn_burst(self.food, FOOD_COLOR, &mut self.rng);
                if self.place_food().is_err() {
                    break 'step self.end_run(Collision::GridFull);
                }
                self.try_spawn_power_up();
            }

            if let Some(power_up) = self.power_up.filter(|p| p.cell == next) {
                let timer = match power_up.kind {
                    PowerUpKind::Phase => &mut self.phase_timer,
                    PowerUpKind::Speed => &mut self.speed_timer,
                };
                *timer = power_up.kind.duration();
                self.particles
                    .spawn_burst(power_up.cell, power_up.kind.color(), &mut self.rng);
                self.power_up = None;
                event.power_up = Some(power_up.kind);
                log::debug!("picked up {}", power_up.kind.as_str());
            }

            event
        };

        self.last_event = Some(event);
        event
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A playing state on an obstacle-free grid with food parked far away.
    fn open_field() -> GameState {
        let mut state = GameState::new(12345);
        state.grid_mut().clear();
        state.set_food(Cell::new(1, 1));
        state.set_mode(GameMode::Playing);
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.mode(), GameMode::Title);
        assert_eq!(state.score(), 0);
        assert_eq!(state.high_score(), 0);
        assert_eq!(state.snake().len(), 3);
        assert_eq!(state.snake().head(), Cell::new(20, 15));
        assert!(state.power_up().is_none());
        assert_eq!(state.move_counter(), BASE_MOVE_INTERVAL);
        assert!(!state.grid().is_obstacle(state.food()));
        assert!(!state.snake().contains(state.food()));
    }

    #[test]
    fn test_reset_keeps_snake_off_obstacles() {
        for seed in 1..200 {
            let state = GameState::new(seed);
            for &c in state.snake().segments() {
                assert!(c.in_bounds());
                assert!(!state.grid().is_obstacle(c));
            }
        }
    }

    #[test]
    fn test_step_moves_head_and_conserves_length() {
        let mut state = open_field();
        let event = state.step();
        assert_eq!(event, StepEvent::default());
        assert_eq!(state.snake().head(), Cell::new(21, 15));
        assert_eq!(state.snake().len(), 3);
        assert_eq!(state.mode(), GameMode::Playing);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut state = open_field();
        state.set_food(Cell::new(21, 15));
        let event = state.step();

        assert!(event.ate_food);
        assert_eq!(state.snake().len(), 4);
        assert_eq!(state.score(), FOOD_REWARD);
        assert_eq!(state.high_score(), FOOD_REWARD);
        assert_ne!(state.food(), Cell::new(21, 15));
        assert!(!state.snake().contains(state.food()));
        assert!(state.particles().active_count() >= 1);
    }

    #[test]
    fn test_wall_is_fatal_without_phase() {
        let mut state = open_field();
        let cells = [Cell::new(GRID_WIDTH - 1, 5), Cell::new(GRID_WIDTH - 2, 5), Cell::new(GRID_WIDTH - 3, 5)];
        state.set_snake(Snake::from_cells(&cells, Direction::Right));

        let event = state.step();
        assert_eq!(event.collision, Some(Collision::Wall));
        assert_eq!(state.mode(), GameMode::GameOver);
        assert_eq!(state.snake().segments(), &cells);
    }

    #[test]
    fn test_phase_wraps_at_wall() {
        let mut state = open_field();
        let cells = [Cell::new(GRID_WIDTH - 1, 5), Cell::new(GRID_WIDTH - 2, 5), Cell::new(GRID_WIDTH - 3, 5)];
        state.set_snake(Snake::from_cells(&cells, Direction::Right));
        state.set_phase_timer(10);

        let event = state.step();
        assert_eq!(event.collision, None);
        assert_eq!(state.snake().head(), Cell::new(0, 5));
    }

    #[test]
    fn test_self_collision_respects_phase() {
        // Head at (5,5) facing down into its own body at (5,6).
        let cells = [
            Cell::new(5, 5),
            Cell::new(6, 5),
            Cell::new(6, 6),
            Cell::new(5, 6),
            Cell::new(4, 6),
        ];

        let mut state = open_field();
        state.set_snake(Snake::from_cells(&cells, Direction::Down));
        assert_eq!(state.step().collision, Some(Collision::SelfBody));

        let mut state = open_field();
        state.set_snake(Snake::from_cells(&cells, Direction::Down));
        state.set_phase_timer(1);
        assert_eq!(state.step().collision, None);
        assert_eq!(state.snake().head(), Cell::new(5, 6));
    }

    #[test]
    fn test_obstacle_is_fatal_even_with_phase() {
        let mut state = open_field();
        state.grid_mut().set_obstacle(Cell::new(21, 15), true);
        state.set_phase_timer(PHASE_DURATION);

        assert_eq!(state.step().collision, Some(Collision::Obstacle));
        assert_eq!(state.snake().head(), Cell::new(20, 15));
    }

    #[test]
    fn test_power_up_pickup_starts_timer() {
        let mut state = open_field();
        state.set_power_up(Some(PowerUp {
            kind: PowerUpKind::Speed,
            cell: Cell::new(21, 15),
        }));

        let event = state.step();
        assert_eq!(event.power_up, Some(PowerUpKind::Speed));
        assert_eq!(state.speed_timer(), SPEED_DURATION);
        assert_eq!(state.phase_timer(), 0);
        assert!(state.power_up().is_none());
        assert_eq!(state.move_interval(), BASE_MOVE_INTERVAL / 2);
        assert_eq!(state.take_last_event(), Some(event));
        assert_eq!(state.take_last_event(), None);
    }

    #[test]
    fn test_start_edge_transitions() {
        let mut state = GameState::new(3);
        state.handle_input(InputState::start());
        assert_eq!(state.mode(), GameMode::Playing);

        // Held start does not repeat.
        state.handle_input(InputState::start());
        assert_eq!(state.mode(), GameMode::Playing);

        state.handle_input(InputState::NONE);
        state.handle_input(InputState::start());
        assert_eq!(state.mode(), GameMode::Paused);

        state.handle_input(InputState::NONE);
        state.handle_input(InputState::start());
        assert_eq!(state.mode(), GameMode::Playing);
    }

    #[test]
    fn test_select_clears_high_score_only_on_title() {
        let mut state = GameState::new(3);
        state.set_score(50);
        state.set_mode(GameMode::Paused);
        state.handle_input(InputState::select());
        assert_eq!(state.high_score(), 50);

        state.handle_input(InputState::NONE);
        state.set_mode(GameMode::Title);
        state.handle_input(InputState::select());
        assert_eq!(state.high_score(), 0);
    }

    #[test]
    fn test_directions_ignored_outside_play() {
        let mut state = GameState::new(3);
        state.handle_input(InputState::direction(Direction::Up));
        assert_eq!(state.snake().pending(), Direction::Right);
    }

    #[test]
    fn test_run_frame_steps_on_interval() {
        let mut state = open_field();
        for _ in 0..BASE_MOVE_INTERVAL - 1 {
            state.run_frame(InputState::NONE);
        }
        assert_eq!(state.snake().head(), Cell::new(20, 15));
        state.run_frame(InputState::NONE);
        assert_eq!(state.snake().head(), Cell::new(21, 15));
        assert_eq!(state.move_counter(), BASE_MOVE_INTERVAL);
        assert_eq!(state.frame_count(), BASE_MOVE_INTERVAL as u64);
    }

    #[test]
    fn test_speed_pickup_keeps_current_countdown() {
        let mut state = open_field();
        state.set_power_up(Some(PowerUp {
            kind: PowerUpKind::Speed,
            cell: Cell::new(21, 15),
        }));
        for _ in 0..BASE_MOVE_INTERVAL {
            state.run_frame(InputState::NONE);
        }
        assert!(state.speed_active());
        assert_eq!(state.move_counter(), BASE_MOVE_INTERVAL);

        for _ in 0..BASE_MOVE_INTERVAL - 1 {
            state.run_frame(InputState::NONE);
        }
        assert_eq!(state.snake().head(), Cell::new(21, 15));
        state.run_frame(InputState::NONE);
        assert_eq!(state.snake().head(), Cell::new(22, 15));
        assert_eq!(state.move_counter(), BASE_MOVE_INTERVAL / 2);
    }

    #[test]
    fn test_score_saturates_at_max() {
        let mut state = open_field();
        state.set_score(u32::MAX - 5);
        state.set_food(Cell::new(21, 15));

        assert!(state.step().ate_food);
        assert_eq!(state.score(), u32::MAX);
        assert_eq!(state.high_score(), u32::MAX);
    }

    #[test]
    fn test_paused_frames_freeze_simulation() {
        let mut state = open_field();
        state.set_mode(GameMode::Paused);
        state.set_phase_timer(5);
        for _ in 0..50 {
            state.run_frame(InputState::NONE);
        }
        assert_eq!(state.snake().head(), Cell::new(20, 15));
        assert_eq!(state.phase_timer(), 5);
        assert_eq!(state.frame_count(), 50);
    }
}
