//! GameView: maps `core::GameState` into a pixel framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layers, back to front: background gradient, particles, snake, food,
//! power-up, obstacles, scoreboard and effect icons, then the overlay for the
//! current mode.

use snek_core::{GameState, PowerUp};
use snek_types::{
    GameMode, PowerUpKind, Rgb, EFFECT_BLINK_FRAMES, EFFECT_BLINK_PERIOD, FB_HEIGHT, FB_WIDTH,
    PHASE_COLOR, SNAKE_BODY_COLOR, SNAKE_HEAD_COLOR, SPEED_COLOR,
};

use crate::fb::FrameBuffer;
use crate::hud;
use crate::sprites;

/// Snake palette for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnakePalette {
    pub head: Rgb,
    pub body: Rgb,
}

impl SnakePalette {
    pub const NORMAL: SnakePalette = SnakePalette {
        head: SNAKE_HEAD_COLOR,
        body: SNAKE_BODY_COLOR,
    };

    /// Phase wins over speed when both run. During an effect's last
    /// [`EFFECT_BLINK_FRAMES`] the snake flips back to normal colors every
    /// [`EFFECT_BLINK_PERIOD`] frames.
    pub fn for_state(state: &GameState) -> Self {
        let (tint, timer) = if state.phase_active() {
            (PHASE_COLOR, state.phase_timer())
        } else if state.speed_active() {
            (SPEED_COLOR, state.speed_timer())
        } else {
            return Self::NORMAL;
        };

        let blink_off =
            timer <= EFFECT_BLINK_FRAMES && (state.frame_count() / EFFECT_BLINK_PERIOD) % 2 == 0;
        if blink_off {
            Self::NORMAL
        } else {
            SnakePalette {
                head: tint,
                body: tint,
            }
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path; the buffer is only resized if it is
    /// not already screen-sized.
    pub fn render_into(&self, state: &GameState, fb: &mut FrameBuffer) {
        fb.resize(FB_WIDTH, FB_HEIGHT);

        sprites::draw_background(fb);
        self.draw_particles(state, fb);
        self.draw_snake(state, fb);

        let food = state.food();
        sprites::draw_food(fb, food.x, food.y);

        if let Some(PowerUp { kind, cell }) = state.power_up() {
            match kind {
                PowerUpKind::Phase => sprites::draw_phase_gem(fb, cell.x, cell.y),
                PowerUpKind::Speed => sprites::draw_speed_bolt(fb, cell.x, cell.y),
            }
        }

        for cell in state.grid().obstacles() {
            sprites::draw_stone(fb, cell.x, cell.y);
        }

        hud::draw_scoreboard(fb, state.score(), state.high_score());
        hud::draw_effect_icons(fb, state.phase_active(), state.speed_active());

        match state.mode() {
            GameMode::Playing => {}
            GameMode::Title => hud::draw_title_overlay(fb),
            GameMode::Paused => hud::draw_pause_overlay(fb),
            GameMode::GameOver => hud::draw_game_over_overlay(fb),
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, state: &GameState) -> FrameBuffer {
        let mut fb = FrameBuffer::default();
        self.render_into(state, &mut fb);
        fb
    }

    fn draw_particles(&self, state: &GameState, fb: &mut FrameBuffer) {
        for p in state.particles().active() {
            fb.set(p.x as i32, p.y as i32, p.color);
        }
    }

    fn draw_snake(&self, state: &GameState, fb: &mut FrameBuffer) {
        let palette = SnakePalette::for_state(state);
        let phasing = state.phase_active();
        let snake = state.snake();
        let segments = snake.segments();
        let last = segments.len().saturating_sub(1);

        for (i, cell) in segments.iter().enumerate() {
            if i == 0 {
                sprites::draw_head(fb, cell.x, cell.y, snake.heading(), palette.head, phasing);
            } else {
                let t = i as f32 / last as f32;
                sprites::draw_body(fb, cell.x, cell.y, palette.body, t, phasing);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snek_core::Snake;
    use snek_types::{Cell, Direction, InputState, GAME_OVER_COLOR, HUD_TEXT_COLOR};

    fn playing_state() -> GameState {
        let mut state = GameState::new(2024);
        state.run_frame(InputState::start());
        state
    }

    #[test]
    fn test_palette_blinks_in_last_second() {
        let mut state = playing_state();
        assert_eq!(SnakePalette::for_state(&state), SnakePalette::NORMAL);

        state.set_speed_timer(200);
        assert_eq!(SnakePalette::for_state(&state).head, SPEED_COLOR);

        state.set_phase_timer(200);
        assert_eq!(SnakePalette::for_state(&state).body, PHASE_COLOR);

        // frame_count is 1 here: (1 / 6) % 2 == 0, so an expiring effect shows normal colors.
        state.set_phase_timer(EFFECT_BLINK_FRAMES);
        assert_eq!(state.frame_count(), 1);
        assert_eq!(SnakePalette::for_state(&state), SnakePalette::NORMAL);
    }

    #[test]
    fn test_render_is_deterministic() {
        let state = playing_state();
        let view = GameView::new();
        assert_eq!(view.render(&state), view.render(&state));
    }

    #[test]
    fn test_obstacles_draw_over_snake() {
        let mut state = playing_state();
        state.grid_mut().clear();
        let cell = Cell::new(10, 10);
        state.set_snake(Snake::from_cells(
            &[cell, Cell::new(9, 10), Cell::new(8, 10)],
            Direction::Right,
        ));
        state.grid_mut().set_obstacle(cell, true);

        let mut with_stone = FrameBuffer::default();
        GameView::new().render_into(&state, &mut with_stone);

        let mut stone_only = FrameBuffer::default();
        sprites::draw_stone(&mut stone_only, cell.x, cell.y);
        for y in 0..16 {
            for x in 0..16 {
                let (px, py) = (cell.x * 16 + x, cell.y * 16 + y);
                assert_eq!(with_stone.get(px, py), stone_only.get(px, py));
            }
        }
    }

    #[test]
    fn test_mode_overlays() {
        let view = GameView::new();
        let mut state = playing_state();

        let playing = view.render(&state);
        state.set_mode(GameMode::Paused);
        let paused = view.render(&state);
        // Paused frame is the playing frame dimmed, plus text.
        assert_eq!(paused.get(320, 470), playing.get(320, 470).map(|c| c.scale(hud::OVERLAY_DIM)));

        state.set_mode(GameMode::GameOver);
        let over = view.render(&state);
        assert!(over.pixels().contains(&GAME_OVER_COLOR.to_xrgb()));
        assert!(!playing.pixels().contains(&GAME_OVER_COLOR.to_xrgb()));

        state.set_mode(GameMode::Title);
        let title = view.render(&state);
        assert!(title.pixels().contains(&HUD_TEXT_COLOR.to_xrgb()));
    }

    #[test]
    fn test_render_into_resizes_foreign_buffer() {
        let state = playing_state();
        let mut fb = FrameBuffer::new(8, 8);
        GameView::new().render_into(&state, &mut fb);
        assert_eq!((fb.width(), fb.height()), (FB_WIDTH, FB_HEIGHT));
    }
}
