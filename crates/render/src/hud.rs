//! Scoreboard, effect icons and full-screen overlays.

use snek_types::{Rgb, GAME_OVER_COLOR, HUD_TEXT_COLOR, PHASE_COLOR, SPEED_COLOR};

use crate::fb::FrameBuffer;
use crate::font::{centered_x, draw_number, draw_text, DIGIT_WIDTH, GLYPH_ADVANCE, SEGMENT_THICKNESS};

/// Digits shown for score and high score.
pub const SCORE_DIGITS: u32 = 5;
/// Factor applied to the whole frame under an overlay.
pub const OVERLAY_DIM: f32 = 0.4;

const MARGIN: i32 = 8;
const LABEL_Y: i32 = 16;
const DIGITS_Y: i32 = 32;
const ICON_Y: i32 = 8;
const ICON_SIZE: i32 = 12;
const ICON_ADVANCE: i32 = 16;

/// "SCORE" and the score on the left, "HI" and the high score on the right.
pub fn draw_scoreboard(fb: &mut FrameBuffer, score: u32, high_score: u32) {
    let width = fb.width() as i32;
    let digit_advance = DIGIT_WIDTH + SEGMENT_THICKNESS;

    draw_text(fb, MARGIN, LABEL_Y, "SCORE", HUD_TEXT_COLOR);
    draw_number(fb, MARGIN, DIGITS_Y, score, SCORE_DIGITS, HUD_TEXT_COLOR);

    let hi_x = width - MARGIN - 2 * GLYPH_ADVANCE - SCORE_DIGITS as i32 * digit_advance - 4;
    draw_text(fb, hi_x, LABEL_Y, "HI", HUD_TEXT_COLOR);
    let digits_x = width - MARGIN - SCORE_DIGITS as i32 * digit_advance;
    draw_number(fb, digits_x, DIGITS_Y, high_score, SCORE_DIGITS, HUD_TEXT_COLOR);
}

/// Mini icons for running effects, left to right from just before screen centre:
/// a diamond for phase, then a bolt for speed.
pub fn draw_effect_icons(fb: &mut FrameBuffer, phase: bool, speed: bool) {
    let mut x = fb.width() as i32 / 2 - 32;
    if phase {
        for iy in 0..ICON_SIZE {
            for ix in 0..ICON_SIZE {
                if (ix - 6).abs() + (iy - 6).abs() < 6 {
                    fb.set(x + ix, ICON_Y + iy, PHASE_COLOR);
                }
            }
        }
        x += ICON_ADVANCE;
    }
    if speed {
        for iy in 0..ICON_SIZE {
            for ix in 0..ICON_SIZE {
                let fill = match iy {
                    0..=3 => ix > 6,
                    4..=7 => ix < 6,
                    _ => ix > 6,
                };
                if fill {
                    fb.set(x + ix, ICON_Y + iy, SPEED_COLOR);
                }
            }
        }
    }
}

fn draw_centered(fb: &mut FrameBuffer, y: i32, text: &str, color: Rgb) {
    let x = centered_x(text, fb.width());
    draw_text(fb, x, y, text, color);
}

pub fn draw_title_overlay(fb: &mut FrameBuffer) {
    let mut y = fb.height() as i32 / 2 - 32;
    draw_centered(fb, y, "SNAKE", HUD_TEXT_COLOR);
    y += 24;
    draw_centered(fb, y, "PRESS START", HUD_TEXT_COLOR);
    y += 16;
    draw_centered(fb, y, "ARROWS TO MOVE", HUD_TEXT_COLOR);
}

pub fn draw_pause_overlay(fb: &mut FrameBuffer) {
    fb.darken(OVERLAY_DIM);
    let y = fb.height() as i32 / 2 - 4;
    draw_centered(fb, y, "PAUSED", HUD_TEXT_COLOR);
}

pub fn draw_game_over_overlay(fb: &mut FrameBuffer) {
    fb.darken(OVERLAY_DIM);
    let y = fb.height() as i32 / 2 - 20;
    draw_centered(fb, y, "GAME OVER", GAME_OVER_COLOR);
    draw_centered(fb, y + 20, "PRESS START", HUD_TEXT_COLOR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::draw_digit;

    #[test]
    fn test_scoreboard_layout() {
        let mut fb = FrameBuffer::default();
        draw_scoreboard(&mut fb, 7, 12345);

        // Least significant score digit sits at x = 8 + 4 * 24.
        let mut expect = FrameBuffer::default();
        draw_digit(&mut expect, 104, DIGITS_Y, 7, HUD_TEXT_COLOR);
        for y in DIGITS_Y..DIGITS_Y + 36 {
            for x in 104..124 {
                assert_eq!(fb.get(x, y), expect.get(x, y));
            }
        }

        // High score occupies 512..632; the "HI" label starts at 492.
        assert_eq!(fb.get(492 + 1, LABEL_Y), Some(HUD_TEXT_COLOR));
        assert_eq!(fb.get(608 + 8, DIGITS_Y), Some(HUD_TEXT_COLOR));
    }

    #[test]
    fn test_icons_only_for_active_effects() {
        let mut none = FrameBuffer::default();
        draw_effect_icons(&mut none, false, false);
        assert!(none.pixels().iter().all(|&p| p == 0));

        let mut speed_only = FrameBuffer::default();
        draw_effect_icons(&mut speed_only, false, true);
        // Without phase, the bolt takes the first slot.
        assert_eq!(speed_only.get(288 + 8, ICON_Y), Some(SPEED_COLOR));

        let mut both = FrameBuffer::default();
        draw_effect_icons(&mut both, true, true);
        assert_eq!(both.get(288 + 6, ICON_Y + 6), Some(PHASE_COLOR));
        assert_eq!(both.get(304 + 8, ICON_Y), Some(SPEED_COLOR));
    }

    #[test]
    fn test_overlays_dim_the_frame() {
        let mut fb = FrameBuffer::default();
        fb.fill(Rgb::new(100, 100, 100));
        draw_pause_overlay(&mut fb);
        assert_eq!(fb.get(0, 0), Some(Rgb::new(40, 40, 40)));

        let mut title = FrameBuffer::default();
        title.fill(Rgb::new(100, 100, 100));
        draw_title_overlay(&mut title);
        assert_eq!(title.get(0, 0), Some(Rgb::new(100, 100, 100)));
    }

    #[test]
    fn test_game_over_text_color() {
        let mut fb = FrameBuffer::default();
        draw_game_over_overlay(&mut fb);
        let red = fb.pixels().iter().filter(|&&p| p == GAME_OVER_COLOR.to_xrgb()).count();
        let white = fb.pixels().iter().filter(|&&p| p == HUD_TEXT_COLOR.to_xrgb()).count();
        assert!(red > 0);
        assert!(white > 0);
    }
}
