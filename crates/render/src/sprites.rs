//! Procedural sprites.
//!
//! Every sprite is a pure function of its cell coordinates and a few colors:
//! no RNG, no state. Pixel art is computed per pixel over a 16x16 cell with
//! `(x, y)` relative to the cell's top-left corner.

use snek_types::{
    Direction, Rgb, BG_BOTTOM_COLOR, BG_TOP_COLOR, CELL_SIZE, FOOD_COLOR, PHASE_COLOR,
    SPEED_COLOR,
};

use crate::fb::FrameBuffer;

const HALF: i32 = CELL_SIZE / 2;

const EYE_COLOR: Rgb = Rgb::BLACK;
const MOUTH_COLOR: Rgb = Rgb::new(60, 30, 0);
const STRIPE_COLOR: Rgb = Rgb::new(40, 120, 40);
const SCALE_COLOR: Rgb = Rgb::new(200, 255, 200);
const STEM_COLOR: Rgb = Rgb::new(80, 40, 0);
const LEAF_COLOR: Rgb = Rgb::new(40, 180, 40);
const FACET_COLOR: Rgb = Rgb::new(200, 200, 255);
const BOLT_HIGHLIGHT: Rgb = Rgb::new(255, 255, 180);

#[inline]
fn origin(cx: i32, cy: i32) -> (i32, i32) {
    (cx * CELL_SIZE, cy * CELL_SIZE)
}

/// Top-to-bottom gradient over the whole buffer.
pub fn draw_background(fb: &mut FrameBuffer) {
    let h = fb.height();
    for y in 0..h {
        let t = y as f32 / h as f32;
        fb.fill_row(y as i32, BG_TOP_COLOR.lerp(BG_BOTTOM_COLOR, t));
    }
}

/// Solid cell; with `shaded`, the outer band is lightened on the top/left
/// edges and darkened on the bottom/right edges by 20% of full scale.
pub fn draw_cell(fb: &mut FrameBuffer, cx: i32, cy: i32, color: Rgb, shaded: bool) {
    let (px, py) = origin(cx, cy);
    let bump = (0.2f32 * 255.0) as i32;
    for y in 0..CELL_SIZE {
        for x in 0..CELL_SIZE {
            let mut col = color;
            if shaded {
                let fx = x as f32 / CELL_SIZE as f32;
                let fy = y as f32 / CELL_SIZE as f32;
                let shade = if fx < 0.1 || fy < 0.1 {
                    bump
                } else if fx > 0.9 || fy > 0.9 {
                    -bump
                } else {
                    0
                };
                let ch = |c: u8| (c as i32 + shade).clamp(0, 255) as u8;
                col = Rgb::new(ch(color.r), ch(color.g), ch(color.b));
            }
            fb.set(px + x, py + y, col);
        }
    }
}

/// Round head with a top-lit gradient, highlight, eyes facing `heading` and a mouth.
pub fn draw_head(fb: &mut FrameBuffer, cx: i32, cy: i32, heading: Direction, base: Rgb, phasing: bool) {
    let (px, py) = origin(cx, cy);
    for y in 0..CELL_SIZE {
        for x in 0..CELL_SIZE {
            let dx = x - HALF;
            let dy = y - HALF;
            let d2 = dx * dx + dy * dy;
            if d2 >= HALF * HALF {
                continue;
            }
            let t = 0.7 + 0.3 * (HALF - dy) as f32 / HALF as f32;
            let mut col = base.scale(t);
            if x < HALF && y < HALF && d2 < (HALF - 2) * (HALF - 2) {
                col = col.lerp(Rgb::WHITE, 0.15);
            }
            if phasing {
                col = col.lerp(PHASE_COLOR, 0.2);
            }
            fb.set(px + x, py + y, col);
        }
    }

    let s = CELL_SIZE;
    let eyes = match heading {
        Direction::Up => [(s / 3, s / 4), (2 * s / 3, s / 4)],
        Direction::Down => [(s / 3, 3 * s / 4), (2 * s / 3, 3 * s / 4)],
        Direction::Left => [(s / 4, s / 3), (s / 4, 2 * s / 3)],
        Direction::Right => [(3 * s / 4, s / 3), (3 * s / 4, 2 * s / 3)],
    };
    for (ex, ey) in eyes {
        fb.fill_rect(px + ex - 1, py + ey - 1, 3, 3, EYE_COLOR);
    }

    let mx = px + HALF;
    let my = py + HALF + 3;
    for i in -2..=2 {
        fb.set(mx + i, my + i * i / 6, MOUTH_COLOR);
    }
}

/// Elliptical body segment. `t` runs 0 (neck) to 1 (tail) and darkens toward the tail.
pub fn draw_body(fb: &mut FrameBuffer, cx: i32, cy: i32, base: Rgb, t: f32, phasing: bool) {
    let (px, py) = origin(cx, cy);
    let darken = 0.7 + 0.3 * (1.0 - t);
    for y in 0..CELL_SIZE {
        for x in 0..CELL_SIZE {
            let dx = x - HALF;
            let dy = y - HALF;
            if dx * dx * 3 / 4 + dy * dy >= HALF * HALF {
                continue;
            }
            let mut col = base.scale(darken);
            if y % 4 == 0 && x > 2 && x < CELL_SIZE - 2 {
                col = col.lerp(STRIPE_COLOR, 0.3);
            }
            if (x + y) % 7 == 0 {
                col = col.lerp(SCALE_COLOR, 0.1);
            }
            if phasing {
                col = col.lerp(PHASE_COLOR, 0.2);
            }
            fb.set(px + x, py + y, col);
        }
    }
}

/// Apple: shaded disc sitting slightly low in the cell, stem and leaf on top.
pub fn draw_food(fb: &mut FrameBuffer, cx: i32, cy: i32) {
    let (px, py) = origin(cx, cy);
    let c = FOOD_COLOR;
    for y in 0..CELL_SIZE {
        for x in 0..CELL_SIZE {
            let dx = x - HALF;
            let dy = y - HALF + 2;
            let d2 = dx * dx + dy * dy;
            if d2 >= (HALF - 1) * (HALF - 1) {
                continue;
            }
            let t = 0.8 + 0.2 * (HALF - dy) as f32 / HALF as f32;
            let mut col = Rgb::new(
                (c.r as f32 * t) as u8,
                (c.g as f32 * t * 0.9) as u8,
                (c.b as f32 * t * 0.9) as u8,
            );
            if x < HALF && y < HALF && d2 < (HALF - 3) * (HALF - 3) {
                col = col.lerp(Rgb::WHITE, 0.18);
            }
            fb.set(px + x, py + y, col);
        }
    }

    for y in 0..3 {
        fb.set(px + HALF, py + 2 + y, STEM_COLOR);
    }
    fb.fill_rect(px + HALF - 2, py + 2, 3, 2, LEAF_COLOR);
}

/// Faceted diamond with a central shine and a one-pixel glow ring.
pub fn draw_phase_gem(fb: &mut FrameBuffer, cx: i32, cy: i32) {
    let (px, py) = origin(cx, cy);
    let glow = PHASE_COLOR.lerp(Rgb::WHITE, 0.2);
    for y in 0..CELL_SIZE {
        for x in 0..CELL_SIZE {
            let dx = x - HALF;
            let dy = y - HALF;
            let dist = dx.abs() as f32 + dy.abs() as f32 * 0.9;
            if dist < (HALF - 1) as f32 {
                let t = 0.7 + 0.3 * (HALF - dy) as f32 / HALF as f32;
                let mut col = PHASE_COLOR.scale(t);
                if dy < 0 && dx != 0 {
                    col = col.lerp(FACET_COLOR, 0.18);
                }
                if dx * dx + dy * dy < 9 {
                    col = col.lerp(Rgb::WHITE, 0.25);
                }
                fb.set(px + x, py + y, col);
            } else if dist < (HALF + 1) as f32 {
                fb.set(px + x, py + y, glow);
            }
        }
    }
}

fn in_bolt(x: i32, y: i32) -> bool {
    if y <= 2 || y >= CELL_SIZE - 2 {
        return false;
    }
    let relx = x - HALF;
    let rely = y - 2;
    let upper = rely > 0 && rely < HALF && relx > -2 && relx < 3 && relx > rely / 3 - 2;
    let lower = rely >= HALF && relx > 0 && relx < 5 && relx < rely / 2 + 2;
    upper || lower
}

/// Zig-zag lightning bolt with a lit left half and a sparse glow speckle.
pub fn draw_speed_bolt(fb: &mut FrameBuffer, cx: i32, cy: i32) {
    let (px, py) = origin(cx, cy);
    let glow = SPEED_COLOR.lerp(BOLT_HIGHLIGHT, 0.12);
    for y in 0..CELL_SIZE {
        for x in 0..CELL_SIZE {
            if in_bolt(x, y) {
                let t = 0.8 + 0.2 * y as f32 / CELL_SIZE as f32;
                let mut col = SPEED_COLOR.scale(t);
                if x < HALF {
                    col = col.lerp(BOLT_HIGHLIGHT, 0.18);
                }
                if x == HALF || y == HALF {
                    col = col.lerp(Rgb::WHITE, 0.18);
                }
                fb.set(px + x, py + y, col);
            } else if y > 1 && y < CELL_SIZE - 1 && x > 1 && x < CELL_SIZE - 1 && (x + y) % 7 == 0 {
                fb.set(px + x, py + y, glow);
            }
        }
    }
}

/// Grey stone block: vertical gradient, bevel, coordinate-keyed speckle and cracks.
pub fn draw_stone(fb: &mut FrameBuffer, cx: i32, cy: i32) {
    let (px, py) = origin(cx, cy);
    for y in 0..CELL_SIZE {
        for x in 0..CELL_SIZE {
            let t = y as f32 / CELL_SIZE as f32;
            let mut v = 110u8 + (30.0 * t) as u8;
            if x < 2 || y < 2 {
                v += 40;
            }
            let mut col = Rgb::new(v, v, v);
            if x > CELL_SIZE - 3 || y > CELL_SIZE - 3 {
                col = col.scale(0.7);
            }
            if (x * y + cx * 13 + cy * 7) % 17 == 0 {
                col = col.scale(0.8);
            }
            if (x == HALF && y > CELL_SIZE / 4) || (y == HALF && x > CELL_SIZE / 4) {
                col = col.scale(0.4);
            }
            if x == y && x > 3 && x < CELL_SIZE - 3 {
                col = col.scale(0.5);
            }
            fb.set(px + x, py + y, col);
        }
    }
}
