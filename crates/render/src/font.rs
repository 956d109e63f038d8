//! 8x8 bitmap font and seven-segment digits.
//!
//! The font only covers `A`-`Z` and `0`-`9`. Space advances the pen without
//! drawing; any other character is skipped but still advances.

use snek_types::Rgb;

use crate::fb::FrameBuffer;

/// Horizontal pen advance per character.
pub const GLYPH_ADVANCE: i32 = 8;

/// Seven-segment digit cell.
pub const DIGIT_WIDTH: i32 = 20;
pub const DIGIT_HEIGHT: i32 = 36;
pub const SEGMENT_THICKNESS: i32 = 4;

/// Rows top to bottom; bit 7 is the leftmost pixel.
const GLYPHS: [(char, [u8; 8]); 36] = [
    ('A', [0x38, 0x44, 0x44, 0x7c, 0x44, 0x44, 0x44, 0x00]),
    ('B', [0x78, 0x44, 0x44, 0x78, 0x44, 0x44, 0x78, 0x00]),
    ('C', [0x38, 0x44, 0x40, 0x40, 0x40, 0x44, 0x38, 0x00]),
    ('D', [0x78, 0x44, 0x44, 0x44, 0x44, 0x44, 0x78, 0x00]),
    ('E', [0x7c, 0x40, 0x40, 0x78, 0x40, 0x40, 0x7c, 0x00]),
    ('F', [0x7c, 0x40, 0x40, 0x78, 0x40, 0x40, 0x40, 0x00]),
    ('G', [0x38, 0x44, 0x40, 0x5c, 0x44, 0x44, 0x38, 0x00]),
    ('H', [0x44, 0x44, 0x44, 0x7c, 0x44, 0x44, 0x44, 0x00]),
    ('I', [0x3c, 0x10, 0x10, 0x10, 0x10, 0x10, 0x3c, 0x00]),
    ('J', [0x1c, 0x08, 0x08, 0x08, 0x08, 0x48, 0x30, 0x00]),
    ('K', [0x44, 0x48, 0x50, 0x60, 0x50, 0x48, 0x44, 0x00]),
    ('L', [0x40, 0x40, 0x40, 0x40, 0x40, 0x40, 0x7c, 0x00]),
    ('M', [0x44, 0x6c, 0x54, 0x54, 0x44, 0x44, 0x44, 0x00]),
    ('N', [0x44, 0x64, 0x54, 0x4c, 0x44, 0x44, 0x44, 0x00]),
    ('O', [0x38, 0x44, 0x44, 0x44, 0x44, 0x44, 0x38, 0x00]),
    ('P', [0x78, 0x44, 0x44, 0x78, 0x40, 0x40, 0x40, 0x00]),
    ('Q', [0x38, 0x44, 0x44, 0x44, 0x54, 0x48, 0x34, 0x00]),
    ('R', [0x78, 0x44, 0x44, 0x78, 0x50, 0x48, 0x44, 0x00]),
    ('S', [0x38, 0x44, 0x20, 0x18, 0x04, 0x44, 0x38, 0x00]),
    ('T', [0x7c, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x00]),
    ('U', [0x44, 0x44, 0x44, 0x44, 0x44, 0x44, 0x38, 0x00]),
    ('V', [0x44, 0x44, 0x44, 0x44, 0x44, 0x28, 0x10, 0x00]),
    ('W', [0x44, 0x44, 0x44, 0x54, 0x54, 0x6c, 0x44, 0x00]),
    ('X', [0x44, 0x44, 0x28, 0x10, 0x28, 0x44, 0x44, 0x00]),
    ('Y', [0x44, 0x44, 0x28, 0x10, 0x10, 0x10, 0x3c, 0x00]),
    ('Z', [0x7c, 0x04, 0x08, 0x10, 0x20, 0x40, 0x7c, 0x00]),
    ('0', [0x38, 0x44, 0x4c, 0x54, 0x64, 0x44, 0x38, 0x00]),
    ('1', [0x10, 0x30, 0x10, 0x10, 0x10, 0x10, 0x38, 0x00]),
    ('2', [0x38, 0x44, 0x04, 0x08, 0x10, 0x20, 0x7c, 0x00]),
    ('3', [0x38, 0x44, 0x04, 0x18, 0x04, 0x44, 0x38, 0x00]),
    ('4', [0x08, 0x18, 0x28, 0x48, 0x7c, 0x08, 0x08, 0x00]),
    ('5', [0x7c, 0x40, 0x78, 0x04, 0x04, 0x44, 0x38, 0x00]),
    ('6', [0x18, 0x20, 0x40, 0x78, 0x44, 0x44, 0x38, 0x00]),
    ('7', [0x7c, 0x04, 0x08, 0x10, 0x20, 0x20, 0x20, 0x00]),
    ('8', [0x38, 0x44, 0x44, 0x38, 0x44, 0x44, 0x38, 0x00]),
    ('9', [0x38, 0x44, 0x44, 0x3c, 0x04, 0x08, 0x30, 0x00]),
];

/// Segment masks `0babcdefg` (bit 6 is a, bit 0 is g).
const SEVEN_SEG: [u8; 10] = [
    0b1111110, 0b0110000, 0b1101101, 0b1111001, 0b0110011, 0b1011011, 0b1011111, 0b1110000,
    0b1111111, 0b1111011,
];

pub fn glyph(ch: char) -> Option<&'static [u8; 8]> {
    GLYPHS.iter().find(|(c, _)| *c == ch).map(|(_, bits)| bits)
}

/// Width in pixels of `text` when drawn with [`draw_text`].
pub fn text_width(text: &str) -> i32 {
    text.chars().count() as i32 * GLYPH_ADVANCE
}

/// Left edge that centres `text` on a screen `screen_width` pixels wide.
pub fn centered_x(text: &str, screen_width: usize) -> i32 {
    (screen_width as i32 - text_width(text)) / 2
}

/// Draw `text` with its top-left corner at (`x`, `y`). Only set bits are written.
pub fn draw_text(fb: &mut FrameBuffer, x: i32, y: i32, text: &str, color: Rgb) {
    let mut pen = x;
    for ch in text.chars() {
        if let Some(rows) = glyph(ch) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..8 {
                    if bits & (0x80 >> col) != 0 {
                        fb.set(pen + col, y + row as i32, color);
                    }
                }
            }
        }
        pen += GLYPH_ADVANCE;
    }
}

/// Draw one seven-segment digit in a [`DIGIT_WIDTH`]x[`DIGIT_HEIGHT`] cell.
///
/// Values above 9 draw nothing.
pub fn draw_digit(fb: &mut FrameBuffer, x: i32, y: i32, value: u32, color: Rgb) {
    let Some(&mask) = SEVEN_SEG.get(value as usize) else {
        return;
    };
    let (w, h, t) = (DIGIT_WIDTH, DIGIT_HEIGHT, SEGMENT_THICKNESS);

    // (bit, x, y, w, h) relative to the digit cell.
    let segments = [
        (6, t, 0, w - 2 * t, t),
        (5, w - t, t, t, h / 2 - t),
        (4, w - t, h / 2, t, h / 2 - t),
        (3, t, h - t, w - 2 * t, t),
        (2, 0, h / 2, t, h / 2 - t),
        (1, 0, t, t, h / 2 - t),
        (0, t, h / 2 - t / 2, w - 2 * t, t),
    ];
    for (bit, sx, sy, sw, sh) in segments {
        if mask & (1 << bit) != 0 {
            fb.fill_rect(x + sx, y + sy, sw, sh, color);
        }
    }
}

/// Draw the last `digits` decimal digits of `value`, most significant first.
pub fn draw_number(fb: &mut FrameBuffer, x: i32, y: i32, value: u32, digits: u32, color: Rgb) {
    let mut rest = value;
    for i in 0..digits as i32 {
        let dx = x + (digits as i32 - 1 - i) * (DIGIT_WIDTH + SEGMENT_THICKNESS);
        draw_digit(fb, dx, y, rest % 10, color);
        rest /= 10;
    }
}
