//! ScreenView: downsamples the pixel frame into a terminal cell buffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Each terminal cell covers a `scale` x `2 * scale` pixel block: the top half
//! block becomes the foreground color and the bottom half the background, both
//! box-averaged. Typical terminal glyphs are twice as tall as wide, so this
//! keeps pixels roughly square.

use snek_render::FrameBuffer;
use snek_types::Rgb;

use crate::cells::{CellBuffer, CellStyle, TermCell};

pub const MIN_SCALE: u16 = 1;
pub const MAX_SCALE: u16 = 16;
pub const DEFAULT_SCALE: u16 = 8;

const HELP: &str = "arrows move  enter start/pause  tab reset hi  q quit";

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenView {
    /// Pixels per terminal column.
    scale: u16,
    show_help: bool,
}

impl Default for ScreenView {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE)
    }
}

impl ScreenView {
    /// `scale` is clamped to `MIN_SCALE..=MAX_SCALE`.
    pub fn new(scale: u16) -> Self {
        Self {
            scale: scale.clamp(MIN_SCALE, MAX_SCALE),
            show_help: true,
        }
    }

    pub fn with_help(mut self, show_help: bool) -> Self {
        self.show_help = show_help;
        self
    }

    pub fn scale(&self) -> u16 {
        self.scale
    }

    /// Terminal cells needed to show a `width` x `height` pixel frame.
    pub fn cells_for(&self, width: usize, height: usize) -> (u16, u16) {
        let s = self.scale as usize;
        let cols = width.div_ceil(s);
        let rows = height.div_ceil(2 * s);
        (cols.min(u16::MAX as usize) as u16, rows.min(u16::MAX as usize) as u16)
    }

    /// Render `frame` centred in the viewport. Cells that fall outside the
    /// viewport are clipped.
    pub fn render_into(&self, frame: &FrameBuffer, viewport: Viewport, out: &mut CellBuffer) {
        out.resize(viewport.width, viewport.height);
        out.clear(TermCell::default());

        let (cols, rows) = self.cells_for(frame.width(), frame.height());
        let reserve = u16::from(self.show_help);
        let start_x = viewport.width.saturating_sub(cols) / 2;
        let start_y = viewport.height.saturating_sub(rows + reserve) / 2;

        let s = self.scale as i32;
        for row in 0..rows.min(viewport.height) {
            for col in 0..cols.min(viewport.width) {
                let px = col as i32 * s;
                let py = row as i32 * 2 * s;
                let top = block_average(frame, px, py, s);
                let bottom = block_average(frame, px, py + s, s);
                out.set(start_x + col, start_y + row, TermCell::half_block(top, bottom));
            }
        }

        if self.show_help {
            let y = start_y + rows;
            if y < viewport.height {
                let x = viewport.width.saturating_sub(HELP.len() as u16) / 2;
                let style = CellStyle {
                    fg: Rgb::new(140, 140, 150),
                    bg: Rgb::BLACK,
                };
                out.put_str(x, y, HELP, style);
            }
        }
    }

    /// Convenience helper that allocates a new cell buffer.
    pub fn render(&self, frame: &FrameBuffer, viewport: Viewport) -> CellBuffer {
        let mut out = CellBuffer::new(viewport.width, viewport.height);
        self.render_into(frame, viewport, &mut out);
        out
    }
}

/// Mean color of the `size` x `size` block at (`x`, `y`), ignoring pixels
/// outside the frame. A block entirely outside is black.
fn block_average(frame: &FrameBuffer, x: i32, y: i32, size: i32) -> Rgb {
    let (mut r, mut g, mut b, mut n) = (0u32, 0u32, 0u32, 0u32);
    for yy in y..y + size {
        for xx in x..x + size {
            if let Some(c) = frame.get(xx, yy) {
                r += c.r as u32;
                g += c.g as u32;
                b += c.b as u32;
                n += 1;
            }
        }
    }
    if n == 0 {
        return Rgb::BLACK;
    }
    Rgb::new((r / n) as u8, (g / n) as u8, (b / n) as u8)
}
