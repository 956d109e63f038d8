//! Character-cell buffer for terminal output.
//!
//! Each cell is one glyph with a foreground and background color. The pixel
//! frame is shown with the upper-half block `▀`: the foreground paints the top
//! pixel row of the cell and the background paints the bottom one.

use snek_types::Rgb;

pub const UPPER_HALF: char = '▀';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::BLACK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermCell {
    pub ch: char,
    pub style: CellStyle,
}

impl TermCell {
    /// Two stacked pixels in one cell.
    pub fn half_block(top: Rgb, bottom: Rgb) -> Self {
        Self {
            ch: UPPER_HALF,
            style: CellStyle { fg: top, bg: bottom },
        }
    }
}

impl Default for TermCell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellBuffer {
    width: u16,
    height: u16,
    cells: Vec<TermCell>,
}

impl CellBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![TermCell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize, keeping the allocation when it is large enough.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.cells.resize(width as usize * height as usize, TermCell::default());
    }

    pub fn cells(&self) -> &[TermCell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<TermCell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: TermCell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: TermCell) {
        self.cells.fill(cell);
    }

    /// Write `s` left to right, clipped at the right edge.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        for (cx, ch) in (x..self.width).zip(s.chars()) {
            self.set(cx, y, TermCell { ch, style });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_str_clips() {
        let mut buf = CellBuffer::new(4, 1);
        buf.put_str(2, 0, "abc", CellStyle::default());
        assert_eq!(buf.get(2, 0).map(|c| c.ch), Some('a'));
        assert_eq!(buf.get(3, 0).map(|c| c.ch), Some('b'));
        assert_eq!(buf.get(4, 0), None);
    }

    #[test]
    fn test_resize_and_half_block() {
        let mut buf = CellBuffer::new(2, 2);
        buf.resize(3, 1);
        assert_eq!(buf.cells().len(), 3);
        let cell = TermCell::half_block(Rgb::WHITE, Rgb::BLACK);
        buf.set(2, 0, cell);
        assert_eq!(buf.get(2, 0), Some(cell));
        assert_eq!(cell.style.fg, Rgb::WHITE);
    }
}
