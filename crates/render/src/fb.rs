//! Pixel framebuffer.
//!
//! Row-major, one packed `0x00RRGGBB` word per pixel, pitch equal to
//! `width * 4` bytes. All drawing goes through [`FrameBuffer::set`], which
//! silently drops writes outside the buffer, so sprites may straddle an edge.

use snek_types::{Rgb, FB_HEIGHT, FB_WIDTH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per row.
    pub fn pitch(&self) -> usize {
        self.width * std::mem::size_of::<u32>()
    }

    /// Resize the framebuffer.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: usize, height: usize) {
        if self.width == width && self.height == height {
            return;
        }
        log::debug!("framebuffer resize {}x{} -> {}x{}", self.width, self.height, width, height);
        self.width = width;
        self.height = height;
        self.pixels.resize(width * height, 0);
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Rgb> {
        self.idx(x, y).map(|i| Rgb::from_xrgb(self.pixels[i]))
    }

    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(i) = self.idx(x, y) {
            self.pixels[i] = color.to_xrgb();
        }
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color.to_xrgb());
    }

    /// Fill one whole row; out-of-range rows are ignored.
    pub fn fill_row(&mut self, y: i32, color: Rgb) {
        if y < 0 || y as usize >= self.height {
            return;
        }
        let start = y as usize * self.width;
        self.pixels[start..start + self.width].fill(color.to_xrgb());
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb) {
        for yy in 0..h {
            for xx in 0..w {
                self.set(x + xx, y + yy, color);
            }
        }
    }

    /// Multiply every pixel by `factor` (per channel, truncating).
    pub fn darken(&mut self, factor: f32) {
        for px in &mut self.pixels {
            *px = Rgb::from_xrgb(*px).scale(factor).to_xrgb();
        }
    }
}

impl Default for FrameBuffer {
    /// A buffer the size of the game screen.
    fn default() -> Self {
        Self::new(FB_WIDTH, FB_HEIGHT)
    }
}
