//! Owned RGBA raster with just enough drawing primitives for wafer maps:
//! filled rectangles, one-pixel outlines, and bitmap-font text. All drawing
//! is clipped at the buffer edge, so callers can position labels without
//! worrying about the margins.

use std::path::Path;

use super::font::{glyph, text_width, GLYPH_W};
use super::{Rgba, RenderError, RenderResult};

/// RGBA pixel buffer, 4 bytes per pixel, rows top to bottom.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a buffer filled with one color.
    pub fn new(width: u32, height: u32, fill: Rgba) -> Self {
        let pixels = width as usize * height as usize;
        Self { width, height, data: fill.repeat(pixels) }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Read one pixel; `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        Some([self.data[idx], self.data[idx + 1], self.data[idx + 2], self.data[idx + 3]])
    }

    /// Write one pixel. Out-of-range coordinates are ignored.
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.data[idx..idx + 4].copy_from_slice(&color);
    }

    /// Fill a `w` x `h` rectangle whose top-left corner is `(x, y)`.
    pub fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: Rgba) {
        for dy in 0..h as i64 {
            for dx in 0..w as i64 {
                self.set_pixel(x + dx, y + dy, color);
            }
        }
    }

    /// One-pixel outline of the same rectangle `fill_rect` covers.
    pub fn draw_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: Rgba) {
        if w == 0 || h == 0 {
            return;
        }
        let (w, h) = (w as i64, h as i64);
        for dx in 0..w {
            self.set_pixel(x + dx, y, color);
            self.set_pixel(x + dx, y + h - 1, color);
        }
        for dy in 0..h {
            self.set_pixel(x, y + dy, color);
            self.set_pixel(x + w - 1, y + dy, color);
        }
    }

    /// Draw a string with its top-left corner at `(x, y)`.
    pub fn draw_text(&mut self, x: i64, y: i64, text: &str, color: Rgba) {
        for (i, ch) in text.chars().enumerate() {
            self.draw_char(x + i as i64 * GLYPH_W as i64, y, ch, color);
        }
    }

    /// Pixel width `draw_text` will occupy for `text`.
    pub fn text_width(text: &str) -> u32 {
        text_width(text)
    }

    fn draw_char(&mut self, x: i64, y: i64, ch: char, color: Rgba) {
        let rows = glyph(ch);
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..5i64 {
                if bits & (0x10 >> col) != 0 {
                    self.set_pixel(x + col, y + row as i64, color);
                }
            }
        }
    }

    /// Encode the buffer as a PNG file.
    pub fn save_png(&self, path: &Path) -> RenderResult<()> {
        image::save_buffer(path, &self.data, self.width, self.height, image::ColorType::Rgba8)
            .map_err(RenderError::Encode)
    }
}
