//! Graphics rendering functions
//!
//! Axis-aligned drawing on RGB images: filled rectangles, straight
//! horizontal and vertical strokes, and rectangle outlines. Everything
//! clips silently at the image edge.

use super::PixMut;
use crate::bounds::GridBounds;

/// RGB color for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a new color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a neutral gray
    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Black color
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    /// White color
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Convert to grayscale value (0-255)
    pub fn to_gray(&self) -> u8 {
        ((self.r as u32 + self.g as u32 + self.b as u32) / 3) as u8
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl PixMut {
    /// Set every pixel to `color`; alpha, if present, becomes 255.
    pub fn fill(&mut self, color: Color) {
        let spp = self.spp() as usize;
        for px in self.data_mut().chunks_exact_mut(spp) {
            px[0] = color.r;
            px[1] = color.g;
            px[2] = color.b;
            if spp >= 4 {
                px[3] = 255;
            }
        }
    }

    /// Fill the rectangle with top-left (x, y) and size `w` x `h`.
    ///
    /// Parts outside the image are ignored.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        let x0 = x.max(0) as i64;
        let y0 = y.max(0) as i64;
        let x1 = (x as i64 + w as i64).min(self.width() as i64);
        let y1 = (y as i64 + h as i64).min(self.height() as i64);
        for yy in y0..y1 {
            for xx in x0..x1 {
                self.set_rgb_unchecked(xx as u32, yy as u32, color.r, color.g, color.b);
            }
        }
    }

    /// Draw a horizontal stroke covering columns `x1..=x2` and rows
    /// `y..y + width`.
    pub fn render_hline(&mut self, x1: i32, x2: i32, y: i32, width: u32, color: Color) {
        let (lo, hi) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        self.fill_rect(lo, y, (hi - lo + 1) as u32, width, color);
    }

    /// Draw a vertical stroke covering rows `y1..=y2` and columns
    /// `x..x + width`.
    pub fn render_vline(&mut self, x: i32, y1: i32, y2: i32, width: u32, color: Color) {
        let (lo, hi) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        self.fill_rect(x, lo, width, (hi - lo + 1) as u32, color);
    }

    /// Draw the outline of `b` with strokes `width` pixels thick, drawn
    /// inward from the rectangle's outer edge.
    pub fn render_box(&mut self, b: &GridBounds, width: u32, color: Color) {
        if b.is_empty() {
            return;
        }
        let x = b.x as i32;
        let y = b.y as i32;
        let right = b.right() as i32 - 1;
        let bottom = b.bottom() as i32 - 1;
        let w = width as i32;
        self.render_hline(x, right, y, width, color);
        self.render_hline(x, right, bottom - w + 1, width, color);
        self.render_vline(x, y, bottom, width, color);
        self.render_vline(right - w + 1, y, bottom, width, color);
    }
}
