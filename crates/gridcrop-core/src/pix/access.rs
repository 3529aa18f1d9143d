//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.
//! Getters return `None` for out-of-bounds coordinates; setters return
//! [`Error::IndexOutOfBounds`].

use super::{Pix, PixData, PixMut};
use crate::error::{Error, Result};

impl PixData {
    #[inline]
    fn rgb_at(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some((self.data[i], self.data[i + 1], self.data[i + 2]))
    }

    #[inline]
    fn rgba_at(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        let (r, g, b) = self.rgb_at(x, y)?;
        let a = if self.spp >= 4 {
            self.data[self.offset(x, y) + 3]
        } else {
            255
        };
        Some((r, g, b, a))
    }

    fn out_of_bounds(&self, x: u32, y: u32) -> Error {
        Error::IndexOutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}

impl Pix {
    /// Get RGB values at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        self.inner.rgb_at(x, y)
    }

    /// Get RGBA values at (x, y).
    ///
    /// Images without an alpha channel report alpha as 255.
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        self.inner.rgba_at(x, y)
    }
}

impl PixMut {
    /// Get RGB values at (x, y).
    #[inline]
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        self.inner.rgb_at(x, y)
    }

    /// Get RGBA values at (x, y).
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        self.inner.rgba_at(x, y)
    }

    /// Set an RGB pixel at (x, y).
    ///
    /// Alpha, if present, is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        if x >= self.inner.width || y >= self.inner.height {
            return Err(self.inner.out_of_bounds(x, y));
        }
        self.set_rgb_unchecked(x, y, r, g, b);
        Ok(())
    }

    /// Set an RGBA pixel at (x, y).
    ///
    /// On 3-sample images the alpha value is discarded.
    pub fn set_rgba(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) -> Result<()> {
        if x >= self.inner.width || y >= self.inner.height {
            return Err(self.inner.out_of_bounds(x, y));
        }
        self.set_rgb_unchecked(x, y, r, g, b);
        if self.inner.spp >= 4 {
            let i = self.inner.offset(x, y);
            self.inner.data[i + 3] = a;
        }
        Ok(())
    }

    /// Set an RGB pixel without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_rgb_unchecked(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) {
        let i = self.inner.offset(x, y);
        self.inner.data[i] = r;
        self.inner.data[i + 1] = g;
        self.inner.data[i + 2] = b;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_rgb() {
        let mut pm = Pix::new(5, 5, 3).unwrap().to_mut();
        pm.set_rgb(2, 3, 10, 20, 30).unwrap();
        assert_eq!(pm.get_rgb(2, 3), Some((10, 20, 30)));
        let pix: Pix = pm.into();
        assert_eq!(pix.get_rgb(2, 3), Some((10, 20, 30)));
        assert_eq!(pix.get_rgb(5, 0), None);
        assert_eq!(pix.get_rgb(0, 5), None);
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut pm = Pix::new(5, 5, 3).unwrap().to_mut();
        assert!(matches!(
            pm.set_rgb(5, 0, 0, 0, 0),
            Err(Error::IndexOutOfBounds { x: 5, y: 0, .. })
        ));
    }

    #[test]
    fn test_rgba_alpha_handling() {
        let mut pm = Pix::new(2, 1, 4).unwrap().to_mut();
        pm.set_rgba(0, 0, 1, 2, 3, 128).unwrap();
        assert_eq!(pm.get_rgba(0, 0), Some((1, 2, 3, 128)));

        let mut rgb = Pix::new(2, 1, 3).unwrap().to_mut();
        rgb.set_rgba(0, 0, 1, 2, 3, 128).unwrap();
        assert_eq!(rgb.get_rgba(0, 0), Some((1, 2, 3, 255)));
    }
}
