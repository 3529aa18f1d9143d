//! Page image container
//!
//! The `Pix` structure holds a decoded page image as row-major 8-bit
//! samples with 3 (RGB) or 4 (RGBA) samples per pixel.
//!
//! # Pixel layout
//!
//! - Rows are stored top to bottom with no padding
//! - Each pixel is `spp` consecutive bytes in R, G, B[, A] order
//! - Alpha, when present, is carried but never consulted by detection
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for cheap cloning (shared ownership), so one decoded
//! page can be handed to several workers at once. To modify pixel data,
//! convert to `PixMut` via [`Pix::try_into_mut`] or [`Pix::to_mut`], then
//! convert back with `Into<Pix>`.

mod access;
mod clip;
pub mod graphics;
mod source;
mod view;

pub use clip::crop;
pub use graphics::Color;
pub use source::PixelSource;
pub use view::PixView;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Internal image storage shared by [`Pix`] and [`PixMut`]
#[derive(Debug, Clone)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Samples per pixel (3 = RGB, 4 = RGBA)
    spp: u32,
    /// Row-major sample data, `width * height * spp` bytes
    data: Vec<u8>,
}

impl PixData {
    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.spp as usize
    }
}

/// Owned page image
///
/// `Pix` uses reference counting via `Arc` for efficient cloning.
///
/// # Examples
///
/// ```
/// use gridcrop_core::Pix;
///
/// let pix = Pix::new(640, 480, 3).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// assert_eq!(pix.get_rgb(0, 0), Some((0, 0, 0)));
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new image with the specified dimensions.
    ///
    /// The image data is initialized to zero (opaque black for RGBA is
    /// not implied; alpha starts at 0 as well).
    ///
    /// # Arguments
    ///
    /// * `width` - Width in pixels (must be > 0)
    /// * `height` - Height in pixels (must be > 0)
    /// * `spp` - Samples per pixel, 3 or 4
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0 and
    /// [`Error::InvalidSpp`] if `spp` is not 3 or 4.
    pub fn new(width: u32, height: u32, spp: u32) -> Result<Self> {
        Self::check_geometry(width, height, spp)?;
        let data = vec![0u8; Self::buffer_len(width, height, spp)];
        Ok(Pix {
            inner: Arc::new(PixData {
                width,
                height,
                spp,
                data,
            }),
        })
    }

    /// Create a new image with every pixel set to `color`.
    ///
    /// Alpha, if present, is set to 255.
    pub fn new_filled(width: u32, height: u32, spp: u32, color: Color) -> Result<Self> {
        let mut pm = Pix::new(width, height, spp)?.to_mut();
        pm.fill(color);
        Ok(pm.into())
    }

    /// Wrap an already-decoded row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the geometry is invalid or `data` does not
    /// hold exactly `width * height * spp` bytes.
    pub fn from_raw(width: u32, height: u32, spp: u32, data: Vec<u8>) -> Result<Self> {
        Self::check_geometry(width, height, spp)?;
        let expected = Self::buffer_len(width, height, spp);
        if data.len() != expected {
            return Err(Error::BufferTooSmall {
                expected,
                actual: data.len(),
            });
        }
        Ok(Pix {
            inner: Arc::new(PixData {
                width,
                height,
                spp,
                data,
            }),
        })
    }

    fn check_geometry(width: u32, height: u32, spp: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if spp != 3 && spp != 4 {
            return Err(Error::InvalidSpp(spp));
        }
        Ok(())
    }

    #[inline]
    fn buffer_len(width: u32, height: u32, spp: u32) -> usize {
        width as usize * height as usize * spp as usize
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the number of samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Get the raw sample data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row_data(&self, y: u32) -> &[u8] {
        let stride = self.inner.width as usize * self.inner.spp as usize;
        let start = y as usize * stride;
        &self.inner.data[start..start + stride]
    }

    /// Check if two images have the same width and height.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.width() == other.width() && self.height() == other.height()
    }

    /// Create a deep copy of this image.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Pix {
            inner: Arc::new((*self.inner).clone()),
        }
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Create a mutable copy of this image.
    ///
    /// Always creates a new copy that can be modified.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable page image
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the number of samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Get the raw sample data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get mutable access to the raw sample data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }
}

impl From<PixMut> for Pix {
    fn from(pm: PixMut) -> Self {
        Pix {
            inner: Arc::new(pm.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_zeroed() {
        let pix = Pix::new(4, 3, 3).unwrap();
        assert_eq!(pix.data().len(), 36);
        assert!(pix.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_new_rejects_bad_geometry() {
        assert!(matches!(
            Pix::new(0, 10, 3),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(matches!(Pix::new(10, 0, 4), Err(Error::InvalidDimension { .. })));
        assert!(matches!(Pix::new(10, 10, 1), Err(Error::InvalidSpp(1))));
    }

    #[test]
    fn test_from_raw_length_check() {
        assert!(Pix::from_raw(2, 2, 3, vec![0; 12]).is_ok());
        assert!(matches!(
            Pix::from_raw(2, 2, 4, vec![0; 12]),
            Err(Error::BufferTooSmall {
                expected: 16,
                actual: 12
            })
        ));
    }

    #[test]
    fn test_try_into_mut_shared() {
        let pix = Pix::new(2, 2, 3).unwrap();
        let shared = pix.clone();
        let pix = pix.try_into_mut().unwrap_err();
        drop(shared);
        assert!(pix.try_into_mut().is_ok());
    }

    #[test]
    fn test_deep_clone_is_independent() {
        let pix = Pix::new_filled(3, 3, 3, Color::WHITE).unwrap();
        let copy = pix.deep_clone();
        let mut pm = copy.try_into_mut().unwrap();
        pm.set_rgb(1, 1, 0, 0, 0).unwrap();
        assert_eq!(pix.get_rgb(1, 1), Some((255, 255, 255)));
    }

    #[test]
    fn test_row_data() {
        let pix = Pix::from_raw(2, 2, 3, (0..12).collect()).unwrap();
        assert_eq!(pix.row_data(1), &[6, 7, 8, 9, 10, 11]);
    }
}
