//! Borrowed view over an external pixel buffer
//!
//! Batch callers usually already hold a decoded, row-major buffer (for
//! example straight out of a rasterizer). `PixView` reads it in place
//! instead of copying it into a [`Pix`](super::Pix).

use crate::error::{Error, Result};

/// Read-only view of a row-major 8-bit buffer with at least 3 samples
/// per pixel
///
/// Samples beyond the third (alpha or padding) are ignored.
#[derive(Debug, Clone, Copy)]
pub struct PixView<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    spp: u32,
    stride: usize,
}

impl<'a> PixView<'a> {
    /// Create a view over tightly packed rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are zero, `spp < 3`, or the
    /// buffer is too short.
    pub fn new(data: &'a [u8], width: u32, height: u32, spp: u32) -> Result<Self> {
        Self::with_stride(data, width, height, spp, width as usize * spp as usize)
    }

    /// Create a view whose rows are `stride` bytes apart.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are zero, `spp < 3`, the stride
    /// is shorter than a row, or the buffer is too short.
    pub fn with_stride(
        data: &'a [u8],
        width: u32,
        height: u32,
        spp: u32,
        stride: usize,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if spp < 3 {
            return Err(Error::InvalidSpp(spp));
        }
        let row_len = width as usize * spp as usize;
        if stride < row_len {
            return Err(Error::InvalidParameter(format!(
                "stride {} shorter than row length {}",
                stride, row_len
            )));
        }
        let expected = stride * (height as usize - 1) + row_len;
        if data.len() < expected {
            return Err(Error::BufferTooSmall {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            spp,
            stride,
        })
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Samples per pixel
    #[inline]
    pub fn spp(&self) -> u32 {
        self.spp
    }

    /// RGB values at (x, y), or `None` outside the view
    #[inline]
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = y as usize * self.stride + x as usize * self.spp as usize;
        Some((self.data[i], self.data[i + 1], self.data[i + 2]))
    }
}
