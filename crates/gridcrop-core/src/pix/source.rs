//! Read-only pixel access capability
//!
//! Detection only ever needs the image size and the RGB triple at a
//! coordinate. Anything that can answer those questions can be fed to
//! the detector: an owned [`Pix`], a [`PixView`] over a caller's decoded
//! buffer, or a caller-defined surface.

use super::{Pix, PixMut, PixView};

/// A readable RGB pixel surface
///
/// Implementations must be cheap to query per pixel; the detector calls
/// [`rgb`](PixelSource::rgb) many times per scan line.
pub trait PixelSource {
    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// RGB values at (x, y), or `None` outside the image
    fn rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)>;
}

impl PixelSource for Pix {
    #[inline]
    fn width(&self) -> u32 {
        Pix::width(self)
    }

    #[inline]
    fn height(&self) -> u32 {
        Pix::height(self)
    }

    #[inline]
    fn rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        self.get_rgb(x, y)
    }
}

impl PixelSource for PixMut {
    #[inline]
    fn width(&self) -> u32 {
        PixMut::width(self)
    }

    #[inline]
    fn height(&self) -> u32 {
        PixMut::height(self)
    }

    #[inline]
    fn rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        self.get_rgb(x, y)
    }
}

impl PixelSource for PixView<'_> {
    #[inline]
    fn width(&self) -> u32 {
        PixView::width(self)
    }

    #[inline]
    fn height(&self) -> u32 {
        PixView::height(self)
    }

    #[inline]
    fn rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        self.get_rgb(x, y)
    }
}
