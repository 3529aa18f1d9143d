//! Dark-pixel predicate over a pixel source

use crate::DetectionConfig;
use gridcrop_core::PixelSource;

/// A pixel source paired with the configuration of the current call
///
/// Coordinates are signed so callers can sample outside the image
/// without range checks; such samples are simply never dark.
pub struct PixelContext<'a> {
    source: &'a dyn PixelSource,
    config: &'a DetectionConfig,
    width: i32,
    height: i32,
}

impl<'a> PixelContext<'a> {
    pub fn new(source: &'a dyn PixelSource, config: &'a DetectionConfig) -> Self {
        Self {
            source,
            config,
            width: source.width().min(i32::MAX as u32) as i32,
            height: source.height().min(i32::MAX as u32) as i32,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn config(&self) -> &'a DetectionConfig {
        self.config
    }

    /// True iff (x, y) is inside the image and R, G and B are all
    /// strictly below the dark-pixel threshold.
    #[inline]
    pub fn is_dark(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        let t = self.config.dark_pixel_threshold;
        match self.source.rgb(x as u32, y as u32) {
            Some((r, g, b)) => r < t && g < t && b < t,
            None => false,
        }
    }

    /// Any dark pixel in the inclusive rectangle `[x0, x1] x [y0, y1]`
    pub fn any_dark(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> bool {
        (y0..=y1).any(|y| (x0..=x1).any(|x| self.is_dark(x, y)))
    }
}
