//! Rectangle clipping operations for images
//!
//! Extracting the detected grid from a page, and placing an extracted
//! region back onto a canvas.

use super::{Pix, PixMut, PixelSource};
use crate::bounds::GridBounds;
use crate::error::{Error, Result};

/// Extract the region `bounds` from any pixel source.
///
/// This is a pure sub-image extraction: no resizing, no resampling. The
/// output is an RGB `Pix` whose dimensions are exactly
/// `bounds.width x bounds.height`.
///
/// # Errors
///
/// Returns an error if `bounds` is empty or does not lie entirely
/// within the source image.
///
/// # Examples
///
/// ```
/// use gridcrop_core::{GridBounds, Pix, crop};
///
/// let pix = Pix::new(100, 80, 3).unwrap();
/// let cropped = crop(&pix, &GridBounds::new(10, 20, 50, 40)).unwrap();
/// assert_eq!(cropped.width(), 50);
/// assert_eq!(cropped.height(), 40);
/// ```
pub fn crop(source: &dyn PixelSource, bounds: &GridBounds) -> Result<Pix> {
    check_region(bounds, source.width(), source.height())?;

    let mut pm = Pix::new(bounds.width, bounds.height, 3)?.to_mut();
    for dy in 0..bounds.height {
        for dx in 0..bounds.width {
            if let Some((r, g, b)) = source.rgb(bounds.x + dx, bounds.y + dy) {
                pm.set_rgb_unchecked(dx, dy, r, g, b);
            }
        }
    }
    Ok(pm.into())
}

fn check_region(bounds: &GridBounds, width: u32, height: u32) -> Result<()> {
    if bounds.is_empty() {
        return Err(Error::InvalidParameter(format!(
            "crop rectangle has zero dimension: {}x{}",
            bounds.width, bounds.height
        )));
    }
    if !bounds.fits_within(width, height) {
        return Err(Error::RegionOutsideImage {
            x: bounds.x,
            y: bounds.y,
            w: bounds.width,
            h: bounds.height,
            width,
            height,
        });
    }
    Ok(())
}

impl Pix {
    /// Extract a rectangular sub-region from the image.
    ///
    /// Unlike [`crop`], the output keeps this image's samples per pixel,
    /// so alpha survives the copy.
    ///
    /// # Errors
    ///
    /// Returns an error if `bounds` is empty or extends past the image.
    pub fn crop(&self, bounds: &GridBounds) -> Result<Pix> {
        check_region(bounds, self.width(), self.height())?;

        let spp = self.spp() as usize;
        let src_stride = self.width() as usize * spp;
        let row_len = bounds.width as usize * spp;
        let mut data = Vec::with_capacity(row_len * bounds.height as usize);
        for y in bounds.y..bounds.bottom() {
            let start = y as usize * src_stride + bounds.x as usize * spp;
            data.extend_from_slice(&self.data()[start..start + row_len]);
        }
        Pix::from_raw(bounds.width, bounds.height, self.spp(), data)
    }
}

impl PixMut {
    /// Copy `src` onto this image with its top-left corner at (x, y).
    ///
    /// Pixels falling outside this image are dropped.
    pub fn paste(&mut self, src: &dyn PixelSource, x: u32, y: u32) {
        for sy in 0..src.height() {
            let Some(dy) = y.checked_add(sy).filter(|&dy| dy < self.height()) else {
                break;
            };
            for sx in 0..src.width() {
                let Some(dx) = x.checked_add(sx).filter(|&dx| dx < self.width()) else {
                    break;
                };
                if let Some((r, g, b)) = src.rgb(sx, sy) {
                    self.set_rgb_unchecked(dx, dy, r, g, b);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pix::{Color, PixView};

    fn gradient(w: u32, h: u32) -> Pix {
        let mut pm = Pix::new(w, h, 3).unwrap().to_mut();
        for y in 0..h {
            for x in 0..w {
                pm.set_rgb_unchecked(x, y, x as u8, y as u8, 7);
            }
        }
        pm.into()
    }

    #[test]
    fn test_crop_basic() {
        let pix = gradient(20, 10);
        let c = crop(&pix, &GridBounds::new(5, 2, 10, 6)).unwrap();
        assert_eq!((c.width(), c.height()), (10, 6));
        assert_eq!(c.get_rgb(0, 0), Some((5, 2, 7)));
        assert_eq!(c.get_rgb(9, 5), Some((14, 7, 7)));
    }

    #[test]
    fn test_crop_full_image() {
        let pix = gradient(8, 8);
        let c = pix.crop(&GridBounds::new(0, 0, 8, 8)).unwrap();
        assert_eq!(c.data(), pix.data());
    }

    #[test]
    fn test_crop_rejects_outside() {
        let pix = gradient(8, 8);
        assert!(matches!(
            crop(&pix, &GridBounds::new(4, 4, 5, 2)),
            Err(Error::RegionOutsideImage { .. })
        ));
        assert!(pix.crop(&GridBounds::new(0, 0, 0, 2)).is_err());
    }

    #[test]
    fn test_crop_rejects_overflowing_bounds() {
        let pix = gradient(8, 8);
        assert!(matches!(
            pix.crop(&GridBounds::new(u32::MAX - 5, 0, 10, 10)),
            Err(Error::RegionOutsideImage { .. })
        ));
        assert!(matches!(
            crop(&pix, &GridBounds::new(0, u32::MAX - 1, 5, 5)),
            Err(Error::RegionOutsideImage { .. })
        ));
        let view = PixView::new(pix.data(), 8, 8, 3).unwrap();
        assert!(crop(&view, &GridBounds::new(u32::MAX, u32::MAX, 1, 1)).is_err());
    }

    #[test]
    fn test_paste_far_offset_is_dropped() {
        let piece = gradient(4, 4);
        let mut canvas = Pix::new(10, 10, 3).unwrap().to_mut();
        canvas.paste(&piece, u32::MAX - 1, u32::MAX - 1);
        let canvas: Pix = canvas.into();
        assert!(canvas.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_crop_keeps_alpha() {
        let pix = Pix::new_filled(4, 4, 4, Color::WHITE).unwrap();
        let c = pix.crop(&GridBounds::new(1, 1, 2, 2)).unwrap();
        assert_eq!(c.spp(), 4);
        assert_eq!(c.get_rgba(0, 0), Some((255, 255, 255, 255)));
    }

    #[test]
    fn test_crop_from_view() {
        let pix = gradient(6, 6);
        let view = PixView::new(pix.data(), 6, 6, 3).unwrap();
        let c = crop(&view, &GridBounds::new(1, 2, 3, 3)).unwrap();
        assert_eq!(c.get_rgb(2, 2), Some((3, 4, 7)));
    }

    #[test]
    fn test_paste_roundtrip() {
        let pix = gradient(10, 10);
        let region = GridBounds::new(3, 4, 5, 5);
        let piece = pix.crop(&region).unwrap();
        let mut canvas = Pix::new(10, 10, 3).unwrap().to_mut();
        canvas.paste(&piece, region.x, region.y);
        let canvas: Pix = canvas.into();
        assert_eq!(canvas.get_rgb(3, 4), pix.get_rgb(3, 4));
        assert_eq!(canvas.get_rgb(7, 8), pix.get_rgb(7, 8));
        assert_eq!(canvas.get_rgb(2, 4), Some((0, 0, 0)));
    }

    #[test]
    fn test_paste_clips_at_edge() {
        let piece = Pix::new_filled(5, 5, 3, Color::WHITE).unwrap();
        let mut canvas = Pix::new(4, 4, 3).unwrap().to_mut();
        canvas.paste(&piece, 2, 2);
        assert_eq!(canvas.get_rgb(3, 3), Some((255, 255, 255)));
        assert_eq!(canvas.get_rgb(1, 1), Some((0, 0, 0)));
    }
}
