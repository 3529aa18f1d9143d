//! Fixed-margin fallback rectangle

use crate::config::FallbackMargins;
use gridcrop_core::GridBounds;

/// Rectangle left after trimming fixed fractional margins off a
/// `width` x `height` image.
///
/// Never fails. For a non-empty image the result is at least 1x1 and
/// lies within the image, however large the margins.
pub fn fallback_bounds(width: u32, height: u32, margins: &FallbackMargins) -> GridBounds {
    let (x, w) = trim(width, margins.left, margins.right);
    let (y, h) = trim(height, margins.top, margins.bottom);
    GridBounds::new(x, y, w, h)
}

fn trim(len: u32, lead: f64, trail: f64) -> (u32, u32) {
    if len == 0 {
        return (0, 0);
    }
    // Float-to-int casts saturate, so negative or NaN margins become 0
    let start = ((len as f64 * lead).round() as u32).min(len - 1);
    let trail = (len as f64 * trail).round() as u32;
    let size = (len - start).saturating_sub(trail).max(1);
    (start, size)
}
