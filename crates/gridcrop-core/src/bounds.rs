//! GridBounds - The detected grid rectangle
//!
//! A pixel rectangle in source-image coordinates. It is the only
//! result type the detector hands back to callers, whether it was
//! derived from border lines or from the fixed-margin fallback.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A rectangle region in image pixel coordinates
///
/// Unlike a general-purpose box this type never carries negative
/// coordinates; anything the detector produces has already been
/// clamped to the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridBounds {
    /// Left x coordinate
    pub x: u32,
    /// Top y coordinate
    pub y: u32,
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

impl GridBounds {
    /// Create a new bounds rectangle
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create bounds spanning the inclusive edge coordinates
    /// `left..=right` and `top..=bottom`.
    ///
    /// # Errors
    ///
    /// Returns an error if an edge is negative or the edges are inverted.
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Result<Self> {
        if left < 0 || top < 0 || right < left || bottom < top {
            return Err(Error::InvalidParameter(format!(
                "invalid edges: left={}, top={}, right={}, bottom={}",
                left, top, right, bottom
            )));
        }
        Ok(Self {
            x: left as u32,
            y: top as u32,
            width: (right - left + 1) as u32,
            height: (bottom - top + 1) as u32,
        })
    }

    /// Get the right x coordinate (exclusive), saturating at `u32::MAX`
    #[inline]
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Get the bottom y coordinate (exclusive), saturating at `u32::MAX`
    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Get the area
    #[inline]
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Check if the bounds are empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the bounds
    #[inline]
    pub fn contains_point(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check whether the bounds lie entirely within a `width` x `height` image
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        let right = self.x.checked_add(self.width);
        let bottom = self.y.checked_add(self.height);
        matches!((right, bottom), (Some(r), Some(b)) if r <= width && b <= height)
    }

    /// Clip the bounds to fit within an image
    ///
    /// Returns `None` if nothing of the rectangle remains.
    pub fn clip_to(&self, width: u32, height: u32) -> Option<GridBounds> {
        let right = self.right().min(width);
        let bottom = self.bottom().min(height);
        if self.x < right && self.y < bottom {
            Some(GridBounds {
                x: self.x,
                y: self.y,
                width: right - self.x,
                height: bottom - self.y,
            })
        } else {
            None
        }
    }

    /// Grow the bounds by `margin` pixels on every side, clamped to a
    /// `width` x `height` image.
    pub fn expand_clamped(&self, margin: u32, width: u32, height: u32) -> GridBounds {
        let x = self.x.saturating_sub(margin);
        let y = self.y.saturating_sub(margin);
        let right = self.right().saturating_add(margin).min(width);
        let bottom = self.bottom().saturating_add(margin).min(height);
        GridBounds {
            x,
            y,
            width: right.saturating_sub(x),
            height: bottom.saturating_sub(y),
        }
    }
}

impl std::fmt::Display for GridBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}
