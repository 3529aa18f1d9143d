//! Corner verification
//!
//! A real grid corner is an L: ink runs away from the intersection along
//! both the horizontal and the vertical border. Darkness near the
//! predicted point alone is not enough, since two unrelated lines can
//! pass close to it.

use crate::PixelContext;
use crate::config::MAX_PIXEL_PARAM;
use crate::candidate::DetectedBorders;

/// One of the four rectangle corners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Unit steps (dx, dy) of the horizontal and vertical arms, pointing
    /// into the rectangle
    fn arm_directions(self) -> (i32, i32) {
        match self {
            Corner::TopLeft => (1, 1),
            Corner::TopRight => (-1, 1),
            Corner::BottomLeft => (1, -1),
            Corner::BottomRight => (-1, -1),
        }
    }
}

/// Outcome of checking one corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerResult {
    pub corner: Corner,
    /// Predicted intersection (x, y)
    pub point: (i32, i32),
    /// Ink found in the tolerance window around `point`
    pub ink_nearby: bool,
    /// Dark fraction of the horizontal arm steps
    pub horizontal_coverage: f64,
    /// Dark fraction of the vertical arm steps
    pub vertical_coverage: f64,
    pub valid: bool,
}

/// Outcome of checking all four corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerReport {
    pub corners: [CornerResult; 4],
}

impl CornerReport {
    /// Number of valid corners (0-4)
    pub fn valid_count(&self) -> usize {
        self.corners.iter().filter(|c| c.valid).count()
    }
}

/// Check the four intersections of `borders` for L-shaped junctions.
pub fn verify_corners(ctx: &PixelContext<'_>, borders: &DetectedBorders) -> CornerReport {
    let corners = Corner::ALL.map(|corner| {
        let x = match corner {
            Corner::TopLeft | Corner::BottomLeft => borders.left.position,
            Corner::TopRight | Corner::BottomRight => borders.right.position,
        };
        let y = match corner {
            Corner::TopLeft | Corner::TopRight => borders.top.position,
            Corner::BottomLeft | Corner::BottomRight => borders.bottom.position,
        };
        check_corner(ctx, corner, x, y)
    });
    CornerReport { corners }
}

fn check_corner(ctx: &PixelContext<'_>, corner: Corner, x: i32, y: i32) -> CornerResult {
    let check = &ctx.config().corner_check;
    let tol = check.search_tolerance.min(MAX_PIXEL_PARAM) as i32;
    let band = check.band.min(MAX_PIXEL_PARAM) as i32;
    let size = check.size.min(MAX_PIXEL_PARAM) as i32;

    let ink_nearby = ctx.any_dark(x - tol, y - tol, x + tol, y + tol);
    if !ink_nearby {
        return CornerResult {
            corner,
            point: (x, y),
            ink_nearby,
            horizontal_coverage: 0.0,
            vertical_coverage: 0.0,
            valid: false,
        };
    }

    let (dx, dy) = corner.arm_directions();
    let mut horizontal_hits = 0;
    let mut vertical_hits = 0;
    for i in 1..=size {
        let ax = x + dx * i;
        if ctx.any_dark(ax, y - band, ax, y + band) {
            horizontal_hits += 1;
        }
        let ay = y + dy * i;
        if ctx.any_dark(x - band, ay, x + band, ay) {
            vertical_hits += 1;
        }
    }

    let horizontal_coverage = horizontal_hits as f64 / size as f64;
    let vertical_coverage = vertical_hits as f64 / size as f64;
    CornerResult {
        corner,
        point: (x, y),
        ink_nearby,
        horizontal_coverage,
        vertical_coverage,
        valid: horizontal_coverage >= check.min_coverage
            && vertical_coverage >= check.min_coverage,
    }
}
