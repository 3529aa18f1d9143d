//! Gap-tolerant run scanning and stroke thickness
//!
//! A border line rendered with anti-aliasing, or scanned with noise,
//! breaks into fragments separated by a pixel or two of light. The
//! scanner bridges gaps up to `max_gap_pixels` so such a line is still
//! measured as one run.

use crate::PixelContext;
use std::ops::Range;

/// Neighbor run starts within this many pixels match (or 5% of the run
/// length, whichever is larger)
const THICKNESS_START_SLACK: f64 = 5.0;
const THICKNESS_START_FRACTION: f64 = 0.05;
/// Neighbor runs must be at least this fraction of the original length
const THICKNESS_MIN_LENGTH: f64 = 0.9;

/// Scan direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// A row at fixed y, scanned along x (horizontal lines)
    Row,
    /// A column at fixed x, scanned along y (vertical lines)
    Column,
}

impl Axis {
    /// Number of pixels along one scan line
    pub fn length(self, ctx: &PixelContext<'_>) -> i32 {
        match self {
            Axis::Row => ctx.width(),
            Axis::Column => ctx.height(),
        }
    }

    /// Number of scan lines of this kind
    pub fn count(self, ctx: &PixelContext<'_>) -> i32 {
        match self {
            Axis::Row => ctx.height(),
            Axis::Column => ctx.width(),
        }
    }

    /// The full extent of a scan line
    pub fn full_span(self, ctx: &PixelContext<'_>) -> Range<i32> {
        0..self.length(ctx)
    }

    #[inline]
    fn is_dark(self, ctx: &PixelContext<'_>, index: i32, p: i32) -> bool {
        match self {
            Axis::Row => ctx.is_dark(p, index),
            Axis::Column => ctx.is_dark(index, p),
        }
    }
}

/// A run of dark pixels along a scan line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DarkRun {
    /// First dark pixel
    pub start: i32,
    /// Pixels from the first to the last dark pixel, inclusive
    pub length: i32,
}

impl DarkRun {
    /// Last dark pixel (inclusive)
    #[inline]
    pub fn end(&self) -> i32 {
        self.start + self.length - 1
    }
}

/// Find the longest gap-tolerant dark run on scan line `index`,
/// considering only positions in `span`.
///
/// Light pixels extend the current run while at most `max_gap_pixels`
/// of them occur in a row; one more closes it. The reported run always
/// starts and ends on a dark pixel. Ties keep the earliest run.
pub fn longest_run(
    ctx: &PixelContext<'_>,
    axis: Axis,
    index: i32,
    span: Range<i32>,
) -> Option<DarkRun> {
    let max_gap = ctx.config().max_gap_pixels;
    let span = span.start.max(0)..span.end.min(axis.length(ctx));

    let mut best: Option<DarkRun> = None;
    let mut current: Option<(i32, i32)> = None;
    let mut gap = 0u32;

    let close = |first: i32, last: i32, best: &mut Option<DarkRun>| {
        let run = DarkRun {
            start: first,
            length: last - first + 1,
        };
        if best.is_none_or(|b| run.length > b.length) {
            *best = Some(run);
        }
    };

    for p in span {
        if axis.is_dark(ctx, index, p) {
            current = Some(match current {
                Some((first, _)) => (first, p),
                None => (p, p),
            });
            gap = 0;
        } else if let Some((first, last)) = current {
            gap += 1;
            if gap > max_gap {
                close(first, last, &mut best);
                current = None;
                gap = 0;
            }
        }
    }
    if let Some((first, last)) = current {
        close(first, last, &mut best);
    }

    best
}

/// Count the parallel scan lines that carry the same stroke as `run`
/// on line `index`.
///
/// Walks outward on both sides for up to `expected_border_thickness +
/// thickness_tolerance` lines, stopping at the first neighbor whose
/// longest run starts too far from `run.start` or is shorter than 90% of
/// `run.length`. Returns 1 plus the number of matching neighbors.
pub fn measure_thickness(ctx: &PixelContext<'_>, axis: Axis, index: i32, run: &DarkRun) -> u32 {
    let config = ctx.config();
    let max_steps = config
        .expected_border_thickness
        .saturating_add(config.thickness_tolerance)
        .min(i32::MAX as u32) as i32;
    let start_slack = (run.length as f64 * THICKNESS_START_FRACTION).max(THICKNESS_START_SLACK);
    let min_length = run.length as f64 * THICKNESS_MIN_LENGTH;

    let matches = |i: i32| {
        longest_run(ctx, axis, i, axis.full_span(ctx)).is_some_and(|r| {
            ((r.start - run.start).abs() as f64) <= start_slack && r.length as f64 >= min_length
        })
    };

    let mut thickness = 1;
    for dir in [-1, 1] {
        for step in 1..=max_steps {
            if !matches(index + dir * step) {
                break;
            }
            thickness += 1;
        }
    }
    thickness
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DetectionConfig;
    use gridcrop_core::{Color, Pix, PixMut};

    fn page(w: u32, h: u32) -> PixMut {
        Pix::new_filled(w, h, 3, Color::WHITE).unwrap().to_mut()
    }

    #[test]
    fn test_longest_run_bridges_small_gaps() {
        let mut pm = page(40, 3);
        pm.render_hline(5, 30, 1, 1, Color::BLACK);
        // Gaps of 1 and 3 pixels are bridged
        pm.set_rgb(10, 1, 255, 255, 255).unwrap();
        pm.fill_rect(20, 1, 3, 1, Color::WHITE);
        let pix: Pix = pm.into();
        let config = DetectionConfig::default();
        let ctx = PixelContext::new(&pix, &config);

        let run = longest_run(&ctx, Axis::Row, 1, Axis::Row.full_span(&ctx)).unwrap();
        assert_eq!(run, DarkRun { start: 5, length: 26 });
        assert_eq!(run.end(), 30);
    }

    #[test]
    fn test_longest_run_splits_on_wide_gap() {
        let mut pm = page(40, 1);
        pm.render_hline(0, 9, 0, 1, Color::BLACK);
        // 4-pixel gap exceeds the default tolerance of 3
        pm.render_hline(14, 30, 0, 1, Color::BLACK);
        let pix: Pix = pm.into();
        let config = DetectionConfig::default();
        let ctx = PixelContext::new(&pix, &config);

        let run = longest_run(&ctx, Axis::Row, 0, 0..40).unwrap();
        assert_eq!(run, DarkRun { start: 14, length: 17 });

        let strict = config.clone().with_max_gap_pixels(4);
        let ctx = PixelContext::new(&pix, &strict);
        let run = longest_run(&ctx, Axis::Row, 0, 0..40).unwrap();
        assert_eq!(run, DarkRun { start: 0, length: 31 });
    }

    #[test]
    fn test_longest_run_trailing_gap_not_counted() {
        let mut pm = page(20, 1);
        pm.render_hline(3, 8, 0, 1, Color::BLACK);
        let pix: Pix = pm.into();
        let config = DetectionConfig::default();
        let ctx = PixelContext::new(&pix, &config);

        let run = longest_run(&ctx, Axis::Row, 0, 0..20).unwrap();
        assert_eq!(run, DarkRun { start: 3, length: 6 });
    }

    #[test]
    fn test_longest_run_respects_span_and_columns() {
        let mut pm = page(10, 30);
        pm.render_vline(4, 2, 25, 1, Color::BLACK);
        let pix: Pix = pm.into();
        let config = DetectionConfig::default();
        let ctx = PixelContext::new(&pix, &config);

        let run = longest_run(&ctx, Axis::Column, 4, Axis::Column.full_span(&ctx)).unwrap();
        assert_eq!(run, DarkRun { start: 2, length: 24 });

        let run = longest_run(&ctx, Axis::Column, 4, 10..15).unwrap();
        assert_eq!(run, DarkRun { start: 10, length: 5 });

        assert!(longest_run(&ctx, Axis::Column, 5, 0..30).is_none());
        assert!(longest_run(&ctx, Axis::Column, -1, 0..30).is_none());
    }

    #[test]
    fn test_thickness_of_solid_stroke() {
        let mut pm = page(100, 20);
        pm.render_hline(10, 89, 8, 3, Color::BLACK);
        let pix: Pix = pm.into();
        let config = DetectionConfig::default();
        let ctx = PixelContext::new(&pix, &config);

        let run = longest_run(&ctx, Axis::Row, 8, 0..100).unwrap();
        assert_eq!(measure_thickness(&ctx, Axis::Row, 8, &run), 3);
        let run = longest_run(&ctx, Axis::Row, 9, 0..100).unwrap();
        assert_eq!(measure_thickness(&ctx, Axis::Row, 9, &run), 3);
    }

    #[test]
    fn test_thickness_ignores_short_or_offset_neighbors() {
        let mut pm = page(100, 20);
        pm.render_hline(10, 89, 8, 1, Color::BLACK);
        // Neighbor above is too short, neighbor below starts too far away
        pm.render_hline(10, 50, 7, 1, Color::BLACK);
        pm.render_hline(30, 99, 9, 1, Color::BLACK);
        let pix: Pix = pm.into();
        let config = DetectionConfig::default();
        let ctx = PixelContext::new(&pix, &config);

        let run = longest_run(&ctx, Axis::Row, 8, 0..100).unwrap();
        assert_eq!(measure_thickness(&ctx, Axis::Row, 8, &run), 1);
    }

    #[test]
    fn test_thickness_is_capped() {
        let mut pm = page(100, 40);
        pm.render_hline(10, 89, 5, 20, Color::BLACK);
        let pix: Pix = pm.into();
        let config = DetectionConfig::default();
        let ctx = PixelContext::new(&pix, &config);

        let run = longest_run(&ctx, Axis::Row, 15, 0..100).unwrap();
        // 1 + (2 + 2) on each side
        assert_eq!(measure_thickness(&ctx, Axis::Row, 15, &run), 9);
    }
}
