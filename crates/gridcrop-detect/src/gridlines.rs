//! Internal grid-line regularity
//!
//! A stitch chart is a lattice: inside its border, lines cross the whole
//! interior at a near-constant pitch. Finding such lines is positive
//! evidence that the bounds enclose the chart and not some other box.
//! Finding none is neutral.

use crate::PixelContext;
use crate::config::MAX_PIXEL_PARAM;
use crate::scan::{Axis, longest_run};
use gridcrop_core::GridBounds;

/// Spacing statistics of one axis' internal lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpacingAnalysis {
    pub is_regular: bool,
    /// Fraction of spacings within tolerance of the median spacing
    pub consistency: f64,
}

/// Internal lines found on both axes and the resulting confidence
#[derive(Debug, Clone, PartialEq)]
pub struct GridLineReport {
    /// Rows of internal horizontal lines
    pub horizontal_lines: Vec<i32>,
    /// Columns of internal vertical lines
    pub vertical_lines: Vec<i32>,
    /// `None` when too few horizontal lines were found
    pub horizontal: Option<SpacingAnalysis>,
    /// `None` when too few vertical lines were found
    pub vertical: Option<SpacingAnalysis>,
    pub confidence: f64,
}

/// Find the internal lines of `bounds` and score their regularity.
///
/// Confidence is the mean consistency of the axes that have enough lines;
/// an axis without enough lines is left out rather than scored 0. It is
/// 1.0 when verification is disabled or neither axis qualifies.
pub fn analyze_grid_lines(ctx: &PixelContext<'_>, bounds: &GridBounds) -> GridLineReport {
    let config = &ctx.config().grid_lines;
    if !config.enabled {
        return GridLineReport {
            horizontal_lines: Vec::new(),
            vertical_lines: Vec::new(),
            horizontal: None,
            vertical: None,
            confidence: 1.0,
        };
    }

    let horizontal_lines = find_internal_lines(ctx, Axis::Row, bounds);
    let vertical_lines = find_internal_lines(ctx, Axis::Column, bounds);
    let horizontal = analyze_spacing(ctx, &horizontal_lines);
    let vertical = analyze_spacing(ctx, &vertical_lines);

    let analyzed: Vec<&SpacingAnalysis> = horizontal.iter().chain(vertical.iter()).collect();
    let confidence = if analyzed.is_empty() {
        1.0
    } else {
        let mean = analyzed.iter().map(|a| a.consistency).sum::<f64>() / analyzed.len() as f64;
        let bonus = if analyzed.iter().any(|a| a.is_regular) {
            config.regular_bonus
        } else {
            0.0
        };
        (mean + bonus).min(1.0)
    };

    GridLineReport {
        horizontal_lines,
        vertical_lines,
        horizontal,
        vertical,
        confidence,
    }
}

/// Positions of lines crossing nearly the whole interior of `bounds`.
///
/// Scan lines within `expected_border_thickness + thickness_tolerance`
/// of the border are skipped. A line qualifies when its run, restricted
/// to the bounds' span, covers `min_span` of the span, starts within the
/// first `inner_band` of it and ends within the last. Detections closer
/// than `merge_distance` collapse into their mean.
pub fn find_internal_lines(ctx: &PixelContext<'_>, axis: Axis, bounds: &GridBounds) -> Vec<i32> {
    let config = ctx.config();
    let g = &config.grid_lines;
    let margin = config
        .expected_border_thickness
        .saturating_add(config.thickness_tolerance)
        .min(MAX_PIXEL_PARAM) as i32;

    let (first, last, span) = match axis {
        Axis::Row => (
            bounds.y as i32,
            bounds.bottom() as i32 - 1,
            bounds.x as i32..bounds.right() as i32,
        ),
        Axis::Column => (
            bounds.x as i32,
            bounds.right() as i32 - 1,
            bounds.y as i32..bounds.bottom() as i32,
        ),
    };
    let span_len = (span.end - span.start) as f64;
    if span_len <= 0.0 {
        return Vec::new();
    }
    let min_length = g.min_span * span_len;
    let latest_start = span.start as f64 + g.inner_band * span_len;
    let earliest_end = span.start as f64 + (1.0 - g.inner_band) * span_len;

    let raw: Vec<i32> = ((first + margin)..=(last - margin))
        .filter(|&index| {
            longest_run(ctx, axis, index, span.clone()).is_some_and(|run| {
                run.length as f64 >= min_length
                    && run.start as f64 <= latest_start
                    && run.end() as f64 >= earliest_end
            })
        })
        .collect();

    merge_adjacent(&raw, g.merge_distance.min(MAX_PIXEL_PARAM) as i32)
}

/// Collapse runs of positions closer than `distance` into their
/// rounded mean. Input must be sorted.
fn merge_adjacent(positions: &[i32], distance: i32) -> Vec<i32> {
    let mut merged = Vec::new();
    let mut group: Vec<i32> = Vec::new();
    for &p in positions {
        if let Some(&prev) = group.last() {
            if p - prev >= distance {
                merged.push(group_mean(&group));
                group.clear();
            }
        }
        group.push(p);
    }
    if !group.is_empty() {
        merged.push(group_mean(&group));
    }
    merged
}

fn group_mean(group: &[i32]) -> i32 {
    (group.iter().map(|&p| p as f64).sum::<f64>() / group.len() as f64).round() as i32
}

/// Spacing regularity of sorted line positions.
///
/// Returns `None` with fewer than `min_internal_lines` positions.
pub fn analyze_spacing(ctx: &PixelContext<'_>, positions: &[i32]) -> Option<SpacingAnalysis> {
    let g = &ctx.config().grid_lines;
    if positions.len() < g.min_internal_lines.max(2) {
        return None;
    }

    let spacings: Vec<f64> = positions.windows(2).map(|w| (w[1] - w[0]) as f64).collect();
    let median = median(&spacings);
    let tolerance = g.spacing_tolerance * median;
    let consistent = spacings
        .iter()
        .filter(|&&s| (s - median).abs() <= tolerance)
        .count();
    let consistency = consistent as f64 / spacings.len() as f64;

    Some(SpacingAnalysis {
        is_regular: consistency >= g.regular_consistency,
        consistency,
    })
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    if n == 0 {
        0.0
    } else if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}
