//! Left and right border resolution
//!
//! With both horizontal borders known, each vertical border is searched
//! only near the column predicted by the horizontals' endpoints, and is
//! synthesized from those endpoints when nothing convincing is there.
//! Without that guidance the configured side bands are scanned directly.

use crate::PixelContext;
use crate::config::MAX_PIXEL_PARAM;
use crate::candidate::{CandidateOrigin, Edge, LineCandidate, band, find_candidates, select_outermost};
use crate::horizontal::HorizontalBorders;
use crate::scan::Axis;
use crate::trace::{TraceEvent, TraceSink};

/// Result of vertical resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalBorders {
    pub left: Option<LineCandidate>,
    pub right: Option<LineCandidate>,
    /// Whether the search was guided by the horizontal borders
    pub guided: bool,
}

/// Find the left and right borders.
pub fn resolve_vertical(
    ctx: &PixelContext<'_>,
    horizontals: &HorizontalBorders,
    sink: &mut dyn TraceSink,
) -> VerticalBorders {
    match (&horizontals.top, &horizontals.bottom) {
        (Some(top), Some(bottom)) => {
            let expected_left = mean(top.run_start, bottom.run_start);
            let expected_right = mean(top.run_end(), bottom.run_end());
            VerticalBorders {
                left: Some(resolve_guided(ctx, top, bottom, Edge::Left, expected_left, sink)),
                right: Some(resolve_guided(ctx, top, bottom, Edge::Right, expected_right, sink)),
                guided: true,
            }
        }
        _ => VerticalBorders {
            left: resolve_unguided(ctx, Edge::Left, sink),
            right: resolve_unguided(ctx, Edge::Right, sink),
            guided: false,
        },
    }
}

#[inline]
fn mean(a: i32, b: i32) -> i32 {
    ((a as f64 + b as f64) / 2.0).round() as i32
}

fn resolve_guided(
    ctx: &PixelContext<'_>,
    top: &LineCandidate,
    bottom: &LineCandidate,
    edge: Edge,
    expected: i32,
    sink: &mut dyn TraceSink,
) -> LineCandidate {
    let config = ctx.config();
    let guidance = &config.vertical_guidance;
    let window = guidance.window.min(MAX_PIXEL_PARAM) as i32;

    let candidates = find_candidates(
        ctx,
        Axis::Column,
        (expected - window)..(expected + window + 1),
        config.weights.guided_min_confidence,
    );

    let score = |c: &LineCandidate| {
        let dist = (c.position - expected).abs() as f64;
        c.confidence + guidance.proximity_bonus * (1.0 - dist / window as f64)
    };
    let best = candidates.iter().fold(None::<&LineCandidate>, |best, c| match best {
        Some(b) if score(b) >= score(c) => Some(b),
        _ => Some(c),
    });

    let resolved = match best {
        Some(c) if (c.position - expected).unsigned_abs() <= guidance.max_deviation => *c,
        _ => LineCandidate {
            position: expected,
            run_start: top.position,
            run_length: bottom.position - top.position + 1,
            thickness: 1,
            confidence: guidance.synthesized_confidence,
            origin: CandidateOrigin::Synthesized,
        },
    };

    sink.record(&TraceEvent::Vertical {
        edge,
        expected: Some(expected),
        count: candidates.len(),
        chosen: Some(resolved),
    });
    resolved
}

fn resolve_unguided(
    ctx: &PixelContext<'_>,
    edge: Edge,
    sink: &mut dyn TraceSink,
) -> Option<LineCandidate> {
    let config = ctx.config();
    let region = &config.search_region;
    let w = ctx.width();
    let columns = match edge {
        Edge::Left => band(w, 0.0, region.left_max_x),
        _ => band(w, region.right_min_x, 1.0),
    };

    let candidates = find_candidates(
        ctx,
        Axis::Column,
        columns,
        config.weights.min_candidate_confidence,
    );
    let chosen = select_outermost(ctx, &candidates, edge);
    sink.record(&TraceEvent::Vertical {
        edge,
        expected: None,
        count: candidates.len(),
        chosen,
    });
    chosen
}
