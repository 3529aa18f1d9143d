//! Border line candidates and band search

use crate::PixelContext;
use crate::confidence::line_confidence;
use crate::scan::{Axis, longest_run, measure_thickness};
use std::ops::Range;

/// Where a line candidate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateOrigin {
    /// Measured on the image
    Detected,
    /// Inferred from the horizontal borders' endpoints
    Synthesized,
}

/// A candidate border line at a fixed row (horizontal) or column (vertical)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineCandidate {
    /// Row of a horizontal line, column of a vertical one
    pub position: i32,
    /// First pixel of the line's run
    pub run_start: i32,
    /// Length of the line's run
    pub run_length: i32,
    /// Stroke width in scan lines
    pub thickness: u32,
    /// 0..1
    pub confidence: f64,
    pub origin: CandidateOrigin,
}

impl LineCandidate {
    /// Last pixel of the run (inclusive)
    #[inline]
    pub fn run_end(&self) -> i32 {
        self.run_start + self.run_length - 1
    }

    #[inline]
    pub fn is_synthesized(&self) -> bool {
        self.origin == CandidateOrigin::Synthesized
    }
}

/// The four sides of the grid rectangle, all resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectedBorders {
    pub top: LineCandidate,
    pub bottom: LineCandidate,
    pub left: LineCandidate,
    pub right: LineCandidate,
}

impl DetectedBorders {
    /// The borders in top, bottom, left, right order
    pub fn sides(&self) -> [&LineCandidate; 4] {
        [&self.top, &self.bottom, &self.left, &self.right]
    }
}

/// Side of the rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// Scan lines that can hold this border
    pub fn axis(self) -> Axis {
        match self {
            Edge::Top | Edge::Bottom => Axis::Row,
            Edge::Left | Edge::Right => Axis::Column,
        }
    }

    /// Sort key that is smallest for the position nearest the image edge
    #[inline]
    fn outward_key(self, position: i32) -> i64 {
        match self {
            Edge::Top | Edge::Left => position as i64,
            Edge::Bottom | Edge::Right => -(position as i64),
        }
    }
}

/// Collect the candidates on scan lines `positions` of `axis`.
///
/// A scan line yields a candidate only when its longest run is at
/// least `min_border_fraction` of the scan length and its confidence
/// reaches `min_confidence`.
pub fn find_candidates(
    ctx: &PixelContext<'_>,
    axis: Axis,
    positions: Range<i32>,
    min_confidence: f64,
) -> Vec<LineCandidate> {
    let config = ctx.config();
    let dimension = axis.length(ctx);
    let min_length = config.min_border_fraction * dimension as f64;
    let positions = positions.start.max(0)..positions.end.min(axis.count(ctx));

    let mut candidates = Vec::new();
    for position in positions {
        let Some(run) = longest_run(ctx, axis, position, axis.full_span(ctx)) else {
            continue;
        };
        if (run.length as f64) < min_length {
            continue;
        }
        let thickness = measure_thickness(ctx, axis, position, &run);
        let confidence = line_confidence(run.length, dimension, thickness, config);
        if confidence >= min_confidence {
            candidates.push(LineCandidate {
                position,
                run_start: run.start,
                run_length: run.length,
                thickness,
                confidence,
                origin: CandidateOrigin::Detected,
            });
        }
    }
    candidates
}

/// Order candidates from the image edge inward
pub fn order_outward(candidates: &[LineCandidate], edge: Edge) -> Vec<LineCandidate> {
    let mut ordered = candidates.to_vec();
    ordered.sort_by_key(|c| edge.outward_key(c.position));
    ordered
}

/// Pick the border among `candidates` for `edge`.
///
/// Takes the outermost candidate, unless the most confident one beats it
/// by more than `preference_margin` and lies within
/// `preference_distance` pixels of it.
pub fn select_outermost(
    ctx: &PixelContext<'_>,
    candidates: &[LineCandidate],
    edge: Edge,
) -> Option<LineCandidate> {
    let weights = &ctx.config().weights;
    let ordered = order_outward(candidates, edge);
    let outermost = *ordered.first()?;

    // First of the most confident, in outward order
    let strongest = ordered.iter().fold(outermost, |best, c| {
        if c.confidence > best.confidence { *c } else { best }
    });

    let beats = strongest.confidence - outermost.confidence > weights.preference_margin;
    let near = (strongest.position - outermost.position).unsigned_abs() <= weights.preference_distance;
    if beats && near {
        Some(strongest)
    } else {
        Some(outermost)
    }
}

/// Half-open band `[len * from, len * to)` of scan-line indices
pub(crate) fn band(len: i32, from: f64, to: f64) -> Range<i32> {
    let start = (len as f64 * from).ceil() as i32;
    let end = (len as f64 * to).ceil() as i32;
    start.clamp(0, len)..end.clamp(0, len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DetectionConfig;
    use gridcrop_core::{Color, Pix};

    fn candidate(position: i32, confidence: f64) -> LineCandidate {
        LineCandidate {
            position,
            run_start: 0,
            run_length: 100,
            thickness: 2,
            confidence,
            origin: CandidateOrigin::Detected,
        }
    }

    #[test]
    fn test_find_candidates_filters_short_runs() {
        let mut pm = Pix::new_filled(200, 100, 3, Color::WHITE).unwrap().to_mut();
        // 60 px = 30% of width qualifies, 59 px does not
        pm.render_hline(10, 69, 20, 2, Color::BLACK);
        pm.render_hline(10, 68, 40, 2, Color::BLACK);
        let pix: Pix = pm.into();
        let config = DetectionConfig::default();
        let ctx = PixelContext::new(&pix, &config);

        let found = find_candidates(&ctx, Axis::Row, 0..100, 0.0);
        let positions: Vec<i32> = found.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![20, 21]);
        assert!(found.iter().all(|c| c.run_length >= 60));
        assert_eq!(found[0].thickness, 2);
    }

    #[test]
    fn test_find_candidates_min_confidence() {
        let mut pm = Pix::new_filled(200, 100, 3, Color::WHITE).unwrap().to_mut();
        // Thin line at 35% of width: 0.6 * 70/160 + 0.4 * 0.5 = 0.4625
        pm.render_hline(0, 69, 50, 1, Color::BLACK);
        let pix: Pix = pm.into();
        let config = DetectionConfig::default();
        let ctx = PixelContext::new(&pix, &config);

        assert_eq!(find_candidates(&ctx, Axis::Row, 0..100, 0.4).len(), 1);
        assert!(find_candidates(&ctx, Axis::Row, 0..100, 0.5).is_empty());
    }

    #[test]
    fn test_select_outermost_prefers_edge() {
        let pix = Pix::new(10, 10, 3).unwrap();
        let config = DetectionConfig::default();
        let ctx = PixelContext::new(&pix, &config);

        let cands = [candidate(30, 0.8), candidate(12, 0.7), candidate(50, 0.85)];
        assert_eq!(select_outermost(&ctx, &cands, Edge::Top).unwrap().position, 12);
        assert_eq!(select_outermost(&ctx, &cands, Edge::Bottom).unwrap().position, 50);
        assert!(select_outermost(&ctx, &[], Edge::Left).is_none());
    }

    #[test]
    fn test_select_outermost_switches_to_nearby_stronger() {
        let pix = Pix::new(10, 10, 3).unwrap();
        let config = DetectionConfig::default();
        let ctx = PixelContext::new(&pix, &config);

        // Weak outer duplicate 20 px from a strong line
        let cands = [candidate(10, 0.5), candidate(30, 1.0)];
        assert_eq!(select_outermost(&ctx, &cands, Edge::Top).unwrap().position, 30);

        // Too far away to switch
        let cands = [candidate(10, 0.5), candidate(70, 1.0)];
        assert_eq!(select_outermost(&ctx, &cands, Edge::Top).unwrap().position, 10);

        // Not enough stronger to switch
        let cands = [candidate(10, 0.8), candidate(30, 1.0)];
        assert_eq!(select_outermost(&ctx, &cands, Edge::Top).unwrap().position, 10);
    }

    #[test]
    fn test_band_bounds() {
        assert_eq!(band(400, 0.0, 0.35), 0..140);
        assert_eq!(band(400, 0.65, 1.0), 260..400);
        assert_eq!(band(10, 0.33, 0.5), 4..5);
    }
}
