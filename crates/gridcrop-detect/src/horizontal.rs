//! Top and bottom border resolution
//!
//! The top border is the outermost strong line in the top band. The
//! bottom border is chosen among the bottom band's lines by how well its
//! span matches the top border's, which rejects table rules, footers and
//! other full-width strokes below the grid.

use crate::PixelContext;
use crate::candidate::{Edge, LineCandidate, band, find_candidates, order_outward, select_outermost};
use crate::scan::Axis;
use crate::trace::{TraceEvent, TraceSink};
use serde::{Deserialize, Serialize};

/// How well the chosen bottom border matches the top border's span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BottomMatch {
    /// Within the strict start/length thresholds
    Well,
    /// Within the relaxed thresholds only
    Acceptable,
    /// Outermost bottom line, taken without a span match
    Unaligned,
}

/// Result of horizontal resolution; either side may be missing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalBorders {
    pub top: Option<LineCandidate>,
    pub bottom: Option<LineCandidate>,
    /// Set whenever `bottom` is
    pub bottom_alignment: Option<BottomMatch>,
}

/// Find the top and bottom borders.
pub fn resolve_horizontal(ctx: &PixelContext<'_>, sink: &mut dyn TraceSink) -> HorizontalBorders {
    let config = ctx.config();
    let region = &config.search_region;
    let min_conf = config.weights.min_candidate_confidence;
    let h = ctx.height();

    let top_cands = find_candidates(ctx, Axis::Row, band(h, 0.0, region.top_max_y), min_conf);
    let top = select_outermost(ctx, &top_cands, Edge::Top);
    sink.record(&TraceEvent::Candidates {
        edge: Edge::Top,
        count: top_cands.len(),
        chosen: top,
    });

    let bottom_cands = find_candidates(ctx, Axis::Row, band(h, region.bottom_min_y, 1.0), min_conf);
    let selected = match &top {
        Some(top) => select_aligned_bottom(ctx, top, &bottom_cands),
        None => select_outermost(ctx, &bottom_cands, Edge::Bottom)
            .map(|c| (c, BottomMatch::Unaligned)),
    };
    sink.record(&TraceEvent::Candidates {
        edge: Edge::Bottom,
        count: bottom_cands.len(),
        chosen: selected.map(|(c, _)| c),
    });
    if let Some((_, class)) = selected {
        sink.record(&TraceEvent::BottomAlignment { class });
    }

    HorizontalBorders {
        top,
        bottom: selected.map(|(c, _)| c),
        bottom_alignment: selected.map(|(_, class)| class),
    }
}

/// Classify a bottom candidate against the top border
pub fn classify_bottom(
    ctx: &PixelContext<'_>,
    top: &LineCandidate,
    bottom: &LineCandidate,
) -> BottomMatch {
    let t = &ctx.config().bottom_alignment;
    let start_diff = (bottom.run_start - top.run_start).unsigned_abs();
    let length_diff = if top.run_length > 0 {
        (bottom.run_length - top.run_length).abs() as f64 / top.run_length as f64
    } else {
        f64::INFINITY
    };

    if start_diff <= t.well_offset && length_diff <= t.well_length {
        BottomMatch::Well
    } else if start_diff <= t.acceptable_offset && length_diff <= t.acceptable_length {
        BottomMatch::Acceptable
    } else {
        BottomMatch::Unaligned
    }
}

/// Outermost-first: the first well-aligned candidate, else the first
/// acceptable one, else the outermost.
fn select_aligned_bottom(
    ctx: &PixelContext<'_>,
    top: &LineCandidate,
    candidates: &[LineCandidate],
) -> Option<(LineCandidate, BottomMatch)> {
    let ordered = order_outward(candidates, Edge::Bottom);
    let classified: Vec<_> = ordered
        .iter()
        .map(|c| (*c, classify_bottom(ctx, top, c)))
        .collect();

    classified
        .iter()
        .find(|(_, class)| *class == BottomMatch::Well)
        .or_else(|| {
            classified
                .iter()
                .find(|(_, class)| *class == BottomMatch::Acceptable)
        })
        .or_else(|| classified.first())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DetectionConfig;
    use crate::config::BottomAlignment as Thresholds;
    use crate::trace::NoTrace;
    use gridcrop_core::{Color, Pix, PixMut};

    fn page() -> PixMut {
        let mut pm = Pix::new_filled(400, 400, 3, Color::WHITE).unwrap().to_mut();
        // Top border: x 40..359
        pm.render_hline(40, 359, 40, 2, Color::BLACK);
        pm
    }

    #[test]
    fn test_well_aligned_bottom_beats_outer_lines() {
        let mut pm = page();
        // Outermost: unrelated rule
        pm.render_hline(150, 349, 380, 2, Color::BLACK);
        // Acceptable: start off by 25, length off by ~7.8%
        pm.render_hline(65, 359, 340, 2, Color::BLACK);
        // Well aligned: start off by 10, length off by ~1.6%
        pm.render_hline(50, 364, 300, 2, Color::BLACK);
        let pix: Pix = pm.into();
        let config = DetectionConfig::default();
        let ctx = PixelContext::new(&pix, &config);

        let h = resolve_horizontal(&ctx, &mut NoTrace);
        assert_eq!(h.top.unwrap().position, 40);
        assert_eq!(h.bottom.unwrap().position, 301);
        assert_eq!(h.bottom_alignment, Some(BottomMatch::Well));
    }

    #[test]
    fn test_acceptable_bottom_beats_outer_unaligned() {
        let mut pm = page();
        pm.render_hline(150, 349, 380, 2, Color::BLACK);
        pm.render_hline(65, 359, 340, 2, Color::BLACK);
        let pix: Pix = pm.into();
        let config = DetectionConfig::default();
        let ctx = PixelContext::new(&pix, &config);

        let h = resolve_horizontal(&ctx, &mut NoTrace);
        assert_eq!(h.bottom.unwrap().position, 341);
        assert_eq!(h.bottom_alignment, Some(BottomMatch::Acceptable));
    }

    #[test]
    fn test_unaligned_takes_outermost() {
        let mut pm = page();
        pm.render_hline(150, 349, 380, 2, Color::BLACK);
        pm.render_hline(120, 319, 330, 2, Color::BLACK);
        let pix: Pix = pm.into();
        let config = DetectionConfig::default();
        let ctx = PixelContext::new(&pix, &config);

        let h = resolve_horizontal(&ctx, &mut NoTrace);
        assert_eq!(h.bottom.unwrap().position, 381);
        assert_eq!(h.bottom_alignment, Some(BottomMatch::Unaligned));
    }

    #[test]
    fn test_thresholds_are_configurable() {
        let mut pm = page();
        pm.render_hline(150, 349, 380, 2, Color::BLACK);
        pm.render_hline(65, 359, 340, 2, Color::BLACK);
        let pix: Pix = pm.into();

        // Relaxed strict regime turns the acceptable line into a well one
        let relaxed = DetectionConfig::default().with_bottom_alignment(Thresholds {
            well_offset: 30,
            well_length: 0.10,
            ..Thresholds::default()
        });
        let ctx = PixelContext::new(&pix, &relaxed);
        let h = resolve_horizontal(&ctx, &mut NoTrace);
        assert_eq!(h.bottom.unwrap().position, 341);
        assert_eq!(h.bottom_alignment, Some(BottomMatch::Well));

        // Tightened acceptable regime rejects it
        let strict = DetectionConfig::default().with_bottom_alignment(Thresholds {
            acceptable_offset: 20,
            ..Thresholds::default()
        });
        let ctx = PixelContext::new(&pix, &strict);
        let h = resolve_horizontal(&ctx, &mut NoTrace);
        assert_eq!(h.bottom.unwrap().position, 381);
        assert_eq!(h.bottom_alignment, Some(BottomMatch::Unaligned));
    }

    #[test]
    fn test_missing_top() {
        let mut pm = Pix::new_filled(400, 400, 3, Color::WHITE).unwrap().to_mut();
        pm.render_hline(40, 359, 350, 2, Color::BLACK);
        let pix: Pix = pm.into();
        let config = DetectionConfig::default();
        let ctx = PixelContext::new(&pix, &config);

        let h = resolve_horizontal(&ctx, &mut NoTrace);
        assert!(h.top.is_none());
        assert_eq!(h.bottom.unwrap().position, 351);
        assert_eq!(h.bottom_alignment, Some(BottomMatch::Unaligned));
    }
}
