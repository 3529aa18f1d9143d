//! Damaged border regression test
//!
//! Borders with anti-aliasing gaps up to the bridging limit, a missing left stroke, and four
//! strokes that never close into a rectangle.
//!
//! Run with:
//! ```
//! cargo test -p gridcrop-detect --test border_reg
//! ```

use gridcrop_core::GridBounds;
use gridcrop_detect::{
    CandidateOrigin, DetectionConfig, Edge, FallbackReason, TraceEvent, detect_grid_bounds,
    detect_grid_bounds_traced,
};
use gridcrop_test::{RegParams, synth};

#[test]
fn border_gap_reg() {
    let mut rp = RegParams::new("border_gap");
    let config = DetectionConfig::default();
    let rect = GridBounds::new(40, 40, 320, 320);
    let pix = synth::bordered_page(400, 400, rect, 2).unwrap();

    let clean = detect_grid_bounds(&pix, &config).unwrap();
    rp.compare_bounds(&rect, &clean, 2);

    // Gaps up to max_gap_pixels wide are bridged: same result as intact
    let widest = config.max_gap_pixels;
    for (period, gap) in [(5, 1), (7, 1), (12, 1), (7, 2), (8, widest), (12, widest)] {
        let gapped = synth::punch_border_gaps(&pix, &rect, 2, period, gap);
        let bounds = detect_grid_bounds(&gapped, &config).unwrap();
        rp.compare_bounds(&clean, &bounds, 0);
    }

    assert!(rp.cleanup());
}

#[test]
fn border_left_erased_reg() {
    let mut rp = RegParams::new("border_left_erased");
    let rect = GridBounds::new(40, 40, 320, 320);
    let pix = synth::bordered_page(400, 400, rect, 2).unwrap();
    let erased = synth::erase_left_border(&pix, &rect, 2);

    let mut events: Vec<TraceEvent> = Vec::new();
    let bounds =
        detect_grid_bounds_traced(&erased, &DetectionConfig::default(), &mut events).unwrap();
    rp.compare_bounds(&rect, &bounds, 2);

    // The left border was synthesized from the horizontals' endpoints
    let left = events.iter().find_map(|e| match e {
        TraceEvent::Vertical {
            edge: Edge::Left,
            chosen,
            ..
        } => *chosen,
        _ => None,
    });
    let synthesized = left.is_some_and(|c| c.origin == CandidateOrigin::Synthesized);
    rp.compare_values(1.0, synthesized as u8 as f64, 0.0);

    // The synthesized border closes the rectangle on all eight checks
    let score = events.iter().find_map(|e| match e {
        TraceEvent::Alignment(report) => Some(report.score),
        _ => None,
    });
    rp.compare_values(1.0, score.unwrap_or(0.0), 0.0);

    // Detection succeeded rather than falling back
    let accepted = matches!(events.last(), Some(TraceEvent::Accepted { .. }));
    rp.compare_values(1.0, accepted as u8 as f64, 0.0);

    assert!(rp.cleanup());
}

#[test]
fn border_false_rectangle_reg() {
    let mut rp = RegParams::new("border_false_rectangle");
    let config = DetectionConfig::default();
    let pix = synth::false_rectangle_page(400, 400).unwrap();

    let mut events: Vec<TraceEvent> = Vec::new();
    let bounds = detect_grid_bounds_traced(&pix, &config, &mut events).unwrap();
    rp.compare_bounds(&GridBounds::new(32, 48, 344, 304), &bounds, 0);

    let rejected = matches!(
        events.last(),
        Some(TraceEvent::Fallback {
            reason: FallbackReason::CornersAndAlignment { valid_corners: 0, .. },
            ..
        })
    );
    rp.compare_values(1.0, rejected as u8 as f64, 0.0);

    // Neither vertical was synthesized: the strokes exist, they just do not meet
    let synthesized = events
        .iter()
        .filter(|e| {
            matches!(e, TraceEvent::Vertical { chosen: Some(c), .. } if c.is_synthesized())
        })
        .count();
    rp.compare_values(0.0, synthesized as f64, 0.0);

    assert!(rp.cleanup());
}
