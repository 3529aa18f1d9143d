//! Confidence scoring
//!
//! Two levels: a per-line score from run length and stroke thickness,
//! and the overall score that gates acceptance of a detected rectangle.

use crate::DetectionConfig;
use crate::candidate::DetectedBorders;

/// Confidence of a single line candidate in `[0, 1]`
///
/// `min(1, run_length / (dimension * length_reference)) * line_length
///  + min(1, thickness / expected_border_thickness) * line_thickness`
pub fn line_confidence(
    run_length: i32,
    dimension: i32,
    thickness: u32,
    config: &DetectionConfig,
) -> f64 {
    let w = &config.weights;
    let reference = dimension as f64 * w.length_reference;
    let length_score = if reference > 0.0 {
        (run_length as f64 / reference).min(1.0)
    } else {
        0.0
    };
    let thickness_score =
        (thickness as f64 / config.expected_border_thickness.max(1) as f64).min(1.0);
    length_score * w.line_length + thickness_score * w.line_thickness
}

/// Sub-scores and weighted total of one detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceBreakdown {
    /// Mean confidence of the four borders
    pub border: f64,
    /// Valid corners / 4
    pub corner: f64,
    /// Fraction of alignment checks passed
    pub alignment: f64,
    /// Internal grid-line confidence
    pub grid_lines: f64,
    /// Weighted sum of the above
    pub overall: f64,
}

impl ConfidenceBreakdown {
    pub fn compute(
        borders: &DetectedBorders,
        valid_corners: usize,
        alignment_score: f64,
        grid_line_confidence: f64,
        config: &DetectionConfig,
    ) -> Self {
        let w = &config.weights;
        let border = borders.sides().iter().map(|c| c.confidence).sum::<f64>() / 4.0;
        let corner = valid_corners.min(4) as f64 / 4.0;
        let overall = border * w.border
            + corner * w.corner
            + alignment_score * w.alignment
            + grid_line_confidence * w.grid_lines;
        Self {
            border,
            corner,
            alignment: alignment_score,
            grid_lines: grid_line_confidence,
            overall,
        }
    }
}
