//! Boundary detection orchestration
//!
//! # Pipeline
//!
//! 1. **Horizontal borders**: top and bottom, the bottom matched to the
//!    top's span.
//! 2. **Vertical borders**: searched near the horizontals' endpoints,
//!    synthesized from them when absent.
//! 3. **Corners and alignment**: the four lines must meet as L-shaped
//!    junctions or at least close into a rectangle.
//! 4. **Internal lines**: regular internal spacing raises confidence.
//! 5. **Confidence gate**: the weighted sub-scores decide between the
//!    detected rectangle and the fixed-margin fallback.
//!
//! Any inconclusive stage yields the fallback rectangle, never an error.

use crate::alignment::check_alignment;
use crate::candidate::DetectedBorders;
use crate::confidence::ConfidenceBreakdown;
use crate::corner::verify_corners;
use crate::fallback::fallback_bounds;
use crate::gridlines::analyze_grid_lines;
use crate::horizontal::resolve_horizontal;
use crate::trace::{NoTrace, TraceEvent, TraceSink};
use crate::vertical::resolve_vertical;
use crate::{DetectError, DetectResult, DetectionConfig, PixelContext};
use gridcrop_core::{GridBounds, Pix, PixelSource};
use log::debug;

/// Why detection gave up and returned the fallback rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FallbackReason {
    /// No top border candidate
    MissingTopBorder,
    /// No bottom border candidate
    MissingBottomBorder,
    /// Top border is not above the bottom border
    InvertedHorizontal,
    /// A vertical border could not be resolved
    MissingVerticalBorder,
    /// Left border is not left of the right border
    InvertedVertical,
    /// Fewer than two valid corners and the borders do not close
    CornersAndAlignment {
        valid_corners: usize,
        alignment_score: f64,
    },
    /// Bounds narrower or shorter than `min_border_fraction` of the image
    TooSmall { bounds: GridBounds },
    /// Overall confidence under the acceptance threshold
    LowConfidence { overall: f64 },
}

/// Grid boundary detector with a fixed configuration
///
/// # Example
/// ```no_run
/// use gridcrop_core::Pix;
/// use gridcrop_detect::{BoundaryDetector, DetectionConfig};
///
/// let detector = BoundaryDetector::new(DetectionConfig::default()).unwrap();
/// let page = Pix::new(850, 1100, 3).unwrap();
/// let bounds = detector.detect(&page).unwrap();
/// println!("grid at {}", bounds);
/// ```
#[derive(Debug, Clone)]
pub struct BoundaryDetector {
    config: DetectionConfig,
}

impl BoundaryDetector {
    /// Create a detector; the configuration is validated once here.
    pub fn new(config: DetectionConfig) -> DetectResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Detect the grid rectangle of `source`
    pub fn detect(&self, source: &dyn PixelSource) -> DetectResult<GridBounds> {
        self.detect_traced(source, &mut NoTrace)
    }

    /// Detect the grid rectangle of `source`, reporting each stage to `sink`
    pub fn detect_traced(
        &self,
        source: &dyn PixelSource,
        sink: &mut dyn TraceSink,
    ) -> DetectResult<GridBounds> {
        let (width, height) = (source.width(), source.height());
        if width == 0 || height == 0 {
            return Err(DetectError::EmptyImage { width, height });
        }

        let ctx = PixelContext::new(source, &self.config);
        match locate(&ctx, sink) {
            Ok(found) => {
                let bounds = found.expand_clamped(self.config.border_expansion, width, height);
                debug!("detect_grid_bounds: accepted {} (preliminary {})", bounds, found);
                sink.record(&TraceEvent::Accepted { bounds });
                Ok(bounds)
            }
            Err(reason) => {
                let bounds = fallback_bounds(width, height, &self.config.fallback);
                debug!("detect_grid_bounds: fallback {} ({:?})", bounds, reason);
                sink.record(&TraceEvent::Fallback { reason, bounds });
                Ok(bounds)
            }
        }
    }

    /// Detect the grid rectangle and crop it out of `source`
    pub fn detect_and_crop(&self, source: &dyn PixelSource) -> DetectResult<(GridBounds, Pix)> {
        let bounds = self.detect(source)?;
        let pix = gridcrop_core::crop(source, &bounds)?;
        Ok((bounds, pix))
    }
}

/// Detect the grid rectangle of `source`.
///
/// Returns the detected rectangle, or the fixed-margin fallback when
/// detection is inconclusive. Fails only for an empty image or an
/// invalid configuration.
pub fn detect_grid_bounds(
    source: &dyn PixelSource,
    config: &DetectionConfig,
) -> DetectResult<GridBounds> {
    detect_grid_bounds_traced(source, config, &mut NoTrace)
}

/// [`detect_grid_bounds`] with a trace sink
pub fn detect_grid_bounds_traced(
    source: &dyn PixelSource,
    config: &DetectionConfig,
    sink: &mut dyn TraceSink,
) -> DetectResult<GridBounds> {
    BoundaryDetector::new(config.clone())?.detect_traced(source, sink)
}

/// Detect the grid rectangle and crop it out of `source`
pub fn detect_and_crop(
    source: &dyn PixelSource,
    config: &DetectionConfig,
) -> DetectResult<(GridBounds, Pix)> {
    BoundaryDetector::new(config.clone())?.detect_and_crop(source)
}

/// Run the pipeline up to the confidence gate
fn locate(ctx: &PixelContext<'_>, sink: &mut dyn TraceSink) -> Result<GridBounds, FallbackReason> {
    let config = ctx.config();

    let horizontals = resolve_horizontal(ctx, sink);
    let top = horizontals.top.ok_or(FallbackReason::MissingTopBorder)?;
    let bottom = horizontals.bottom.ok_or(FallbackReason::MissingBottomBorder)?;
    if top.position >= bottom.position {
        return Err(FallbackReason::InvertedHorizontal);
    }
    debug!(
        "horizontal borders: top y={} bottom y={} ({:?})",
        top.position, bottom.position, horizontals.bottom_alignment
    );

    let verticals = resolve_vertical(ctx, &horizontals, sink);
    let (Some(left), Some(right)) = (verticals.left, verticals.right) else {
        return Err(FallbackReason::MissingVerticalBorder);
    };
    if left.position >= right.position {
        return Err(FallbackReason::InvertedVertical);
    }
    debug!(
        "vertical borders: left x={}{} right x={}{}",
        left.position,
        if left.is_synthesized() { " (synthesized)" } else { "" },
        right.position,
        if right.is_synthesized() { " (synthesized)" } else { "" },
    );

    let borders = DetectedBorders {
        top,
        bottom,
        left,
        right,
    };

    let corners = verify_corners(ctx, &borders);
    sink.record(&TraceEvent::Corners(corners));
    let alignment = check_alignment(&borders, config);
    sink.record(&TraceEvent::Alignment(alignment));
    let valid_corners = corners.valid_count();
    if valid_corners < 2 && !alignment.aligned {
        return Err(FallbackReason::CornersAndAlignment {
            valid_corners,
            alignment_score: alignment.score,
        });
    }

    let bounds = GridBounds::from_edges(left.position, top.position, right.position, bottom.position)
        .map_err(|_| FallbackReason::InvertedVertical)?;
    let min_w = config.min_border_fraction * ctx.width() as f64;
    let min_h = config.min_border_fraction * ctx.height() as f64;
    if (bounds.width as f64) < min_w || (bounds.height as f64) < min_h {
        return Err(FallbackReason::TooSmall { bounds });
    }

    let grid = analyze_grid_lines(ctx, &bounds);
    let grid_confidence = grid.confidence;
    sink.record(&TraceEvent::GridLines(grid));

    let breakdown = ConfidenceBreakdown::compute(
        &borders,
        valid_corners,
        alignment.score,
        grid_confidence,
        config,
    );
    sink.record(&TraceEvent::Confidence(breakdown));
    debug!(
        "confidence: border={:.3} corner={:.3} alignment={:.3} grid={:.3} overall={:.3}",
        breakdown.border,
        breakdown.corner,
        breakdown.alignment,
        breakdown.grid_lines,
        breakdown.overall
    );
    if breakdown.overall < config.weights.min_overall_confidence {
        return Err(FallbackReason::LowConfidence {
            overall: breakdown.overall,
        });
    }

    Ok(bounds)
}
