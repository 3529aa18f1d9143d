//! Detection configuration
//!
//! Every tuning constant the detector uses lives here as a named default.
//! The weights and thresholds were tuned empirically against rendered
//! chart pages; treat them as tuning parameters, not derived values.
//!
//! All structs are `#[serde(default)]`, so a partial JSON document such
//! as `{"corner_check": {"size": 14}}` overrides only the fields it names
//! and keeps every other default, nested groups included.

use crate::{DetectError, DetectResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper limit for every pixel-distance parameter
///
/// Keeps the signed scan arithmetic far from overflow for any image a
/// `u32` can describe.
pub const MAX_PIXEL_PARAM: u32 = 1 << 16;

/// Search bands for the four borders, as fractions of the image size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRegion {
    /// Top border is searched in rows `[0, height * top_max_y)`
    pub top_max_y: f64,
    /// Bottom border is searched in rows `[height * bottom_min_y, height)`
    pub bottom_min_y: f64,
    /// Left border is searched in columns `[0, width * left_max_x)`
    pub left_max_x: f64,
    /// Right border is searched in columns `[width * right_min_x, width)`
    pub right_min_x: f64,
}

impl Default for SearchRegion {
    fn default() -> Self {
        Self {
            top_max_y: 0.35,
            bottom_min_y: 0.65,
            left_max_x: 0.35,
            right_min_x: 0.65,
        }
    }
}

/// L-junction test at the four predicted corners
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CornerCheck {
    /// Arm length walked from the corner, in pixels
    pub size: u32,
    /// Half-size of the window that must contain ink at the corner
    pub search_tolerance: u32,
    /// Half-width of the band checked at each arm step
    pub band: u32,
    /// Fraction of arm steps that must be dark on both arms
    pub min_coverage: f64,
}

impl Default for CornerCheck {
    fn default() -> Self {
        Self {
            size: 10,
            search_tolerance: 5,
            band: 2,
            min_coverage: 0.6,
        }
    }
}

/// Internal grid-line regularity check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLineVerification {
    /// Run the check at all
    pub enabled: bool,
    /// Lines needed on an axis before its spacing is analyzed
    pub min_internal_lines: usize,
    /// Allowed relative deviation of a spacing from the median
    pub spacing_tolerance: f64,
    /// Minimum run length as a fraction of the bounds' span
    pub min_span: f64,
    /// A line must start within this fraction of the span from its
    /// start, and end within it from its end
    pub inner_band: f64,
    /// Detections closer than this many pixels are one line
    pub merge_distance: u32,
    /// Share of consistent spacings needed to call an axis regular
    pub regular_consistency: f64,
    /// Confidence bonus when at least one axis is regular
    pub regular_bonus: f64,
}

impl Default for GridLineVerification {
    fn default() -> Self {
        Self {
            enabled: true,
            min_internal_lines: 3,
            spacing_tolerance: 0.2,
            min_span: 0.8,
            inner_band: 0.1,
            merge_distance: 3,
            regular_consistency: 0.7,
            regular_bonus: 0.2,
        }
    }
}

/// Thresholds matching a bottom candidate against the top border
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BottomAlignment {
    /// Max run-start difference for a well-aligned bottom, in pixels
    pub well_offset: u32,
    /// Max relative run-length difference for a well-aligned bottom
    pub well_length: f64,
    /// Max run-start difference for an acceptable bottom, in pixels
    pub acceptable_offset: u32,
    /// Max relative run-length difference for an acceptable bottom
    pub acceptable_length: f64,
}

impl Default for BottomAlignment {
    fn default() -> Self {
        Self {
            well_offset: 15,
            well_length: 0.03,
            acceptable_offset: 30,
            acceptable_length: 0.10,
        }
    }
}

/// Vertical border search guided by the horizontal borders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerticalGuidance {
    /// Columns searched on each side of the expected position
    pub window: u32,
    /// Farther than this from the expected position, the border is
    /// synthesized instead
    pub max_deviation: u32,
    /// Confidence given to a synthesized border
    pub synthesized_confidence: f64,
    /// Score bonus for a candidate at the expected position, falling
    /// linearly to zero at the window edge
    pub proximity_bonus: f64,
}

impl Default for VerticalGuidance {
    fn default() -> Self {
        Self {
            window: 30,
            max_deviation: 20,
            synthesized_confidence: 0.6,
            proximity_bonus: 0.2,
        }
    }
}

/// Confidence weights and acceptance thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Weight of the length score in a line's confidence
    pub line_length: f64,
    /// Weight of the thickness score in a line's confidence
    pub line_thickness: f64,
    /// Run length, as a fraction of the image dimension, that earns a
    /// full length score
    pub length_reference: f64,
    /// Minimum confidence for a candidate found by band scanning
    pub min_candidate_confidence: f64,
    /// Minimum confidence for a candidate in a guided search window
    pub guided_min_confidence: f64,
    /// A stronger candidate must beat the outermost by more than this
    pub preference_margin: f64,
    /// ... and lie within this many pixels of it
    pub preference_distance: u32,
    /// Weight of the mean border confidence
    pub border: f64,
    /// Weight of the valid-corner fraction
    pub corner: f64,
    /// Weight of the alignment score
    pub alignment: f64,
    /// Weight of the internal grid-line confidence
    pub grid_lines: f64,
    /// Overall confidence below this falls back
    pub min_overall_confidence: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            line_length: 0.6,
            line_thickness: 0.4,
            length_reference: 0.8,
            min_candidate_confidence: 0.4,
            guided_min_confidence: 0.3,
            preference_margin: 0.2,
            preference_distance: 50,
            border: 0.3,
            corner: 0.25,
            alignment: 0.25,
            grid_lines: 0.2,
            min_overall_confidence: 0.35,
        }
    }
}

/// Fixed margins of the fallback rectangle, as fractions of the image size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackMargins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for FallbackMargins {
    fn default() -> Self {
        Self {
            top: 0.12,
            bottom: 0.12,
            left: 0.08,
            right: 0.06,
        }
    }
}

/// Complete parameter set for one detection call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// A pixel is dark iff R, G and B are all strictly below this
    pub dark_pixel_threshold: u8,
    /// Light pixels tolerated inside a run
    pub max_gap_pixels: u32,
    /// Minimum border run length as a fraction of the image dimension
    pub min_border_fraction: f64,
    /// Nominal border stroke width in pixels
    pub expected_border_thickness: u32,
    /// Extra neighbor lines examined beyond the nominal stroke width
    pub thickness_tolerance: u32,
    pub search_region: SearchRegion,
    pub corner_check: CornerCheck,
    pub grid_lines: GridLineVerification,
    pub bottom_alignment: BottomAlignment,
    pub vertical_guidance: VerticalGuidance,
    pub weights: ScoringWeights,
    /// Max distance for an alignment check to pass, in pixels
    pub alignment_tolerance: u32,
    /// Fraction of the eight alignment checks that must pass
    pub min_alignment_pass: f64,
    pub fallback: FallbackMargins,
    /// Pixels added on every side of a detected rectangle
    pub border_expansion: u32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            dark_pixel_threshold: 100,
            max_gap_pixels: 3,
            min_border_fraction: 0.3,
            expected_border_thickness: 2,
            thickness_tolerance: 2,
            search_region: SearchRegion::default(),
            corner_check: CornerCheck::default(),
            grid_lines: GridLineVerification::default(),
            bottom_alignment: BottomAlignment::default(),
            vertical_guidance: VerticalGuidance::default(),
            weights: ScoringWeights::default(),
            alignment_tolerance: 15,
            min_alignment_pass: 0.5,
            fallback: FallbackMargins::default(),
            border_expansion: 0,
        }
    }
}

impl DetectionConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON document over the defaults
    pub fn from_json_str(json: &str) -> DetectResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a (possibly partial) JSON configuration file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> DetectResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Set the dark-pixel threshold
    pub fn with_dark_pixel_threshold(mut self, threshold: u8) -> Self {
        self.dark_pixel_threshold = threshold;
        self
    }

    /// Set the gap tolerance inside a run
    pub fn with_max_gap_pixels(mut self, gap: u32) -> Self {
        self.max_gap_pixels = gap;
        self
    }

    /// Set the minimum border length fraction
    pub fn with_min_border_fraction(mut self, fraction: f64) -> Self {
        self.min_border_fraction = fraction;
        self
    }

    /// Set the nominal border thickness and its tolerance
    pub fn with_border_thickness(mut self, expected: u32, tolerance: u32) -> Self {
        self.expected_border_thickness = expected;
        self.thickness_tolerance = tolerance;
        self
    }

    /// Set the search bands
    pub fn with_search_region(mut self, region: SearchRegion) -> Self {
        self.search_region = region;
        self
    }

    /// Set the corner arm length
    pub fn with_corner_size(mut self, size: u32) -> Self {
        self.corner_check.size = size;
        self
    }

    /// Enable or disable internal grid-line verification
    pub fn with_grid_line_verification(mut self, enabled: bool) -> Self {
        self.grid_lines.enabled = enabled;
        self
    }

    /// Set the bottom-border alignment thresholds
    pub fn with_bottom_alignment(mut self, alignment: BottomAlignment) -> Self {
        self.bottom_alignment = alignment;
        self
    }

    /// Set the fallback margins
    pub fn with_fallback(mut self, margins: FallbackMargins) -> Self {
        self.fallback = margins;
        self
    }

    /// Set the margin added around a detected rectangle
    pub fn with_border_expansion(mut self, pixels: u32) -> Self {
        self.border_expansion = pixels;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> DetectResult<()> {
        fn unit_open(name: &str, v: f64) -> DetectResult<()> {
            if v > 0.0 && v < 1.0 {
                Ok(())
            } else {
                Err(DetectError::InvalidConfig(format!(
                    "{} must be in (0, 1), got {}",
                    name, v
                )))
            }
        }
        fn unit_closed(name: &str, v: f64) -> DetectResult<()> {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(DetectError::InvalidConfig(format!(
                    "{} must be in [0, 1], got {}",
                    name, v
                )))
            }
        }
        fn non_negative(name: &str, v: f64) -> DetectResult<()> {
            if v >= 0.0 {
                Ok(())
            } else {
                Err(DetectError::InvalidConfig(format!(
                    "{} must be non-negative, got {}",
                    name, v
                )))
            }
        }

        fn pixels(name: &str, v: u32) -> DetectResult<()> {
            if v <= MAX_PIXEL_PARAM {
                Ok(())
            } else {
                Err(DetectError::InvalidConfig(format!(
                    "{} must be at most {} pixels, got {}",
                    name, MAX_PIXEL_PARAM, v
                )))
            }
        }

        if !(self.min_border_fraction > 0.0 && self.min_border_fraction <= 1.0) {
            return Err(DetectError::InvalidConfig(format!(
                "min_border_fraction must be in (0, 1], got {}",
                self.min_border_fraction
            )));
        }
        if self.expected_border_thickness == 0 {
            return Err(DetectError::InvalidConfig(
                "expected_border_thickness must be positive".to_string(),
            ));
        }

        for (name, value) in [
            ("max_gap_pixels", self.max_gap_pixels),
            ("expected_border_thickness", self.expected_border_thickness),
            ("thickness_tolerance", self.thickness_tolerance),
            ("corner_check.size", self.corner_check.size),
            ("corner_check.search_tolerance", self.corner_check.search_tolerance),
            ("corner_check.band", self.corner_check.band),
            ("grid_lines.merge_distance", self.grid_lines.merge_distance),
            ("vertical_guidance.window", self.vertical_guidance.window),
            ("vertical_guidance.max_deviation", self.vertical_guidance.max_deviation),
        ] {
            pixels(name, value)?;
        }

        let r = &self.search_region;
        unit_open("search_region.top_max_y", r.top_max_y)?;
        unit_open("search_region.bottom_min_y", r.bottom_min_y)?;
        unit_open("search_region.left_max_x", r.left_max_x)?;
        unit_open("search_region.right_min_x", r.right_min_x)?;

        let c = &self.corner_check;
        if c.size == 0 {
            return Err(DetectError::InvalidConfig(
                "corner_check.size must be positive".to_string(),
            ));
        }
        unit_closed("corner_check.min_coverage", c.min_coverage)?;

        let g = &self.grid_lines;
        if g.min_internal_lines < 2 {
            return Err(DetectError::InvalidConfig(
                "grid_lines.min_internal_lines must be at least 2".to_string(),
            ));
        }
        non_negative("grid_lines.spacing_tolerance", g.spacing_tolerance)?;
        unit_closed("grid_lines.min_span", g.min_span)?;
        unit_closed("grid_lines.inner_band", g.inner_band)?;
        unit_closed("grid_lines.regular_consistency", g.regular_consistency)?;
        non_negative("grid_lines.regular_bonus", g.regular_bonus)?;

        let b = &self.bottom_alignment;
        non_negative("bottom_alignment.well_length", b.well_length)?;
        non_negative("bottom_alignment.acceptable_length", b.acceptable_length)?;

        let v = &self.vertical_guidance;
        if v.window == 0 {
            return Err(DetectError::InvalidConfig(
                "vertical_guidance.window must be positive".to_string(),
            ));
        }
        unit_closed(
            "vertical_guidance.synthesized_confidence",
            v.synthesized_confidence,
        )?;
        non_negative("vertical_guidance.proximity_bonus", v.proximity_bonus)?;

        let w = &self.weights;
        if !(w.length_reference > 0.0 && w.length_reference.is_finite()) {
            return Err(DetectError::InvalidConfig(format!(
                "weights.length_reference must be positive, got {}",
                w.length_reference
            )));
        }
        for (name, value) in [
            ("weights.line_length", w.line_length),
            ("weights.line_thickness", w.line_thickness),
            ("weights.border", w.border),
            ("weights.corner", w.corner),
            ("weights.alignment", w.alignment),
            ("weights.grid_lines", w.grid_lines),
            ("weights.preference_margin", w.preference_margin),
        ] {
            non_negative(name, value)?;
        }
        unit_closed("weights.min_candidate_confidence", w.min_candidate_confidence)?;
        unit_closed("weights.guided_min_confidence", w.guided_min_confidence)?;
        unit_closed("weights.min_overall_confidence", w.min_overall_confidence)?;
        unit_closed("min_alignment_pass", self.min_alignment_pass)?;

        let f = &self.fallback;
        for (name, value) in [
            ("fallback.top", f.top),
            ("fallback.bottom", f.bottom),
            ("fallback.left", f.left),
            ("fallback.right", f.right),
        ] {
            unit_closed(name, value)?;
        }
        if f.left + f.right >= 1.0 || f.top + f.bottom >= 1.0 {
            return Err(DetectError::InvalidConfig(
                "fallback margins leave no area".to_string(),
            ));
        }

        Ok(())
    }
}
