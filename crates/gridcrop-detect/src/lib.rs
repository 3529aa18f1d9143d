//! gridcrop-detect - Grid border detection for stitch-chart pages
//!
//! Locates the rectangular border of the grid on a rendered chart page so
//! the page can be cropped to the grid. Detection runs on any
//! [`PixelSource`](gridcrop_core::PixelSource) and never fails on an
//! inconclusive image: it returns a fixed-margin fallback rectangle
//! instead.
//!
//! # Quick Start
//!
//! ```no_run
//! use gridcrop_core::{Color, Pix};
//! use gridcrop_detect::{DetectionConfig, detect_grid_bounds};
//!
//! let page = Pix::new_filled(850, 1100, 3, Color::WHITE).unwrap();
//! let bounds = detect_grid_bounds(&page, &DetectionConfig::default()).unwrap();
//! println!("crop to {}", bounds);
//! ```
//!
//! # Modules
//!
//! - [`scan`]: Dark-run scanning along rows and columns
//! - [`candidate`]: Border line candidates and outermost selection
//! - [`horizontal`] / [`vertical`]: Border resolution per axis
//! - [`corner`] / [`alignment`]: Rectangle closure checks
//! - [`gridlines`]: Internal lattice regularity
//! - [`confidence`]: Weighted scoring
//! - [`detector`]: The full pipeline and its fallback
//! - [`trace`]: Per-stage observation hooks

pub mod alignment;
pub mod candidate;
pub mod confidence;
pub mod config;
mod context;
pub mod corner;
pub mod detector;
mod error;
pub mod fallback;
pub mod gridlines;
pub mod horizontal;
pub mod scan;
pub mod trace;
pub mod vertical;

pub use context::PixelContext;
pub use error::{DetectError, DetectResult};

pub use alignment::{AlignmentCheck, AlignmentCheckKind, AlignmentReport, check_alignment};
pub use candidate::{CandidateOrigin, DetectedBorders, Edge, LineCandidate};
pub use confidence::ConfidenceBreakdown;
pub use config::{
    CornerCheck, DetectionConfig, FallbackMargins, GridLineVerification, ScoringWeights,
    SearchRegion, VerticalGuidance,
};
pub use corner::{Corner, CornerReport, CornerResult, verify_corners};
pub use detector::{
    BoundaryDetector, FallbackReason, detect_and_crop, detect_grid_bounds,
    detect_grid_bounds_traced,
};
pub use fallback::fallback_bounds;
pub use gridlines::{GridLineReport, SpacingAnalysis, analyze_grid_lines};
pub use horizontal::{BottomMatch, HorizontalBorders, resolve_horizontal};
pub use scan::{Axis, DarkRun};
pub use trace::{FnTrace, LogTrace, NoTrace, TraceEvent, TraceSink};
pub use vertical::{VerticalBorders, resolve_vertical};

// Re-export core for convenience
pub use gridcrop_core;
