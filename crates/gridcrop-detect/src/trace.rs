//! Detection trace
//!
//! The detector reports what each stage saw to a caller-supplied
//! [`TraceSink`]. Sinks only observe; nothing they do can change the
//! detection result.
//!
//! ```
//! use gridcrop_core::{Color, Pix};
//! use gridcrop_detect::{DetectionConfig, TraceEvent, detect_grid_bounds_traced};
//!
//! let pix = Pix::new_filled(64, 64, 3, Color::WHITE).unwrap();
//! let mut events: Vec<TraceEvent> = Vec::new();
//! detect_grid_bounds_traced(&pix, &DetectionConfig::default(), &mut events).unwrap();
//! assert!(matches!(events.last(), Some(TraceEvent::Fallback { .. })));
//! ```

use crate::alignment::AlignmentReport;
use crate::candidate::{Edge, LineCandidate};
use crate::confidence::ConfidenceBreakdown;
use crate::corner::CornerReport;
use crate::detector::FallbackReason;
use crate::gridlines::GridLineReport;
use crate::horizontal::BottomMatch;
use gridcrop_core::GridBounds;

/// One observation from a detection stage
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    /// Band search for a horizontal border
    Candidates {
        edge: Edge,
        count: usize,
        chosen: Option<LineCandidate>,
    },
    /// Match class of the chosen bottom border
    BottomAlignment { class: BottomMatch },
    /// Resolution of a vertical border; `expected` is set for a guided
    /// search
    Vertical {
        edge: Edge,
        expected: Option<i32>,
        count: usize,
        chosen: Option<LineCandidate>,
    },
    Corners(CornerReport),
    Alignment(AlignmentReport),
    GridLines(GridLineReport),
    Confidence(ConfidenceBreakdown),
    /// Detection succeeded with these bounds (after expansion)
    Accepted { bounds: GridBounds },
    /// Detection was inconclusive; the fallback rectangle was returned
    Fallback {
        reason: FallbackReason,
        bounds: GridBounds,
    },
}

/// Receiver of [`TraceEvent`]s
pub trait TraceSink {
    fn record(&mut self, event: &TraceEvent);
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl TraceSink for NoTrace {
    #[inline]
    fn record(&mut self, _event: &TraceEvent) {}
}

/// Forwards every event to the `log` facade at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTrace;

impl TraceSink for LogTrace {
    fn record(&mut self, event: &TraceEvent) {
        log::debug!("gridcrop trace: {:?}", event);
    }
}

/// Collects every event
impl TraceSink for Vec<TraceEvent> {
    fn record(&mut self, event: &TraceEvent) {
        self.push(event.clone());
    }
}

/// Calls the wrapped closure for every event
pub struct FnTrace<F>(pub F);

impl<F: FnMut(&TraceEvent)> TraceSink for FnTrace<F> {
    fn record(&mut self, event: &TraceEvent) {
        (self.0)(event)
    }
}
