//! Rectangle closure check
//!
//! Each border's run should end where the perpendicular borders sit.
//! Eight endpoint-to-border distances are checked and scored as
//! measured, synthesized borders included.

use crate::DetectionConfig;
use crate::candidate::DetectedBorders;

/// Which endpoint is compared against which border
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignmentCheckKind {
    TopStartToLeft,
    TopEndToRight,
    BottomStartToLeft,
    BottomEndToRight,
    LeftStartToTop,
    LeftEndToBottom,
    RightStartToTop,
    RightEndToBottom,
}

/// One endpoint-to-border distance check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentCheck {
    pub kind: AlignmentCheckKind,
    pub distance: u32,
    pub passed: bool,
}

/// Outcome of the eight alignment checks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentReport {
    pub checks: [AlignmentCheck; 8],
    /// Fraction of checks passed
    pub score: f64,
    /// `score >= min_alignment_pass`
    pub aligned: bool,
}

impl AlignmentReport {
    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }
}

/// Score how well the four borders close into a rectangle.
pub fn check_alignment(borders: &DetectedBorders, config: &DetectionConfig) -> AlignmentReport {
    use AlignmentCheckKind::*;

    let tol = config.alignment_tolerance;
    let measured = |endpoint: i32, border: i32| {
        let distance = (endpoint - border).unsigned_abs();
        (distance, distance <= tol)
    };

    let DetectedBorders {
        top,
        bottom,
        left,
        right,
    } = borders;

    let rows = [
        (TopStartToLeft, measured(top.run_start, left.position)),
        (TopEndToRight, measured(top.run_end(), right.position)),
        (BottomStartToLeft, measured(bottom.run_start, left.position)),
        (BottomEndToRight, measured(bottom.run_end(), right.position)),
        (LeftStartToTop, measured(left.run_start, top.position)),
        (LeftEndToBottom, measured(left.run_end(), bottom.position)),
        (RightStartToTop, measured(right.run_start, top.position)),
        (RightEndToBottom, measured(right.run_end(), bottom.position)),
    ];
    let checks = rows.map(|(kind, (distance, passed))| AlignmentCheck {
        kind,
        distance,
        passed,
    });

    let score = checks.iter().filter(|c| c.passed).count() as f64 / checks.len() as f64;
    AlignmentReport {
        checks,
        score,
        aligned: score >= config.min_alignment_pass,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::{CandidateOrigin, LineCandidate};

    fn line(position: i32, run_start: i32, run_end: i32) -> LineCandidate {
        LineCandidate {
            position,
            run_start,
            run_length: run_end - run_start + 1,
            thickness: 2,
            confidence: 1.0,
            origin: CandidateOrigin::Detected,
        }
    }

    #[test]
    fn test_closed_rectangle_fully_aligned() {
        let borders = DetectedBorders {
            top: line(40, 40, 359),
            bottom: line(359, 40, 359),
            left: line(40, 40, 359),
            right: line(359, 40, 359),
        };
        let report = check_alignment(&borders, &DetectionConfig::default());
        assert_eq!(report.passed(), 8);
        assert_eq!(report.score, 1.0);
        assert!(report.aligned);
    }

    #[test]
    fn test_disjoint_lines_not_aligned() {
        let borders = DetectedBorders {
            top: line(60, 40, 239),
            bottom: line(341, 160, 359),
            left: line(100, 120, 280),
            right: line(299, 120, 280),
        };
        let report = check_alignment(&borders, &DetectionConfig::default());
        assert_eq!(report.passed(), 0);
        assert!(!report.aligned);
    }

    #[test]
    fn test_synthesized_border_scored_as_measured() {
        let mut left = line(40, 40, 359);
        left.origin = CandidateOrigin::Synthesized;
        let borders = DetectedBorders {
            top: line(40, 40, 359),
            bottom: line(359, 40, 359),
            left,
            right: line(359, 40, 359),
        };
        let report = check_alignment(&borders, &DetectionConfig::default());
        assert_eq!(report.passed(), 8);
        assert!(report.checks[4].passed);
        assert_eq!(report.checks[4].distance, 0);
        assert_eq!(report.score, 1.0);
    }

    #[test]
    fn test_tolerance_boundary() {
        let borders = DetectedBorders {
            top: line(40, 55, 359),
            bottom: line(359, 56, 359),
            left: line(40, 40, 359),
            right: line(359, 40, 359),
        };
        let report = check_alignment(&borders, &DetectionConfig::default());
        assert!(report.checks[0].passed);
        assert!(!report.checks[2].passed);
        assert_eq!(report.passed(), 7);
    }
}
