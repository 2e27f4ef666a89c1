//! Confidence band classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Agreement at or above this value is classified as [`ConfidenceBand::High`].
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.70;

/// Outcome of thresholding the agreement score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfidenceBand {
    /// Candidates agree: synthesize and verify a single answer
    High,
    /// Candidates conflict: surface the disagreement
    Low,
}

impl ConfidenceBand {
    pub fn classify(agreement_score: f64) -> Self {
        if agreement_score >= HIGH_CONFIDENCE_THRESHOLD {
            ConfidenceBand::High
        } else {
            ConfidenceBand::Low
        }
    }

    pub fn is_high(&self) -> bool {
        matches!(self, ConfidenceBand::High)
    }
}

impl fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceBand::High => write!(f, "HIGH"),
            ConfidenceBand::Low => write!(f, "LOW"),
        }
    }
}
