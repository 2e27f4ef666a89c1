//! Consensus pipeline result

use super::candidate::CandidateResponse;
use super::confidence::ConfidenceBand;
use serde::{Deserialize, Serialize};

/// Complete output of one consensus pipeline run.
///
/// `final_answer` is non-empty whenever the pipeline completes, and
/// `candidates` is non-empty whenever `confidence` was computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusResult {
    pub final_answer: String,
    pub confidence: ConfidenceBand,
    pub candidates: Vec<CandidateResponse>,
    /// Merged answer (HIGH path, when synthesis succeeded)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synthesis: Option<String>,
    /// Raw verifier output (HIGH path, when verification ran)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<String>,
    pub reasoning: String,
    pub agreement_score: f64,
}

impl ConsensusResult {
    /// Providers that contributed at least one candidate, in first-seen order.
    pub fn providers(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for c in &self.candidates {
            if !seen.contains(&c.provider.as_str()) {
                seen.push(&c.provider);
            }
        }
        seen
    }
}
