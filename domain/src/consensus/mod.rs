//! Consensus scoring.
//!
//! Pure functions over a set of candidate responses:
//!
//! - [`agreement::agreement_score`] - mean pairwise keyword Jaccard
//! - [`confidence::ConfidenceBand`] - HIGH/LOW threshold at 0.70
//! - [`selection::determine_best_candidate`] - deterministic fallback pick
//! - [`summary::summarize_low_confidence`] - disclaimer with excerpts
//!
//! The pipeline that produces and consumes these lives in the application
//! layer (`RunConsensusUseCase`).

pub mod agreement;
pub mod candidate;
pub mod confidence;
pub mod result;
pub mod selection;
pub mod summary;

pub use agreement::{agreement_score, extract_keywords, jaccard};
pub use candidate::{CandidateResponse, heuristic_confidence};
pub use confidence::{ConfidenceBand, HIGH_CONFIDENCE_THRESHOLD};
pub use result::ConsensusResult;
pub use selection::{best_candidate_index, candidate_score, determine_best_candidate};
pub use summary::{LOW_CONFIDENCE_DISCLAIMER, LOW_CONFIDENCE_REASONING, summarize_low_confidence};
