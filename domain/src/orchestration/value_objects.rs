//! Orchestration value objects - the result handed back to the chat caller.

use crate::consensus::ConsensusResult;
use crate::routing::TaskAnalysis;
use serde::{Deserialize, Serialize};

/// Which path produced the answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseRoute {
    /// Multi-provider consensus pipeline (possibly served from cache)
    Consensus,
    /// One call to the selected provider (router judged the task cheap)
    SingleModel,
    /// Primary path failed; one best-effort provider call answered instead
    FallbackSingleModel,
}

impl ResponseRoute {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseRoute::Consensus => "consensus",
            ResponseRoute::SingleModel => "single_model",
            ResponseRoute::FallbackSingleModel => "fallback_single_model",
        }
    }
}

/// Final outcome of one chat request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatOutcome {
    /// Text shown to the user
    pub answer: String,
    pub route: ResponseRoute,
    pub task: TaskAnalysis,
    /// Present when the consensus pipeline produced the answer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consensus: Option<ConsensusResult>,
    /// Provider that answered on the single-model paths
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Error that triggered the fallback, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    pub from_cache: bool,
    pub elapsed_ms: u64,
}

impl ChatOutcome {
    pub fn is_fallback(&self) -> bool {
        self.route == ResponseRoute::FallbackSingleModel
    }
}
