//! Consensus parameters - pipeline call control.
//!
//! [`ConsensusParams`] groups the tunable parameters of the consensus
//! pipeline. The sampling design itself (temperature set, synthesis and
//! verification settings) is fixed and exposed as constants.

use chorus_domain::{GenerationParams, SelectionPolicy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Temperatures tried for every provider during candidate generation
pub const TEMPERATURES: [f64; 3] = [0.2, 0.25, 0.3];

/// Temperature of the synthesis and verification calls
pub const SYNTHESIS_TEMPERATURE: f64 = 0.1;

/// Token cap of the verifier's reply
pub const VERIFIER_MAX_TOKENS: u32 = 120;

/// Temperature of single-provider answers (simple tasks and fallback)
pub const SINGLE_MODEL_TEMPERATURE: f64 = 0.7;

/// Default per-call timeout
pub const DEFAULT_CALL_TIMEOUT_SECS: u64 = 60;

/// Pipeline call control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusParams {
    /// Upper bound for each individual provider call; `None` waits indefinitely.
    pub call_timeout: Option<Duration>,
    /// Token cap for candidate and single-model completions.
    pub max_tokens: u32,
    /// Provider used for synthesis, verification and single-model calls.
    pub selection: SelectionPolicy,
}

impl Default for ConsensusParams {
    fn default() -> Self {
        Self {
            call_timeout: Some(Duration::from_secs(DEFAULT_CALL_TIMEOUT_SECS)),
            max_tokens: GenerationParams::default().max_tokens,
            selection: SelectionPolicy::default(),
        }
    }
}

impl ConsensusParams {
    // ==================== Builder Methods ====================

    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = max;
        self
    }

    pub fn with_selection(mut self, selection: SelectionPolicy) -> Self {
        self.selection = selection;
        self
    }

    // ==================== Per-stage generation settings ====================

    /// Settings for one cell of the provider x temperature matrix
    pub fn candidate_params(&self, temperature: f64) -> GenerationParams {
        GenerationParams::default()
            .with_temperature(temperature)
            .with_max_tokens(self.max_tokens)
    }

    pub fn synthesis_params(&self) -> GenerationParams {
        GenerationParams::default()
            .with_temperature(SYNTHESIS_TEMPERATURE)
            .with_max_tokens(self.max_tokens)
    }

    pub fn verification_params(&self) -> GenerationParams {
        GenerationParams::default()
            .with_temperature(SYNTHESIS_TEMPERATURE)
            .with_max_tokens(VERIFIER_MAX_TOKENS)
    }

    pub fn single_model_params(&self) -> GenerationParams {
        GenerationParams::default()
            .with_temperature(SINGLE_MODEL_TEMPERATURE)
            .with_max_tokens(self.max_tokens)
    }
}
