//! Consensus configuration from TOML (`[consensus]` section)

use chorus_application::ConsensusParams;
use chorus_application::config::consensus_params::DEFAULT_CALL_TIMEOUT_SECS;
use chorus_domain::{GenerationParams, SelectionPolicy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw consensus configuration from TOML
///
/// The temperature set, confidence threshold and cache TTL are fixed and
/// have no keys here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConsensusConfig {
    /// Per-call deadline in seconds
    pub timeout_seconds: u64,
    /// Token cap for candidate, synthesis and single-model calls
    pub max_tokens: u32,
    /// Which provider synthesizes, verifies, or answers alone
    /// (`first_available`, `highest_reliability`, `named:<provider>`)
    pub selection: SelectionPolicy,
}

impl Default for FileConsensusConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_CALL_TIMEOUT_SECS,
            max_tokens: GenerationParams::default().max_tokens,
            selection: SelectionPolicy::default(),
        }
    }
}

impl FileConsensusConfig {
    pub fn to_params(&self) -> ConsensusParams {
        ConsensusParams::default()
            .with_call_timeout(Some(Duration::from_secs(self.timeout_seconds)))
            .with_max_tokens(self.max_tokens)
            .with_selection(self.selection.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_application_defaults() {
        assert_eq!(
            FileConsensusConfig::default().to_params(),
            ConsensusParams::default()
        );
    }

    #[test]
    fn test_to_params() {
        let config = FileConsensusConfig {
            timeout_seconds: 15,
            max_tokens: 512,
            selection: SelectionPolicy::Named("groq".to_string()),
        };
        let params = config.to_params();
        assert_eq!(params.call_timeout, Some(Duration::from_secs(15)));
        assert_eq!(params.max_tokens, 512);
        assert_eq!(params.selection, SelectionPolicy::Named("groq".to_string()));
    }
}
