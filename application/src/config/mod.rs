//! Application-level configuration.
//!
//! - [`ConsensusParams`] - pipeline call control (timeouts, token cap, selection)
//! - [`ChatConfig`] - container handed to the chat orchestrator

pub mod consensus_params;

pub use consensus_params::ConsensusParams;

use chorus_domain::RoutingMode;

/// Configuration container for [`HandleChatUseCase`](crate::use_cases::handle_chat::HandleChatUseCase).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatConfig {
    /// Whether the consensus path may run
    pub mode: RoutingMode,
    pub consensus: ConsensusParams,
    /// System prompt used when the caller supplies none
    pub default_system_prompt: Option<String>,
}

impl ChatConfig {
    pub fn new(mode: RoutingMode, consensus: ConsensusParams) -> Self {
        Self {
            mode,
            consensus,
            default_system_prompt: None,
        }
    }

    pub fn with_default_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.default_system_prompt = Some(prompt.into());
        self
    }
}
