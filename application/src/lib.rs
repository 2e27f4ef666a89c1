//! Application layer for chorus
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod cache;
pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use cache::ResultCache;
pub use config::{ChatConfig, ConsensusParams};
pub use ports::{
    cache_store::CacheStore,
    clock::{Clock, SystemClock},
    context_injector::{ContextInjector, NoContext},
    llm_gateway::{GatewayError, LlmProvider, ProviderRegistry},
    outcome_recorder::{NoOutcomeRecorder, OutcomeRecorder},
    progress::{NoProgress, ProgressNotifier},
    response_sink::ResponseSink,
};
pub use use_cases::handle_chat::{ChatError, ChatRequest, HandleChatUseCase};
pub use use_cases::run_consensus::{
    ConsensusError, ConsensusOutput, RunConsensusInput, RunConsensusUseCase,
};
