//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod cache_store;
pub mod clock;
pub mod context_injector;
pub mod llm_gateway;
pub mod outcome_recorder;
pub mod progress;
pub mod response_sink;
