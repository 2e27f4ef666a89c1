//! Domain layer for chorus
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Consensus
//!
//! A single question is answered by several providers at several sampling
//! temperatures. The answers ("candidates") are compared lexically:
//!
//! - **Agreement score**: mean pairwise Jaccard similarity of keyword sets
//! - **Confidence band**: HIGH at or above 0.70, LOW otherwise
//! - HIGH answers are merged and fact-checked; LOW answers surface the
//!   disagreement with short excerpts
//!
//! ## Routing
//!
//! A keyword router classifies each request; only complex and expert tasks
//! pay for the multi-provider fan-out.

pub mod cache;
pub mod config;
pub mod consensus;
pub mod core;
pub mod orchestration;
pub mod prompt;
pub mod providers;
pub mod routing;
pub mod session;

// Re-export commonly used types
pub use cache::{CacheEntry, CacheKey};
pub use config::OutputFormat;
pub use consensus::{
    CandidateResponse, ConfidenceBand, ConsensusResult, LOW_CONFIDENCE_DISCLAIMER,
    LOW_CONFIDENCE_REASONING, agreement_score, determine_best_candidate, summarize_low_confidence,
};
pub use core::error::{DomainError, ErrorHint, user_facing_message};
pub use orchestration::{
    entities::Stage,
    mode::RoutingMode,
    value_objects::{ChatOutcome, ResponseRoute},
};
pub use prompt::{PromptTemplate, VERIFIED_OK};
pub use providers::{Credential, GenerationParams, ProviderFamily, ProviderSpec, SelectionPolicy};
pub use routing::{Complexity, TaskAnalysis, TaskRouter, TaskType};
pub use session::entities::{Message, Role, latest_user_message, with_system_prompt};
