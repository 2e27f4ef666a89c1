//! Run Consensus use case
//!
//! Runs the multi-provider consensus pipeline for one question:
//! 1. Cache check - a fresh result short-circuits everything
//! 2. Generating - every provider at every temperature, concurrently
//! 3. Scoring - keyword agreement and confidence band
//! 4. HIGH: Synthesizing then Verifying / LOW: Summarizing
//! 5. Cache write

mod generation;
mod synthesis;

use crate::cache::ResultCache;
use crate::config::ConsensusParams;
use crate::ports::llm_gateway::ProviderRegistry;
use crate::ports::progress::{NoProgress, ProgressNotifier, StageTracker};
use chorus_domain::{
    CacheKey, ConfidenceBand, ConsensusResult, DomainError, LOW_CONFIDENCE_REASONING, Message,
    Stage, agreement_score, latest_user_message, summarize_low_confidence, with_system_prompt,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Fatal errors of the consensus pipeline.
///
/// Synthesis and verification failures are recovered inside the pipeline
/// and never appear here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConsensusError {
    #[error("No providers available: configure an API key for at least one provider")]
    NoProviders,

    #[error("All providers failed to respond ({attempts} calls, last error: {last_error})")]
    AllProvidersFailed { attempts: usize, last_error: String },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Input for the RunConsensus use case
#[derive(Debug, Clone)]
pub struct RunConsensusInput {
    /// Conversation so far; the latest user message is the question
    pub messages: Vec<Message>,
    /// Effective system prompt (already augmented with injected context)
    pub system_prompt: String,
}

impl RunConsensusInput {
    pub fn new(messages: Vec<Message>, system_prompt: impl Into<String>) -> Self {
        Self {
            messages,
            system_prompt: system_prompt.into(),
        }
    }

    /// Single-question input
    pub fn question(question: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self::new(vec![Message::user(question)], system_prompt)
    }
}

/// Pipeline result plus where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct ConsensusOutput {
    pub result: ConsensusResult,
    pub from_cache: bool,
}

/// Use case for running the consensus pipeline
pub struct RunConsensusUseCase {
    registry: Arc<dyn ProviderRegistry>,
    cache: Arc<ResultCache>,
    params: ConsensusParams,
}

impl RunConsensusUseCase {
    pub fn new(
        registry: Arc<dyn ProviderRegistry>,
        cache: Arc<ResultCache>,
        params: ConsensusParams,
    ) -> Self {
        Self {
            registry,
            cache,
            params,
        }
    }

    pub fn params(&self) -> &ConsensusParams {
        &self.params
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunConsensusInput) -> Result<ConsensusOutput, ConsensusError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunConsensusInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<ConsensusOutput, ConsensusError> {
        let tracker = StageTracker::new(progress);
        self.run(input, &tracker).await
    }

    /// Run the pipeline reporting through an existing tracker.
    pub(crate) async fn run(
        &self,
        input: RunConsensusInput,
        tracker: &StageTracker<'_>,
    ) -> Result<ConsensusOutput, ConsensusError> {
        let question = latest_user_message(&input.messages)
            .ok_or(DomainError::NoUserMessage)?
            .to_string();
        let key = CacheKey::new(&question, &input.system_prompt);

        tracker.advance(Stage::CacheCheck);
        if let Some(result) = self.cache_hit(&key, tracker) {
            return Ok(result);
        }

        // Identical concurrent requests queue here; the first one fills the cache.
        let _in_flight = self.cache.acquire(&key).await;
        if let Some(result) = self.cache_hit(&key, tracker) {
            return Ok(result);
        }
        debug!("Cache miss for key {}", key);

        let providers = self.registry.available_providers();
        if providers.is_empty() {
            return Err(ConsensusError::NoProviders);
        }

        info!(
            "Starting consensus with {} providers x {} temperatures",
            providers.len(),
            crate::config::consensus_params::TEMPERATURES.len()
        );

        tracker.advance(Stage::Generating);
        let messages = Arc::new(with_system_prompt(&input.system_prompt, &input.messages));
        let candidates = self
            .generate_candidates(&providers, messages, tracker.notifier())
            .await?;

        tracker.advance(Stage::Scoring);
        let contents: Vec<&str> = candidates.iter().map(|c| c.content.as_str()).collect();
        let agreement = agreement_score(&contents);
        let confidence = ConfidenceBand::classify(agreement);
        info!(
            "Agreement {:.3} over {} candidates: {} confidence",
            agreement,
            candidates.len(),
            confidence
        );

        let result = match confidence {
            ConfidenceBand::High => {
                let answer = self
                    .resolve_high_confidence(&providers, &question, &candidates, agreement, tracker)
                    .await;
                ConsensusResult {
                    final_answer: answer.final_answer,
                    confidence,
                    candidates,
                    synthesis: answer.synthesis,
                    verification: answer.verification,
                    reasoning: answer.reasoning,
                    agreement_score: agreement,
                }
            }
            ConfidenceBand::Low => {
                tracker.advance(Stage::Summarizing);
                ConsensusResult {
                    final_answer: summarize_low_confidence(&candidates),
                    confidence,
                    candidates,
                    synthesis: None,
                    verification: None,
                    reasoning: LOW_CONFIDENCE_REASONING.to_string(),
                    agreement_score: agreement,
                }
            }
        };

        self.cache.put(key, result.clone());
        tracker.advance(Stage::Done);

        Ok(ConsensusOutput {
            result,
            from_cache: false,
        })
    }

    fn cache_hit(&self, key: &CacheKey, tracker: &StageTracker<'_>) -> Option<ConsensusOutput> {
        let result = self.cache.get(key)?;
        info!("Cache hit for key {}", key);
        tracker.advance(Stage::CacheHit);
        Some(ConsensusOutput {
            result,
            from_cache: true,
        })
    }
}
