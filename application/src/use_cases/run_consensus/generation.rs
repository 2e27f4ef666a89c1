//! Candidate generation over the provider x temperature matrix.

use super::{ConsensusError, RunConsensusUseCase};
use crate::config::consensus_params::TEMPERATURES;
use crate::ports::llm_gateway::LlmProvider;
use crate::ports::progress::ProgressNotifier;
use crate::use_cases::shared::complete_with_timeout;
use chorus_domain::{CandidateResponse, Message};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

impl RunConsensusUseCase {
    /// Query every provider at every temperature concurrently.
    ///
    /// A failed call drops only its own candidate. Candidates come back in
    /// matrix order (provider registry order, then temperature), regardless
    /// of completion order.
    pub(super) async fn generate_candidates(
        &self,
        providers: &[Arc<dyn LlmProvider>],
        messages: Arc<Vec<Message>>,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<CandidateResponse>, ConsensusError> {
        let attempts = providers.len() * TEMPERATURES.len();
        progress.on_generation_start(attempts);

        let mut join_set = JoinSet::new();

        for (p, provider) in providers.iter().enumerate() {
            for (t, &temperature) in TEMPERATURES.iter().enumerate() {
                let slot = p * TEMPERATURES.len() + t;
                let provider = Arc::clone(provider);
                let messages = Arc::clone(&messages);
                let params = self.params.candidate_params(temperature);
                let timeout = self.params.call_timeout;

                join_set.spawn(async move {
                    let result =
                        complete_with_timeout(provider.as_ref(), &messages, &params, timeout).await;
                    (slot, provider, temperature, result)
                });
            }
        }

        let mut generated: Vec<(usize, CandidateResponse)> = Vec::with_capacity(attempts);
        let mut last_error = String::from("no response");

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((slot, provider, temperature, Ok(content))) => {
                    debug!("{} responded at t={}", provider.name(), temperature);
                    progress.on_candidate_complete(provider.name(), temperature, true);
                    let candidate = CandidateResponse::new(
                        provider.name(),
                        provider.model(),
                        temperature,
                        content,
                        self.cache.now(),
                    );
                    generated.push((slot, candidate));
                }
                Ok((_, provider, temperature, Err(e))) => {
                    warn!("{} failed at t={}: {}", provider.name(), temperature, e);
                    progress.on_candidate_complete(provider.name(), temperature, false);
                    last_error = format!("{}: {}", provider.name(), e);
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                    last_error = e.to_string();
                }
            }
        }

        if generated.is_empty() {
            return Err(ConsensusError::AllProvidersFailed {
                attempts,
                last_error,
            });
        }

        generated.sort_by_key(|(slot, _)| *slot);
        info!("Collected {}/{} candidates", generated.len(), attempts);

        Ok(generated.into_iter().map(|(_, c)| c).collect())
    }
}
