//! HIGH-confidence path: synthesize, verify, or fall back to the best candidate.

use super::RunConsensusUseCase;
use crate::ports::llm_gateway::LlmProvider;
use crate::ports::progress::StageTracker;
use crate::use_cases::shared::{complete_with_timeout, select_provider};
use chorus_domain::{
    CandidateResponse, Message, PromptTemplate, Stage, VERIFIED_OK, determine_best_candidate,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Answer fields produced by the HIGH-confidence path
pub(super) struct HighConfidenceAnswer {
    pub final_answer: String,
    pub synthesis: Option<String>,
    pub verification: Option<String>,
    pub reasoning: String,
}

impl RunConsensusUseCase {
    /// Never fails: synthesis errors fall back to the best candidate and
    /// verification errors keep the synthesis.
    pub(super) async fn resolve_high_confidence(
        &self,
        providers: &[Arc<dyn LlmProvider>],
        question: &str,
        candidates: &[CandidateResponse],
        agreement: f64,
        tracker: &StageTracker<'_>,
    ) -> HighConfidenceAnswer {
        let summary = format!(
            "High agreement ({:.2}) across {} candidates",
            agreement,
            candidates.len()
        );

        tracker.advance(Stage::Synthesizing);
        let Some(synthesizer) = select_provider(providers, &self.params.selection) else {
            return self.best_candidate_answer(candidates, summary, "no provider selected");
        };
        let synthesis = match self.synthesize(synthesizer.as_ref(), question, candidates).await {
            Ok(text) => text,
            Err(reason) => return self.best_candidate_answer(candidates, summary, &reason),
        };

        tracker.advance(Stage::Verifying);
        let verification_messages = vec![
            Message::system(PromptTemplate::verification_system()),
            Message::user(PromptTemplate::verification_prompt(question, &synthesis)),
        ];
        let verified = complete_with_timeout(
            synthesizer.as_ref(),
            &verification_messages,
            &self.params.verification_params(),
            self.params.call_timeout,
        )
        .await;

        match verified {
            Ok(verdict) if verdict.trim() == VERIFIED_OK => {
                info!("Verifier accepted synthesis from {}", synthesizer.name());
                HighConfidenceAnswer {
                    final_answer: synthesis.clone(),
                    synthesis: Some(synthesis),
                    verification: Some(verdict.trim().to_string()),
                    reasoning: format!(
                        "{}; synthesized by {} and verified",
                        summary,
                        synthesizer.name()
                    ),
                }
            }
            Ok(correction) => {
                info!("Verifier corrected synthesis from {}", synthesizer.name());
                let correction = correction.trim().to_string();
                HighConfidenceAnswer {
                    final_answer: correction.clone(),
                    synthesis: Some(synthesis),
                    verification: Some(correction),
                    reasoning: format!(
                        "{}; synthesized by {} and corrected by verification",
                        summary,
                        synthesizer.name()
                    ),
                }
            }
            Err(e) => {
                warn!("Verification failed, keeping synthesis: {}", e);
                HighConfidenceAnswer {
                    final_answer: synthesis.clone(),
                    synthesis: Some(synthesis),
                    verification: None,
                    reasoning: format!(
                        "{}; synthesized by {}, verification unavailable",
                        summary,
                        synthesizer.name()
                    ),
                }
            }
        }
    }

    async fn synthesize(
        &self,
        provider: &dyn LlmProvider,
        question: &str,
        candidates: &[CandidateResponse],
    ) -> Result<String, String> {
        info!("Synthesizing {} candidates with {}", candidates.len(), provider.name());
        let messages = vec![
            Message::system(PromptTemplate::synthesis_system()),
            Message::user(PromptTemplate::synthesis_prompt(question, candidates)),
        ];
        complete_with_timeout(
            provider,
            &messages,
            &self.params.synthesis_params(),
            self.params.call_timeout,
        )
        .await
        .map(|text| text.trim().to_string())
        .map_err(|e| {
            warn!("Synthesis by {} failed: {}", provider.name(), e);
            format!("{} {}", provider.name(), e)
        })
    }

    fn best_candidate_answer(
        &self,
        candidates: &[CandidateResponse],
        summary: String,
        reason: &str,
    ) -> HighConfidenceAnswer {
        // candidates is never empty once generation succeeded
        let (final_answer, label) = match determine_best_candidate(candidates) {
            Some(best) => (best.content.clone(), best.label()),
            None => (String::new(), "none".to_string()),
        };
        info!("Using best candidate {} after synthesis failure", label);

        HighConfidenceAnswer {
            final_answer,
            synthesis: None,
            verification: None,
            reasoning: format!(
                "{}; synthesis failed ({}), using best candidate {}",
                summary, reason, label
            ),
        }
    }
}
