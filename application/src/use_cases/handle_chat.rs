//! Handle Chat use case
//!
//! The orchestrator in front of the consensus pipeline:
//! 1. Context injection - the memory collaborator may extend the system prompt
//! 2. Routing - the task router and [`RoutingMode`] pick consensus or a single call
//! 3. Dispatch - consensus pipeline or one call to the selected provider
//! 4. Fallback - any primary failure triggers exactly one plain provider call
//! 5. Delivery - stream the answer to the sink and report the outcome
//!
//! [`RoutingMode`]: chorus_domain::RoutingMode

use crate::config::ChatConfig;
use crate::ports::context_injector::{ContextInjector, NoContext, augment_system_prompt};
use crate::ports::llm_gateway::{LlmProvider, ProviderRegistry};
use crate::ports::outcome_recorder::{NoOutcomeRecorder, OutcomeRecorder};
use crate::ports::progress::{NoProgress, ProgressNotifier, StageTracker};
use crate::ports::response_sink::{ResponseSink, stream_to};
use crate::use_cases::run_consensus::{ConsensusError, RunConsensusInput, RunConsensusUseCase};
use crate::use_cases::shared::{complete_with_timeout, select_provider};
use chorus_domain::{
    ChatOutcome, Message, PromptTemplate, ResponseRoute, Stage, TaskAnalysis, TaskRouter,
    latest_user_message, with_system_prompt,
};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

/// Errors surfaced to the chat caller.
///
/// Render with [`chorus_domain::user_facing_message`] before showing to a user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChatError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Primary path failed: {primary}; fallback failed: {fallback}")]
    CombinedFallbackFailure { primary: String, fallback: String },
}

/// One chat turn
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    /// Ordered history; the latest user message is answered
    pub messages: Vec<Message>,
    /// Caller-supplied system prompt, overriding the configured default
    pub system_prompt: Option<String>,
}

impl ChatRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            system_prompt: None,
        }
    }

    pub fn question(question: impl Into<String>) -> Self {
        Self::new(vec![Message::user(question)])
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }
}

/// Answer from the primary path, before fallback handling
struct Answered {
    answer: String,
    route: ResponseRoute,
    consensus: Option<chorus_domain::ConsensusResult>,
    provider: Option<String>,
    from_cache: bool,
}

/// Why the primary path failed
struct PrimaryFailure {
    message: String,
    /// Provider to avoid for the fallback call, when one provider is to blame
    failed_provider: Option<String>,
}

/// Use case for answering one chat turn
pub struct HandleChatUseCase {
    registry: Arc<dyn ProviderRegistry>,
    consensus: Arc<RunConsensusUseCase>,
    router: TaskRouter,
    config: ChatConfig,
    context: Arc<dyn ContextInjector>,
    recorder: Arc<dyn OutcomeRecorder>,
}

impl HandleChatUseCase {
    pub fn new(
        registry: Arc<dyn ProviderRegistry>,
        consensus: Arc<RunConsensusUseCase>,
        config: ChatConfig,
    ) -> Self {
        Self {
            registry,
            consensus,
            router: TaskRouter::new(),
            config,
            context: Arc::new(NoContext),
            recorder: Arc::new(NoOutcomeRecorder),
        }
    }

    pub fn with_context_injector(mut self, context: Arc<dyn ContextInjector>) -> Self {
        self.context = context;
        self
    }

    pub fn with_outcome_recorder(mut self, recorder: Arc<dyn OutcomeRecorder>) -> Self {
        self.recorder = recorder;
        self
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Execute the use case without progress or streaming
    pub async fn execute(&self, request: ChatRequest) -> Result<ChatOutcome, ChatError> {
        self.execute_with_progress(request, &NoProgress, None).await
    }

    /// Execute the use case with progress callbacks and an optional answer sink
    pub async fn execute_with_progress(
        &self,
        request: ChatRequest,
        progress: &dyn ProgressNotifier,
        sink: Option<&dyn ResponseSink>,
    ) -> Result<ChatOutcome, ChatError> {
        let started = Instant::now();
        let tracker = StageTracker::new(progress);
        tracker.advance(Stage::Init);

        let user_message = latest_user_message(&request.messages)
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| ChatError::InvalidRequest("no user message to answer".to_string()))?
            .to_string();

        let base_prompt = request
            .system_prompt
            .as_deref()
            .or(self.config.default_system_prompt.as_deref())
            .unwrap_or(PromptTemplate::default_system());
        let injected = self.context.context_for(&user_message);
        let system_prompt = augment_system_prompt(injected.as_deref(), base_prompt);

        tracker.advance(Stage::Routing);
        let task = self.router.analyze(&user_message);
        let use_consensus = self.config.mode.use_consensus(task.requires_consensus());
        info!(
            "Routed as {:?}/{:?} (mode {}): {}",
            task.task_type,
            task.complexity,
            self.config.mode,
            if use_consensus { "consensus" } else { "single model" }
        );

        let primary = if use_consensus {
            self.answer_with_consensus(&request.messages, &system_prompt, &tracker)
                .await
        } else {
            self.answer_with_single_model(&request.messages, &system_prompt)
                .await
        };

        let (answered, fallback_reason) = match primary {
            Ok(answered) => (answered, None),
            Err(failure) => {
                tracker.advance(Stage::FallbackSingleModel);
                warn!("Primary path failed, falling back: {}", failure.message);
                let answered = self
                    .answer_with_fallback(&request.messages, &system_prompt, &failure)
                    .await?;
                (answered, Some(failure.message))
            }
        };

        tracker.advance(Stage::Done);

        if let Some(sink) = sink {
            stream_to(sink, &answered.answer);
        }

        let outcome = Self::outcome(answered, task, fallback_reason, started);
        self.recorder.record(&outcome);
        Ok(outcome)
    }

    async fn answer_with_consensus(
        &self,
        messages: &[Message],
        system_prompt: &str,
        tracker: &StageTracker<'_>,
    ) -> Result<Answered, PrimaryFailure> {
        let input = RunConsensusInput::new(messages.to_vec(), system_prompt);
        match self.consensus.run(input, tracker).await {
            Ok(output) => Ok(Answered {
                answer: output.result.final_answer.clone(),
                route: ResponseRoute::Consensus,
                consensus: Some(output.result),
                provider: None,
                from_cache: output.from_cache,
            }),
            Err(e) => Err(PrimaryFailure {
                message: e.to_string(),
                failed_provider: None,
            }),
        }
    }

    async fn answer_with_single_model(
        &self,
        messages: &[Message],
        system_prompt: &str,
    ) -> Result<Answered, PrimaryFailure> {
        let providers = self.registry.available_providers();
        let Some(provider) = select_provider(&providers, &self.config.consensus.selection) else {
            return Err(PrimaryFailure {
                message: ConsensusError::NoProviders.to_string(),
                failed_provider: None,
            });
        };

        let answer = self
            .call_single(provider.as_ref(), messages, system_prompt)
            .await
            .map_err(|message| PrimaryFailure {
                message,
                failed_provider: Some(provider.name().to_string()),
            })?;

        Ok(Answered {
            answer,
            route: ResponseRoute::SingleModel,
            consensus: None,
            provider: Some(provider.name().to_string()),
            from_cache: false,
        })
    }

    /// The one best-effort call after a primary failure. Prefers a provider
    /// other than the one that just failed.
    async fn answer_with_fallback(
        &self,
        messages: &[Message],
        system_prompt: &str,
        failure: &PrimaryFailure,
    ) -> Result<Answered, ChatError> {
        let providers = self.registry.available_providers();
        let healthy: Vec<Arc<dyn LlmProvider>> = match &failure.failed_provider {
            Some(failed) if providers.iter().any(|p| p.name() != failed) => providers
                .iter()
                .filter(|p| p.name() != failed)
                .cloned()
                .collect(),
            _ => providers,
        };

        let Some(provider) = select_provider(&healthy, &self.config.consensus.selection) else {
            return Err(ChatError::CombinedFallbackFailure {
                primary: failure.message.clone(),
                fallback: ConsensusError::NoProviders.to_string(),
            });
        };

        info!("Fallback single-model call to {}", provider.name());
        let answer = self
            .call_single(provider.as_ref(), messages, system_prompt)
            .await
            .map_err(|fallback| ChatError::CombinedFallbackFailure {
                primary: failure.message.clone(),
                fallback,
            })?;

        Ok(Answered {
            answer,
            route: ResponseRoute::FallbackSingleModel,
            consensus: None,
            provider: Some(provider.name().to_string()),
            from_cache: false,
        })
    }

    async fn call_single(
        &self,
        provider: &dyn LlmProvider,
        messages: &[Message],
        system_prompt: &str,
    ) -> Result<String, String> {
        let messages = with_system_prompt(system_prompt, messages);
        complete_with_timeout(
            provider,
            &messages,
            &self.config.consensus.single_model_params(),
            self.config.consensus.call_timeout,
        )
        .await
        .map(|answer| answer.trim().to_string())
        .map_err(|e| format!("{}: {}", provider.name(), e))
    }

    fn outcome(
        answered: Answered,
        task: TaskAnalysis,
        fallback_reason: Option<String>,
        started: Instant,
    ) -> ChatOutcome {
        ChatOutcome {
            answer: answered.answer,
            route: answered.route,
            task,
            consensus: answered.consensus,
            provider: answered.provider,
            fallback_reason,
            from_cache: answered.from_cache,
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        }
    }
}
