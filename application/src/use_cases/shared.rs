//! Shared helpers for the chat and consensus use cases.

use crate::ports::llm_gateway::{GatewayError, LlmProvider};
use chorus_domain::{GenerationParams, Message, SelectionPolicy};
use std::sync::Arc;
use std::time::Duration;

/// One provider call bounded by `timeout`.
///
/// Blank completions are reported as [`GatewayError::EmptyResponse`] so no
/// caller has to special-case them.
pub(crate) async fn complete_with_timeout(
    provider: &dyn LlmProvider,
    messages: &[Message],
    params: &GenerationParams,
    timeout: Option<Duration>,
) -> Result<String, GatewayError> {
    let content = match timeout {
        Some(limit) => tokio::time::timeout(limit, provider.complete(messages, params))
            .await
            .map_err(|_| GatewayError::Timeout)??,
        None => provider.complete(messages, params).await?,
    };

    if content.trim().is_empty() {
        return Err(GatewayError::EmptyResponse);
    }
    Ok(content)
}

/// Apply `policy` to the registry-ordered provider list.
pub(crate) fn select_provider(
    providers: &[Arc<dyn LlmProvider>],
    policy: &SelectionPolicy,
) -> Option<Arc<dyn LlmProvider>> {
    let names: Vec<&str> = providers.iter().map(|p| p.name()).collect();
    policy.select(&names).map(|i| Arc::clone(&providers[i]))
}
