//! LLM provider ports
//!
//! Defines the interface for talking to completion backends and for
//! enumerating the configured ones.

use async_trait::async_trait;
use chorus_domain::{GenerationParams, Message};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during a single provider call.
///
/// A `GatewayError` only ever removes one candidate; it is never fatal on
/// its own.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Rate limited (HTTP 429){}", .retry_after.map(|d| format!(", retry after {:?}", d)).unwrap_or_default())]
    RateLimited { retry_after: Option<Duration> },

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Empty response")]
    EmptyResponse,
}

/// A completion backend (one configured provider).
///
/// Implementations (adapters) live in the infrastructure layer. The
/// candidate generator depends only on this contract.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name (e.g. "openai")
    fn name(&self) -> &str;

    /// Model identifier used for every request
    fn model(&self) -> &str;

    /// Request a completion for the given conversation.
    async fn complete(
        &self,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<String, GatewayError>;
}

/// Source of the providers usable for this request.
///
/// An empty list is valid; callers turn it into a "no providers" error.
pub trait ProviderRegistry: Send + Sync {
    fn available_providers(&self) -> Vec<Arc<dyn LlmProvider>>;
}

impl ProviderRegistry for Vec<Arc<dyn LlmProvider>> {
    fn available_providers(&self) -> Vec<Arc<dyn LlmProvider>> {
        self.clone()
    }
}
