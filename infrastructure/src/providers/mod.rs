//! HTTP provider adapters
//!
//! Two request families cover every backend chorus talks to:
//!
//! - [`OpenAiCompatibleProvider`]: `/chat/completions` with bearer auth
//! - [`GeminiProvider`]: `/models/{model}:generateContent` with a key parameter
//!
//! [`HttpProvider`] is the tagged union the registry hands to the
//! application layer.

pub mod gemini;
pub mod openai_compatible;
pub mod registry;

pub use gemini::GeminiProvider;
pub use openai_compatible::OpenAiCompatibleProvider;
pub use registry::{BUILTIN_PROVIDERS, BuiltinProvider, HttpProviderRegistry, ProviderStatus};

use async_trait::async_trait;
use chorus_application::ports::llm_gateway::{GatewayError, LlmProvider};
use chorus_domain::{GenerationParams, Message, ProviderFamily, ProviderSpec};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// A configured backend, dispatched by request family
#[derive(Debug, Clone)]
pub enum HttpProvider {
    OpenAiCompatible(OpenAiCompatibleProvider),
    Gemini(GeminiProvider),
}

impl HttpProvider {
    pub fn from_spec(spec: ProviderSpec, client: Client) -> Self {
        match spec.family {
            ProviderFamily::OpenAiCompatible => {
                HttpProvider::OpenAiCompatible(OpenAiCompatibleProvider::new(spec, client))
            }
            ProviderFamily::Gemini => HttpProvider::Gemini(GeminiProvider::new(spec, client)),
        }
    }

    pub fn spec(&self) -> &ProviderSpec {
        match self {
            HttpProvider::OpenAiCompatible(p) => p.spec(),
            HttpProvider::Gemini(p) => p.spec(),
        }
    }
}

#[async_trait]
impl LlmProvider for HttpProvider {
    fn name(&self) -> &str {
        &self.spec().name
    }

    fn model(&self) -> &str {
        &self.spec().model
    }

    async fn complete(
        &self,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<String, GatewayError> {
        match self {
            HttpProvider::OpenAiCompatible(p) => p.complete(messages, params).await,
            HttpProvider::Gemini(p) => p.complete(messages, params).await,
        }
    }
}

/// Shared HTTP client for all providers.
///
/// The per-call deadline is enforced by the application layer; `timeout`
/// here is only a transport-level backstop.
pub fn build_http_client(timeout: Option<Duration>) -> Client {
    let mut builder = Client::builder().user_agent(concat!("chorus/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|e| {
        tracing::warn!("Falling back to default HTTP client: {}", e);
        Client::new()
    })
}

/// Map a transport failure, stripping the URL (it may carry a key).
pub(crate) fn map_send_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Network(e.without_url().to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Turn a non-success status into a [`GatewayError`].
pub(crate) async fn error_for_status(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_retry_after);
        return Err(GatewayError::RateLimited { retry_after });
    }

    let body = response.text().await.unwrap_or_default();
    Err(GatewayError::Api {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

/// Prefer the provider's `error.message`, else the raw body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) if body.trim().is_empty() => "no error body".to_string(),
        Err(_) => chorus_domain::core::string::truncate_chars(body.trim(), 200),
    }
}
