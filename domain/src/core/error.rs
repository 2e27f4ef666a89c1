//! Domain error types and user-facing error hints

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Conversation has no user message")]
    NoUserMessage,

    #[error("Invalid provider spec: {0}")]
    InvalidProviderSpec(String),

    #[error("Unknown selection policy: {0}")]
    UnknownSelectionPolicy(String),
}

/// Category of a terminal failure, derived from the underlying error text.
///
/// Used to attach an actionable hint to the generic apology shown to the user
/// when every fallback path has been exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorHint {
    MissingCredential,
    RateLimited,
    Network,
    Unknown,
}

impl ErrorHint {
    /// Classify an error message by matching well-known fragments.
    ///
    /// Credential problems are checked first: a 401 caused by a missing key
    /// should not be reported as a network error just because the message
    /// also mentions the request.
    pub fn classify(text: &str) -> Self {
        let lower = text.to_lowercase();

        const CREDENTIAL: &[&str] = &[
            "api key",
            "api_key",
            "credential",
            "unauthorized",
            "401",
            "403",
            "no providers",
        ];
        const RATE_LIMIT: &[&str] = &["rate limit", "rate-limit", "429", "quota", "too many requests"];
        const NETWORK: &[&str] = &[
            "network",
            "timed out",
            "timeout",
            "connection",
            "dns",
            "unreachable",
        ];

        if CREDENTIAL.iter().any(|p| lower.contains(p)) {
            ErrorHint::MissingCredential
        } else if RATE_LIMIT.iter().any(|p| lower.contains(p)) {
            ErrorHint::RateLimited
        } else if NETWORK.iter().any(|p| lower.contains(p)) {
            ErrorHint::Network
        } else {
            ErrorHint::Unknown
        }
    }

    /// Human readable hint for this category
    pub fn message(&self) -> &'static str {
        match self {
            ErrorHint::MissingCredential => {
                "Check that at least one provider API key is configured and valid."
            }
            ErrorHint::RateLimited => {
                "A provider is rate limiting requests. Wait a moment and try again."
            }
            ErrorHint::Network => "A network problem prevented reaching the providers.",
            ErrorHint::Unknown => "Please try again in a moment.",
        }
    }
}

/// Render the apologetic message shown when a request could not be served.
pub fn user_facing_message(error_text: &str) -> String {
    let hint = ErrorHint::classify(error_text);
    format!(
        "Sorry, I wasn't able to answer that right now. {}",
        hint.message()
    )
}
