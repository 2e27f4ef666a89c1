//! Provider specification value objects

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Request family spoken by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderFamily {
    /// `POST {base}/chat/completions` with bearer auth
    OpenAiCompatible,
    /// `POST {base}/models/{model}:generateContent?key=...`
    Gemini,
}

impl ProviderFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderFamily::OpenAiCompatible => "openai_compatible",
            ProviderFamily::Gemini => "gemini",
        }
    }
}

impl fmt::Display for ProviderFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProviderFamily {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "openai_compatible" | "openai" => Ok(ProviderFamily::OpenAiCompatible),
            "gemini" | "google" => Ok(ProviderFamily::Gemini),
            other => Err(DomainError::InvalidProviderSpec(format!(
                "unknown provider family '{}'",
                other
            ))),
        }
    }
}

/// An API credential.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw key, returning `None` when it is absent or a placeholder.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if is_placeholder(trimmed) {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(***)")
    }
}

/// Values people leave in `.env` templates instead of a real key.
fn is_placeholder(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    let lower = value.to_lowercase();
    lower.starts_with("your")
        || lower.contains("placeholder")
        || lower.contains("xxxx")
        || lower == "changeme"
        || lower == "none"
        || lower == "null"
        || (lower.starts_with('<') && lower.ends_with('>'))
}

/// A configured backend (immutable for the lifetime of the process).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSpec {
    /// Provider name, also used for the reliability lookup (e.g. "openai")
    pub name: String,
    /// Base endpoint without trailing slash
    pub base_url: String,
    /// API credential
    pub credential: Credential,
    /// Model identifier sent to the backend
    pub model: String,
    /// Request family
    pub family: ProviderFamily,
}

impl ProviderSpec {
    pub fn new(
        name: impl Into<String>,
        family: ProviderFamily,
        base_url: impl Into<String>,
        model: impl Into<String>,
        credential: Credential,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let model = model.into();
        let base_url = base_url.into().trim_end_matches('/').to_string();

        if name.trim().is_empty() {
            return Err(DomainError::InvalidProviderSpec(
                "provider name cannot be empty".to_string(),
            ));
        }
        if model.trim().is_empty() {
            return Err(DomainError::InvalidProviderSpec(format!(
                "provider '{}' has no model",
                name
            )));
        }
        if base_url.is_empty() {
            return Err(DomainError::InvalidProviderSpec(format!(
                "provider '{}' has no base url",
                name
            )));
        }

        Ok(Self {
            name,
            base_url,
            credential,
            model,
            family,
        })
    }
}
