//! Config-driven provider registry
//!
//! Providers come from `[[providers]]` entries, or from the built-in catalog
//! when none are configured. Entries without a usable credential are kept
//! for `--list-providers` but never handed to the pipeline.

use super::HttpProvider;
use crate::config::{ConfigValidationError, FileProviderConfig};
use chorus_application::ports::llm_gateway::{LlmProvider, ProviderRegistry};
use chorus_domain::{Credential, ProviderFamily, ProviderSpec};
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, info};

/// A catalog entry for a well-known backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinProvider {
    pub name: &'static str,
    pub family: ProviderFamily,
    pub base_url: &'static str,
    pub model: &'static str,
    pub api_key_env: &'static str,
}

pub const BUILTIN_PROVIDERS: [BuiltinProvider; 6] = [
    BuiltinProvider {
        name: "openai",
        family: ProviderFamily::OpenAiCompatible,
        base_url: "https://api.openai.com/v1",
        model: "gpt-4o-mini",
        api_key_env: "OPENAI_API_KEY",
    },
    BuiltinProvider {
        name: "groq",
        family: ProviderFamily::OpenAiCompatible,
        base_url: "https://api.groq.com/openai/v1",
        model: "llama-3.1-8b-instant",
        api_key_env: "GROQ_API_KEY",
    },
    BuiltinProvider {
        name: "deepseek",
        family: ProviderFamily::OpenAiCompatible,
        base_url: "https://api.deepseek.com/v1",
        model: "deepseek-chat",
        api_key_env: "DEEPSEEK_API_KEY",
    },
    BuiltinProvider {
        name: "mistral",
        family: ProviderFamily::OpenAiCompatible,
        base_url: "https://api.mistral.ai/v1",
        model: "mistral-small-latest",
        api_key_env: "MISTRAL_API_KEY",
    },
    BuiltinProvider {
        name: "openrouter",
        family: ProviderFamily::OpenAiCompatible,
        base_url: "https://openrouter.ai/api/v1",
        model: "meta-llama/llama-3.1-8b-instruct",
        api_key_env: "OPENROUTER_API_KEY",
    },
    BuiltinProvider {
        name: "gemini",
        family: ProviderFamily::Gemini,
        base_url: "https://generativelanguage.googleapis.com/v1beta",
        model: "gemini-1.5-flash",
        api_key_env: "GEMINI_API_KEY",
    },
];

pub fn builtin(name: &str) -> Option<&'static BuiltinProvider> {
    BUILTIN_PROVIDERS
        .iter()
        .find(|b| b.name.eq_ignore_ascii_case(name))
}

impl BuiltinProvider {
    fn as_config(&self) -> FileProviderConfig {
        FileProviderConfig {
            name: self.name.to_string(),
            ..Default::default()
        }
    }
}

/// One configured provider as shown by `--list-providers`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderStatus {
    pub name: String,
    pub family: ProviderFamily,
    pub model: String,
    /// Where the key is read from (env var name or "config")
    pub key_source: String,
    pub available: bool,
}

/// Registry over the HTTP adapters.
pub struct HttpProviderRegistry {
    providers: Vec<Arc<dyn LlmProvider>>,
    statuses: Vec<ProviderStatus>,
}

impl HttpProviderRegistry {
    /// Build from config, reading keys from the process environment.
    pub fn from_config(
        entries: &[FileProviderConfig],
        client: Client,
    ) -> Result<Self, ConfigValidationError> {
        Self::with_env(entries, client, |var| std::env::var(var).ok())
    }

    /// Build with an injectable environment lookup.
    pub fn with_env<F>(
        entries: &[FileProviderConfig],
        client: Client,
        env: F,
    ) -> Result<Self, ConfigValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let catalog: Vec<FileProviderConfig>;
        let entries = if entries.is_empty() {
            debug!("No [[providers]] configured, using built-in catalog");
            catalog = BUILTIN_PROVIDERS.iter().map(|b| b.as_config()).collect();
            &catalog[..]
        } else {
            entries
        };

        let mut providers: Vec<Arc<dyn LlmProvider>> = Vec::new();
        let mut statuses = Vec::with_capacity(entries.len());

        for entry in entries {
            let resolved = resolve(entry)?;
            let (credential, key_source) = match entry.api_key.as_deref() {
                Some(raw) => (Credential::parse(raw), "config".to_string()),
                None => (
                    env(&resolved.api_key_env).and_then(|raw| Credential::parse(&raw)),
                    resolved.api_key_env.clone(),
                ),
            };

            statuses.push(ProviderStatus {
                name: resolved.name.clone(),
                family: resolved.family,
                model: resolved.model.clone(),
                key_source,
                available: credential.is_some(),
            });

            let Some(credential) = credential else {
                debug!("Skipping provider {}: no usable API key", resolved.name);
                continue;
            };

            let spec = ProviderSpec::new(
                resolved.name,
                resolved.family,
                resolved.base_url,
                resolved.model,
                credential,
            )
            .map_err(|e| ConfigValidationError::InvalidProvider(e.to_string()))?;
            providers.push(Arc::new(HttpProvider::from_spec(spec, client.clone())));
        }

        info!(
            "{} of {} providers available",
            providers.len(),
            statuses.len()
        );
        Ok(Self {
            providers,
            statuses,
        })
    }

    pub fn statuses(&self) -> &[ProviderStatus] {
        &self.statuses
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }
}

impl ProviderRegistry for HttpProviderRegistry {
    fn available_providers(&self) -> Vec<Arc<dyn LlmProvider>> {
        self.providers.clone()
    }
}

/// A config entry with catalog defaults filled in
struct ResolvedEntry {
    name: String,
    family: ProviderFamily,
    base_url: String,
    model: String,
    api_key_env: String,
}

fn resolve(entry: &FileProviderConfig) -> Result<ResolvedEntry, ConfigValidationError> {
    let name = entry.name.trim();
    if name.is_empty() {
        return Err(ConfigValidationError::EmptyProviderName);
    }
    let known = builtin(name);

    let family = match (entry.family.as_deref(), known) {
        (Some(raw), _) => raw
            .parse::<ProviderFamily>()
            .map_err(|_| ConfigValidationError::UnknownFamily {
                provider: name.to_string(),
                family: raw.to_string(),
            })?,
        (None, Some(b)) => b.family,
        (None, None) => ProviderFamily::OpenAiCompatible,
    };

    let base_url = entry
        .base_url
        .clone()
        .or_else(|| known.map(|b| b.base_url.to_string()))
        .ok_or_else(|| {
            ConfigValidationError::InvalidProvider(format!("provider '{}' has no base_url", name))
        })?;
    let model = entry
        .model
        .clone()
        .or_else(|| known.map(|b| b.model.to_string()))
        .ok_or_else(|| {
            ConfigValidationError::InvalidProvider(format!("provider '{}' has no model", name))
        })?;
    let api_key_env = entry
        .api_key_env
        .clone()
        .or_else(|| known.map(|b| b.api_key_env.to_string()))
        .unwrap_or_else(|| format!("{}_API_KEY", name.to_uppercase().replace('-', "_")));

    Ok(ResolvedEntry {
        name: name.to_string(),
        family,
        base_url,
        model,
        api_key_env,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    fn entry(name: &str) -> FileProviderConfig {
        FileProviderConfig {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_builtin_catalog_filters_missing_keys() {
        let registry = HttpProviderRegistry::with_env(
            &[],
            Client::new(),
            env_of(&[("GROQ_API_KEY", "gsk_live"), ("GEMINI_API_KEY", "AIza-real")]),
        )
        .unwrap();

        assert_eq!(registry.names(), vec!["groq", "gemini"]);
        assert_eq!(registry.statuses().len(), BUILTIN_PROVIDERS.len());
        assert!(!registry.statuses()[0].available);
    }

    #[test]
    fn test_placeholder_keys_are_absent() {
        let registry = HttpProviderRegistry::with_env(
            &[],
            Client::new(),
            env_of(&[
                ("OPENAI_API_KEY", "your_openai_key_here"),
                ("MISTRAL_API_KEY", "<mistral-key>"),
                ("DEEPSEEK_API_KEY", "changeme"),
            ]),
        )
        .unwrap();

        assert!(registry.is_empty());
        assert!(registry.available_providers().is_empty());
    }

    #[test]
    fn test_configured_entries_replace_catalog_in_order() {
        let custom = FileProviderConfig {
            name: "local".to_string(),
            family: Some("openai_compatible".to_string()),
            base_url: Some("http://localhost:8080/v1".to_string()),
            model: Some("qwen2".to_string()),
            api_key: Some("local-key".to_string()),
            ..Default::default()
        };
        let registry = HttpProviderRegistry::with_env(
            &[entry("mistral"), custom],
            Client::new(),
            env_of(&[("MISTRAL_API_KEY", "real"), ("OPENAI_API_KEY", "real")]),
        )
        .unwrap();

        assert_eq!(registry.names(), vec!["mistral", "local"]);
        let local = &registry.statuses()[1];
        assert_eq!(local.key_source, "config");
        assert_eq!(local.model, "qwen2");
    }

    #[test]
    fn test_custom_entry_uses_derived_env_var() {
        let custom = FileProviderConfig {
            name: "together-ai".to_string(),
            base_url: Some("https://api.together.xyz/v1".to_string()),
            model: Some("m".to_string()),
            ..Default::default()
        };
        let registry = HttpProviderRegistry::with_env(
            &[custom],
            Client::new(),
            env_of(&[("TOGETHER_AI_API_KEY", "tk")]),
        )
        .unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.statuses()[0].key_source, "TOGETHER_AI_API_KEY");
    }

    #[test]
    fn test_unknown_family_is_rejected() {
        let bad = FileProviderConfig {
            family: Some("anthropic-native".to_string()),
            ..entry("openai")
        };
        let err = HttpProviderRegistry::with_env(&[bad], Client::new(), env_of(&[]))
            .err()
            .unwrap();
        assert!(matches!(err, ConfigValidationError::UnknownFamily { .. }));
    }

    #[test]
    fn test_unknown_name_without_base_url_is_rejected() {
        let err = HttpProviderRegistry::with_env(&[entry("mystery")], Client::new(), env_of(&[]))
            .err()
            .unwrap();
        assert!(matches!(err, ConfigValidationError::InvalidProvider(_)));
    }

    #[test]
    fn test_builtin_lookup_is_case_insensitive() {
        assert_eq!(builtin("Gemini").map(|b| b.family), Some(ProviderFamily::Gemini));
        assert!(builtin("anthropic").is_none());
    }
}
