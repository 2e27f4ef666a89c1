//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod consensus;
mod output;
mod providers;

pub use consensus::FileConsensusConfig;
pub use output::FileOutputConfig;
pub use providers::FileProviderConfig;

use chorus_application::ChatConfig;
use chorus_domain::{ProviderFamily, RoutingMode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("consensus.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("provider name cannot be empty")]
    EmptyProviderName,

    #[error("provider '{provider}': unknown family '{family}' (expected openai_compatible or gemini)")]
    UnknownFamily { provider: String, family: String },

    #[error("invalid provider: {0}")]
    InvalidProvider(String),
}

/// Raw routing configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRoutingConfig {
    /// `auto`, `always` or `never`
    pub mode: RoutingMode,
}

/// Raw context configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileContextConfig {
    /// Inject the context file into the system prompt
    pub enabled: bool,
    /// Context file (default `.chorus/context.md`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for FileContextConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file: None,
        }
    }
}

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving one line per completed request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome_log: Option<PathBuf>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Default system prompt when the request carries none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    pub consensus: FileConsensusConfig,
    pub routing: FileRoutingConfig,
    pub context: FileContextConfig,
    pub logging: FileLoggingConfig,
    pub output: FileOutputConfig,
    /// Empty means "use the built-in catalog"
    pub providers: Vec<FileProviderConfig>,
}

impl FileConfig {
    /// Validate the entire configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.consensus.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        for entry in &self.providers {
            if entry.name.trim().is_empty() {
                return Err(ConfigValidationError::EmptyProviderName);
            }
            if let Some(family) = &entry.family
                && family.parse::<ProviderFamily>().is_err()
            {
                return Err(ConfigValidationError::UnknownFamily {
                    provider: entry.name.clone(),
                    family: family.clone(),
                });
            }
        }

        Ok(())
    }

    /// Application-level chat settings
    pub fn chat_config(&self) -> ChatConfig {
        let config = ChatConfig::new(self.routing.mode, self.consensus.to_params());
        match &self.system_prompt {
            Some(prompt) if !prompt.trim().is_empty() => {
                config.with_default_system_prompt(prompt.clone())
            }
            _ => config,
        }
    }

    /// Copy safe to print: inline keys masked.
    pub fn redacted(&self) -> Self {
        Self {
            providers: self.providers.iter().map(|p| p.redacted()).collect(),
            ..self.clone()
        }
    }

    /// Render the redacted configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&self.redacted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chorus_domain::{OutputFormat, SelectionPolicy};
    use std::time::Duration;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
system_prompt = "Answer briefly."

[consensus]
timeout_seconds = 20
max_tokens = 1024
selection = "highest_reliability"

[routing]
mode = "always"

[context]
file = "docs/context.md"

[logging]
outcome_log = "/tmp/chorus/outcomes.jsonl"

[output]
format = "full"
color = false

[[providers]]
name = "groq"

[[providers]]
name = "local"
family = "openai_compatible"
base_url = "http://localhost:11434/v1"
model = "llama3"
api_key_env = "LOCAL_KEY"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.consensus.timeout_seconds, 20);
        assert_eq!(config.consensus.selection, SelectionPolicy::HighestReliability);
        assert_eq!(config.routing.mode, RoutingMode::Always);
        assert_eq!(config.context.file, Some(PathBuf::from("docs/context.md")));
        assert!(config.context.enabled);
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert_eq!(config.providers.len(), 2);
        assert_eq!(config.providers[1].api_key_env.as_deref(), Some("LOCAL_KEY"));
        assert!(config.validate().is_ok());

        let chat = config.chat_config();
        assert_eq!(chat.mode, RoutingMode::Always);
        assert_eq!(chat.default_system_prompt.as_deref(), Some("Answer briefly."));
        assert_eq!(chat.consensus.call_timeout, Some(Duration::from_secs(20)));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[routing]\nmode = \"never\"\n").unwrap();
        assert_eq!(config.routing.mode, RoutingMode::Never);
        assert_eq!(config.consensus, FileConsensusConfig::default());
        assert!(config.providers.is_empty());
    }

    #[test]
    fn test_invalid_selection_fails_to_parse() {
        let result: Result<FileConfig, _> =
            toml::from_str("[consensus]\nselection = \"loudest\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = FileConfig::default();
        config.consensus.timeout_seconds = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validate_rejects_empty_provider_name() {
        let config = FileConfig {
            providers: vec![FileProviderConfig {
                name: "  ".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyProviderName));
    }

    #[test]
    fn test_validate_rejects_unknown_family() {
        let config = FileConfig {
            providers: vec![FileProviderConfig {
                name: "x".to_string(),
                family: Some("cohere".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::UnknownFamily { .. })
        ));
    }

    #[test]
    fn test_blank_system_prompt_is_ignored() {
        let config = FileConfig {
            system_prompt: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(config.chat_config().default_system_prompt.is_none());
    }

    #[test]
    fn test_toml_rendering_masks_keys() {
        let config = FileConfig {
            providers: vec![FileProviderConfig {
                name: "openai".to_string(),
                api_key: Some("sk-live-secret".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let rendered = config.to_toml_string().unwrap();
        assert!(rendered.contains("[[providers]]"));
        assert!(rendered.contains("***"));
        assert!(!rendered.contains("sk-live-secret"));
    }
}
