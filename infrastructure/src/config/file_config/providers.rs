//! Provider entries from TOML (`[[providers]]` array)

use serde::{Deserialize, Serialize};

/// One `[[providers]]` entry.
///
/// For catalog names (`openai`, `groq`, `gemini`, ...) every field but
/// `name` is optional and defaults from the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    pub name: String,
    /// `openai_compatible` or `gemini`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Environment variable holding the key (default `<NAME>_API_KEY`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// Inline key; prefer `api_key_env`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl FileProviderConfig {
    /// Copy with any inline key masked, for display.
    pub fn redacted(&self) -> Self {
        Self {
            api_key: self.api_key.as_ref().map(|_| "***".to_string()),
            ..self.clone()
        }
    }
}
