//! Sampling parameters for a single completion request

use serde::{Deserialize, Serialize};

/// Parameters sent alongside one completion request.
///
/// Both request families receive the same values; each adapter maps them
/// onto its own field names (`max_tokens` vs `maxOutputTokens`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    /// Only honoured by the Gemini family
    pub top_k: u32,
    /// Only honoured by the OpenAI-compatible family
    pub frequency_penalty: f64,
    /// Only honoured by the OpenAI-compatible family
    pub presence_penalty: f64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 2048,
            top_p: 0.95,
            top_k: 40,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

impl GenerationParams {
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}
