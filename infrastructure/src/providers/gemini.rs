//! Gemini `generateContent` adapter
//!
//! Speaks `POST {base_url}/models/{model}:generateContent?key=...`. System
//! messages become `systemInstruction`; assistant turns use the `model` role.

use super::{error_for_status, map_send_error};
use chorus_application::ports::llm_gateway::GatewayError;
use chorus_domain::{GenerationParams, Message, ProviderSpec, Role};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Harm categories sent with every request
const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

const SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<OwnedPart>,
}

#[derive(Debug, Serialize)]
struct OwnedPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
    top_p: f64,
    top_k: u32,
    candidate_count: u32,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeminiProvider {
    spec: ProviderSpec,
    client: Client,
}

impl GeminiProvider {
    pub fn new(spec: ProviderSpec, client: Client) -> Self {
        Self { spec, client }
    }

    pub fn spec(&self) -> &ProviderSpec {
        &self.spec
    }

    /// Endpoint without the key query parameter (safe to log)
    pub(crate) fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.spec.base_url, self.spec.model
        )
    }

    pub(crate) fn request_body<'a>(
        &self,
        messages: &'a [Message],
        params: &GenerationParams,
    ) -> GenerateContentRequest<'a> {
        let system: Vec<&str> = messages
            .iter()
            .filter(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
            .collect();

        let contents = messages
            .iter()
            .filter_map(|m| {
                let role = match m.role {
                    Role::System => return None,
                    Role::User => "user",
                    Role::Assistant => "model",
                };
                Some(Content {
                    role,
                    parts: vec![Part { text: &m.content }],
                })
            })
            .collect();

        GenerateContentRequest {
            contents,
            system_instruction: (!system.is_empty()).then(|| SystemInstruction {
                parts: vec![OwnedPart {
                    text: system.join("\n\n"),
                }],
            }),
            generation_config: GenerationConfig {
                temperature: params.temperature,
                max_output_tokens: params.max_tokens,
                top_p: params.top_p,
                top_k: params.top_k,
                candidate_count: 1,
            },
            safety_settings: SAFETY_CATEGORIES
                .iter()
                .map(|&category| SafetySetting {
                    category,
                    threshold: SAFETY_THRESHOLD,
                })
                .collect(),
        }
    }

    pub async fn complete(
        &self,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<String, GatewayError> {
        debug!(
            "POST {} (t={})",
            self.endpoint(),
            params.temperature
        );

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.spec.credential.expose())])
            .json(&self.request_body(messages, params))
            .send()
            .await
            .map_err(map_send_error)?;

        let response = error_for_status(response).await?;
        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        parse_content(body)
    }
}

fn parse_content(body: GenerateContentResponse) -> Result<String, GatewayError> {
    let candidate = body
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::MalformedResponse("no candidates in response".to_string()))?;

    let text = candidate
        .content
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text);

    match text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(GatewayError::EmptyResponse),
    }
}
