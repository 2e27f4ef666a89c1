//! OpenAI-compatible chat completions adapter
//!
//! Speaks `POST {base_url}/chat/completions` with bearer auth. OpenAI, Groq,
//! DeepSeek, Mistral and OpenRouter all accept this shape.

use super::{error_for_status, map_send_error};
use chorus_application::ports::llm_gateway::GatewayError;
use chorus_domain::{GenerationParams, Message, ProviderSpec};
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Request body for chat completions
#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
    top_p: f64,
    frequency_penalty: f64,
    presence_penalty: f64,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Response from chat completions
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OpenAiCompatibleProvider {
    spec: ProviderSpec,
    client: Client,
}

impl OpenAiCompatibleProvider {
    pub fn new(spec: ProviderSpec, client: Client) -> Self {
        Self { spec, client }
    }

    pub fn spec(&self) -> &ProviderSpec {
        &self.spec
    }

    pub(crate) fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.spec.base_url)
    }

    pub(crate) fn request_body<'a>(
        &'a self,
        messages: &'a [Message],
        params: &GenerationParams,
    ) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.spec.model,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            top_p: params.top_p,
            frequency_penalty: params.frequency_penalty,
            presence_penalty: params.presence_penalty,
        }
    }

    pub async fn complete(
        &self,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<String, GatewayError> {
        debug!(
            "POST {} (model {}, t={})",
            self.endpoint(),
            self.spec.model,
            params.temperature
        );

        let response = self
            .client
            .post(self.endpoint())
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.spec.credential.expose()),
            )
            .header(CONTENT_TYPE, "application/json")
            .json(&self.request_body(messages, params))
            .send()
            .await
            .map_err(map_send_error)?;

        let response = error_for_status(response).await?;
        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        parse_content(body)
    }
}

fn parse_content(body: ChatCompletionResponse) -> Result<String, GatewayError> {
    let choice = body
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::MalformedResponse("no choices in response".to_string()))?;

    match choice.message.content {
        Some(content) if !content.trim().is_empty() => Ok(content),
        _ => Err(GatewayError::EmptyResponse),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chorus_domain::{Credential, ProviderFamily};
    use serde_json::json;

    fn provider() -> OpenAiCompatibleProvider {
        let spec = ProviderSpec::new(
            "groq",
            ProviderFamily::OpenAiCompatible,
            "https://api.groq.com/openai/v1/",
            "llama-3.1-8b-instant",
            Credential::parse("gsk_live_123").unwrap(),
        )
        .unwrap();
        OpenAiCompatibleProvider::new(spec, Client::new())
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            provider().endpoint(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let provider = provider();
        let messages = vec![
            Message::system("Be accurate."),
            Message::user("Largest ocean?"),
            Message::assistant("Pacific."),
            Message::user("Deepest?"),
        ];
        let params = GenerationParams::default()
            .with_temperature(0.25)
            .with_max_tokens(512);

        let body = serde_json::to_value(provider.request_body(&messages, &params)).unwrap();

        assert_eq!(
            body,
            json!({
                "model": "llama-3.1-8b-instant",
                "messages": [
                    {"role": "system", "content": "Be accurate."},
                    {"role": "user", "content": "Largest ocean?"},
                    {"role": "assistant", "content": "Pacific."},
                    {"role": "user", "content": "Deepest?"}
                ],
                "temperature": 0.25,
                "max_tokens": 512,
                "top_p": 0.95,
                "frequency_penalty": 0.0,
                "presence_penalty": 0.0
            })
        );
    }

    #[test]
    fn test_parse_first_choice() {
        let body: ChatCompletionResponse = serde_json::from_value(json!({
            "id": "x",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Pacific"}},
                {"index": 1, "message": {"role": "assistant", "content": "Atlantic"}}
            ],
            "usage": {"prompt_tokens": 3, "completion_tokens": 1}
        }))
        .unwrap();
        assert_eq!(parse_content(body).unwrap(), "Pacific");
    }

    #[test]
    fn test_parse_null_or_missing_content() {
        let null_content: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": null}}]
        }))
        .unwrap();
        assert_eq!(
            parse_content(null_content).unwrap_err(),
            GatewayError::EmptyResponse
        );

        let no_choices: ChatCompletionResponse =
            serde_json::from_value(json!({ "choices": [] })).unwrap();
        assert!(matches!(
            parse_content(no_choices).unwrap_err(),
            GatewayError::MalformedResponse(_)
        ));
    }
}
