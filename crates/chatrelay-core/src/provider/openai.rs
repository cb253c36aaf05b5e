//! OpenAI-compatible completion provider.
//!
//! This single implementation covers every provider that exposes an
//! OpenAI-compatible chat completions endpoint — DeepSeek (the default),
//! OpenAI, OpenRouter, Groq, vLLM, any local server. No SDK dependency,
//! just direct HTTP via `reqwest`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::ChatMessage;
use super::{CompletionProvider, ProviderError};

/// Default provider base URL (DeepSeek).
const DEFAULT_API_BASE: &str = "https://api.deepseek.com";

/// OpenAI-compatible provider that works with any backend exposing the
/// `/chat/completions` endpoint. Requests are non-streaming and are
/// never retried.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiProvider {
    /// Create a new provider.
    ///
    /// # Arguments
    /// * `api_key` - API key for bearer authentication
    /// * `api_base` - Custom base URL (`None` = DeepSeek)
    /// * `model` - Model identifier submitted with every request
    /// * `client` - Shared HTTP client
    pub fn new(api_key: &str, api_base: Option<&str>, model: &str, client: Client) -> Self {
        let base_url = api_base
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
            .to_string();

        debug!(base_url = %base_url, model, "Initialized completion provider");

        Self {
            client,
            api_key: api_key.to_string(),
            base_url,
            model: model.to_string(),
        }
    }
}

// ── OpenAI API request/response types ───────────────────────────────

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageResponse,
}

#[derive(Deserialize)]
struct MessageResponse {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

// ── CompletionProvider implementation ───────────────────────────────

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);

        let request_body = CompletionRequest {
            model: &self.model,
            messages,
            stream: false,
        };

        debug!(model = %self.model, url = %url, msg_count = messages.len(), "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Prefer the provider's error envelope when it parses
            let message = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err) => err.error.message,
                Err(_) => body,
            };
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: CompletionResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Malformed("no choices in response".into()))?;

        let content = choice
            .message
            .content
            .ok_or_else(|| ProviderError::Malformed("choice has no message content".into()))?;

        debug!(chars = content.len(), "Received completion response");

        Ok(content)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
