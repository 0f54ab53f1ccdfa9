//! Chat-completion client
//!
//! Talks to an OpenAI-compatible `/chat/completions` endpoint (Groq by default).

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::{ProviderError, ProviderReply};
use crate::config::AiConfig;

pub const ROLE_USER: &str = "user";

/// Client for the chat-completion provider
#[derive(Clone)]
pub struct ChatCompletionClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl ChatCompletionClient {
    /// Create a client authenticated with `api_key`
    pub fn new(client: Client, config: &AiConfig, api_key: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
        }
    }

    /// Send a single user message
    pub async fn complete(&self, prompt: &str) -> Result<ProviderReply, ProviderError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: ROLE_USER,
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        ProviderReply::from_response(response).await
    }
}

/// Text of the first choice, if the provider returned a non-empty one
pub fn completion_text(body: &Value) -> Option<&str> {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
}

/// Provider error message from an error body
pub fn provider_error_message(body: &Value) -> &str {
    body.pointer("/error/message")
        .and_then(Value::as_str)
        .unwrap_or("Erro desconhecido")
}
