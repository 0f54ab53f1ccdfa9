//! Clothing suggestion service
//!
//! Decides between a live AI answer and the static rule table:
//! - no usable key: static text, no network call
//! - provider unreachable, erroring, or answering without text: static text
//!   with the fallback marker, still a success for the caller
//! - otherwise: the provider's text

use reqwest::Client;
use serde_json::{json, Value};
use shared::{
    fallback_suggestion, static_suggestion, SuggestionInput, SuggestionMode, SuggestionResult,
};

use crate::config::{AiConfig, AiKeyStatus};
use crate::external::chat::{completion_text, provider_error_message, ChatCompletionClient};

/// Suggestion service with an optional AI provider behind it
#[derive(Clone)]
pub struct SuggestionService {
    assistant: Option<ChatCompletionClient>,
}

impl SuggestionService {
    /// Create a SuggestionService; the provider is only wired for a live key
    pub fn new(http_client: Client, config: &AiConfig, key_status: &AiKeyStatus) -> Self {
        let assistant = key_status
            .live_key()
            .map(|key| ChatCompletionClient::new(http_client, config, key));
        Self { assistant }
    }

    /// Whether requests will reach the AI provider
    pub fn is_live(&self) -> bool {
        self.assistant.is_some()
    }

    /// Produce a suggestion. Provider failures never surface as errors.
    pub async fn suggest(&self, input: &SuggestionInput) -> SuggestionResult {
        let Some(assistant) = &self.assistant else {
            tracing::debug!("AI provider not configured, using static suggestion");
            return SuggestionResult {
                content: static_suggestion(&input.temperature, &input.humidity),
                raw: json!({ "mode": "static" }),
                mode: SuggestionMode::Static,
            };
        };

        let prompt = build_prompt(input);
        let reply = match assistant.complete(&prompt).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::error!("AI provider request failed: {}", err);
                return fallback(input, json!({ "error": err.to_string() }));
            }
        };

        if !reply.is_success() {
            tracing::error!(
                "AI provider error ({}): {}",
                reply.status,
                provider_error_message(&reply.body)
            );
            return fallback(input, reply.body);
        }

        match completion_text(&reply.body) {
            Some(text) => SuggestionResult {
                content: text.to_string(),
                raw: reply.body,
                mode: SuggestionMode::Live,
            },
            None => {
                tracing::warn!("AI provider answered without suggestion text");
                fallback(input, reply.body)
            }
        }
    }
}

fn fallback(input: &SuggestionInput, raw: Value) -> SuggestionResult {
    SuggestionResult {
        content: fallback_suggestion(&input.temperature, &input.humidity),
        raw,
        mode: SuggestionMode::Fallback,
    }
}

/// Prompt sent to the chat-completion provider
pub fn build_prompt(input: &SuggestionInput) -> String {
    format!(
        "Sugira roupas para a temperatura de {} graus, com umidade de {}%, na cidade de {}. Seja breve (max 100 caracteres).",
        input.temperature.text, input.humidity.text, input.city
    )
}
