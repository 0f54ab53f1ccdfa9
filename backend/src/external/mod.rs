//! External API integrations

pub mod chat;
pub mod weather;

pub use chat::ChatCompletionClient;
pub use weather::WeatherClient;

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

/// Failure to obtain a usable reply from a provider
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Response is not JSON: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

/// A provider answer, successful or not, with its JSON body
#[derive(Debug, Clone)]
pub struct ProviderReply {
    pub status: u16,
    pub body: Value,
}

impl ProviderReply {
    /// Read status and JSON body from a provider response
    pub async fn from_response(response: reqwest::Response) -> Result<Self, ProviderError> {
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes)?;
        Ok(Self { status, body })
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Build the HTTP client shared by both provider clients
pub fn http_client(timeout_secs: u64) -> Result<Client, ProviderError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?;
    Ok(client)
}
