//! Weather API client for fetching weather data
//!
//! Integrates with OpenWeatherMap API for current conditions by city name

use reqwest::Client;

use super::{ProviderError, ProviderReply};
use crate::config::WeatherConfig;

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    lang: String,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(client: Client, config: &WeatherConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            lang: config.lang.clone(),
        }
    }

    /// Fetch current weather conditions by city name.
    ///
    /// Non-success answers are returned as a reply, not an error, so the
    /// caller can relay the provider's own status and body.
    pub async fn get_current_weather(&self, city: &str) -> Result<ProviderReply, ProviderError> {
        let url = format!("{}/weather", self.base_url);
        let api_key = self.api_key.as_deref().unwrap_or_default();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", api_key),
                ("units", "metric"),
                ("lang", self.lang.as_str()),
            ])
            .send()
            .await?;

        ProviderReply::from_response(response).await
    }
}
