//! Calls to the Clima backend

use reqwest::Client;
use serde_json::Value;
use shared::{SuggestionRequest, SuggestionResult};
use thiserror::Error;

use crate::controller::{error_message, ControllerError, WeatherCard, BACKEND_URL};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Controller(#[from] ControllerError),
}

/// `GET /weather?city=`
pub async fn fetch_weather(city: &str) -> Result<WeatherCard, ApiError> {
    let response = Client::new()
        .get(format!("{BACKEND_URL}/weather"))
        .query(&[("city", city)])
        .send()
        .await?;

    let status = response.status();
    let body: Value = response.json().await?;
    if !status.is_success() {
        return Err(ApiError::Server(error_message(status.as_u16(), &body)));
    }

    Ok(WeatherCard::from_provider(&body)?)
}

/// `POST /ai/suggest`
pub async fn fetch_suggestion(request: &SuggestionRequest) -> Result<SuggestionResult, ApiError> {
    let response = Client::new()
        .post(format!("{BACKEND_URL}/ai/suggest"))
        .json(request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body: Value = response.json().await?;
        return Err(ApiError::Server(error_message(status.as_u16(), &body)));
    }

    Ok(response.json::<SuggestionResult>().await?)
}
