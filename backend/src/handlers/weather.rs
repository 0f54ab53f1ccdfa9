//! HTTP handler for the weather lookup endpoint

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::WeatherQuery;

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Look up current weather for a city.
///
/// The provider's JSON is relayed as-is, including its error status codes.
/// A repeated `city` parameter is forwarded as one comma-joined name.
pub async fn get_current_weather(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Response> {
    let query = WeatherQuery::from_pairs(params);
    let city = query.city()?;

    let reply = state
        .weather
        .get_current_weather(city)
        .await
        .map_err(|e| AppError::WeatherService(e.to_string()))?;

    if !reply.is_success() {
        tracing::warn!("Weather provider answered {} for {:?}", reply.status, city);
    }

    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);
    Ok((status, Json(reply.body)).into_response())
}
