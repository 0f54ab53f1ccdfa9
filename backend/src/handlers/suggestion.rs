//! HTTP handler for AI clothing suggestions

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;
use shared::{SuggestionPayload, SuggestionResult};

use crate::error::AppResult;
use crate::AppState;

/// Suggest clothing for the given conditions.
///
/// Once the body validates the answer is always 200; provider trouble is
/// reported through `mode` and `raw`. A body that is not a JSON object has
/// none of the fields.
pub async fn suggest_clothing(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<SuggestionResult>> {
    let Json(body) = body?;
    let input = SuggestionPayload::from_body(body).into_input()?;

    let result = state.suggestions.suggest(&input).await;
    tracing::info!(
        "Suggestion for {} ({}°C, {}%) served in {:?} mode",
        input.city,
        input.temperature.text,
        input.humidity.text,
        result.mode
    );
    Ok(Json(result))
}
