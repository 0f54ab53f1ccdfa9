//! Health check handlers

use axum::{extract::State, Json};
use shared::HealthStatus;

use crate::AppState;

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        ok: true,
        uptime: state.started_at.elapsed().as_secs_f64(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
