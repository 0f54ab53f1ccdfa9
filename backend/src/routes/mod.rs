//! Route definitions for the Clima API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Weather proxy
        .route("/weather", get(handlers::get_current_weather))
        // AI clothing suggestions
        .nest("/ai", ai_routes())
}

/// AI suggestion routes
fn ai_routes() -> Router<AppState> {
    Router::new().route("/suggest", post(handlers::suggest_clothing))
}
