//! Clima - Backend Server
//!
//! Weather lookup and clothing suggestion API. Proxies a weather provider
//! and a chat-completion provider, falling back to a static rule table when
//! the AI provider is missing or failing.

use std::{sync::Arc, time::Instant};

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod services;

pub use config::Config;

use external::{ProviderError, WeatherClient};
use services::SuggestionService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub weather: WeatherClient,
    pub suggestions: SuggestionService,
    pub started_at: Instant,
}

impl AppState {
    /// Build provider clients from the loaded configuration
    pub fn new(config: Config) -> Result<Self, ProviderError> {
        let http_client = external::http_client(config.http.timeout_secs)?;
        let weather = WeatherClient::new(http_client.clone(), &config.weather);
        let suggestions = SuggestionService::new(http_client, &config.ai, &config.ai_key);

        Ok(Self {
            config: Arc::new(config),
            weather,
            suggestions,
            started_at: Instant::now(),
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Clima API v0.1 - GET /weather?city=, POST /ai/suggest, GET /health"
}
