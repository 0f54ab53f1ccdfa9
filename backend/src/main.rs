//! Clima - Backend Server binary

use clima_backend::{
    config::{AiKeyStatus, Config},
    create_app,
    server::bind_with_retry,
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "clima_backend=debug,clima_server=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;

    tracing::info!("Starting Clima server");
    tracing::info!("Environment: {}", config.environment);

    if config.weather.api_key.is_none() {
        tracing::warn!("Warning: OPENWEATHER_API_KEY not set");
    }
    match &config.ai_key {
        AiKeyStatus::Unconfigured => tracing::warn!("Warning: GROQ_API_KEY not set"),
        AiKeyStatus::PlaceholderOnly => {
            tracing::warn!("GROQ_API_KEY looks like a placeholder, using static suggestions")
        }
        AiKeyStatus::Live(_) => tracing::info!("AI suggestions via model {}", config.ai.model),
    }

    let host = config.server.host.clone();
    let base_port = config.server.port;
    let max_retries = config.server.max_port_retries;

    // Create application state
    let state = AppState::new(config)?;

    // Build application
    let app = create_app(state);

    // Start server
    let (listener, port) = match bind_with_retry(&host, base_port, max_retries).await {
        Ok(bound) => bound,
        Err(err) => {
            tracing::error!("Failed to start server: {}", err);
            std::process::exit(1);
        }
    };
    tracing::info!("Server listening on http://localhost:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
