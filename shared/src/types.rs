//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub ok: bool,
    /// Seconds since the server state was built
    pub uptime: f64,
    pub version: String,
}

/// Locale for speech recognition in the browser
pub const SPEECH_LOCALE: &str = "pt-BR";

/// Language code sent to the weather provider
pub const WEATHER_LANG: &str = "pt_br";
