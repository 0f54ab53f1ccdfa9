//! Configuration management for the Clima server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CLIMA_ prefix
//! 4. The well-known variables `PORT`, `OPENWEATHER_API_KEY`, `GROQ_API_KEY`
//!
//! Everything is read once at startup; handlers only see the built [`Config`].

use std::fmt;

use config::{ConfigError, Environment, File, Map};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Weather provider configuration
    pub weather: WeatherConfig,

    /// Chat-completion provider configuration
    pub ai: AiConfig,

    /// Outbound HTTP settings
    pub http: HttpConfig,

    /// Result of checking `ai.api_key` against the placeholder prefixes
    #[serde(skip)]
    pub ai_key: AiKeyStatus,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// First port to try
    pub port: u16,

    /// Server host
    pub host: String,

    /// How many following ports to try when the port is taken
    pub max_port_retries: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub base_url: String,

    /// Weather API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// Language of condition descriptions
    pub lang: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    /// OpenAI-compatible API root (the client appends `/chat/completions`)
    pub base_url: String,

    /// Bearer token
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier sent with every completion request
    pub model: String,

    /// Keys starting with one of these are sample values, not credentials.
    ///
    /// The bare `gsk_` prefix is not in the defaults. Every real Groq key
    /// starts with it, so listing it (`CLIMA__AI__PLACEHOLDER_PREFIXES=gsk_`)
    /// means static suggestions for any Groq key.
    pub placeholder_prefixes: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Timeout for each outbound provider call
    pub timeout_secs: u64,
}

/// Whether the AI provider can actually be called
#[derive(Clone, Default, PartialEq, Eq)]
pub enum AiKeyStatus {
    /// No key, or a blank one
    #[default]
    Unconfigured,
    /// A sample value copied from documentation
    PlaceholderOnly,
    /// A key worth sending to the provider
    Live(String),
}

impl AiKeyStatus {
    /// Classify a configured key
    pub fn classify(key: Option<&str>, placeholder_prefixes: &[String]) -> Self {
        let key = match key.map(str::trim) {
            Some(key) if !key.is_empty() => key,
            _ => return AiKeyStatus::Unconfigured,
        };

        let is_placeholder = placeholder_prefixes
            .iter()
            .filter(|prefix| !prefix.is_empty())
            .any(|prefix| key.to_ascii_lowercase().starts_with(&prefix.to_ascii_lowercase()));

        if is_placeholder {
            AiKeyStatus::PlaceholderOnly
        } else {
            AiKeyStatus::Live(key.to_string())
        }
    }

    /// The key to send, only when live
    pub fn live_key(&self) -> Option<&str> {
        match self {
            AiKeyStatus::Live(key) => Some(key),
            _ => None,
        }
    }
}

impl fmt::Debug for AiKeyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiKeyStatus::Unconfigured => f.write_str("Unconfigured"),
            AiKeyStatus::PlaceholderOnly => f.write_str("PlaceholderOnly"),
            AiKeyStatus::Live(_) => f.write_str("Live(<redacted>)"),
        }
    }
}

impl Config {
    /// Load configuration from files and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    /// Load configuration from an explicit set of environment variables
    pub fn from_vars(vars: Map<String, String>) -> Result<Self, ConfigError> {
        let environment = vars
            .get("CLIMA_ENVIRONMENT")
            .cloned()
            .unwrap_or_else(|| "development".into());

        // PORT=0 or PORT=abc falls back to the default
        let port = vars
            .get("PORT")
            .and_then(|p| p.trim().parse::<u16>().ok())
            .filter(|p| *p != 0)
            .map(i64::from);

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.max_port_retries", 10)?
            .set_default("weather.base_url", "https://api.openweathermap.org/data/2.5")?
            .set_default("weather.lang", shared::WEATHER_LANG)?
            .set_default("ai.base_url", "https://api.groq.com/openai/v1")?
            .set_default("ai.model", "openai/gpt-oss-120b")?
            .set_default(
                "ai.placeholder_prefixes",
                vec!["your_", "gsk_your", "gsk_xxx", "changeme", "replace_me"],
            )?
            .set_default("http.timeout_secs", 15)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CLIMA__ prefix)
            .add_source(
                Environment::with_prefix("CLIMA")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("ai.placeholder_prefixes")
                    .try_parsing(true)
                    .source(Some(vars.clone())),
            )
            // The plain variable names always win
            .set_override_option("server.port", port)?
            .set_override_option("weather.api_key", non_blank(&vars, "OPENWEATHER_API_KEY"))?
            .set_override_option("ai.api_key", non_blank(&vars, "GROQ_API_KEY"))?
            .build()?;

        let mut config: Config = config.try_deserialize()?;
        config.ai_key =
            AiKeyStatus::classify(config.ai.api_key.as_deref(), &config.ai.placeholder_prefixes);
        Ok(config)
    }
}

fn non_blank(vars: &Map<String, String>, name: &str) -> Option<String> {
    vars.get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
