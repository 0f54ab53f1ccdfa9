//! Page controller logic
//!
//! Turns API answers into HTML fragments and rendered text back into
//! requests. Nothing here touches the DOM, so it runs under plain
//! `cargo test`.

use serde_json::Value;
use shared::{extract_number, extract_whole_number, SuggestionRequest, SuggestionResult};
use thiserror::Error;

/// Backend the page talks to
pub const BACKEND_URL: &str = "http://localhost:3002";

// Selectors of the page elements the controller drives
pub const CITY_INPUT: &str = ".input-cidade";
pub const WEATHER_PANEL: &str = ".caixa-media";
pub const CITY_TITLE: &str = ".cidade";
pub const TEMPERATURE_TEXT: &str = ".temperatura";
pub const HUMIDITY_TEXT: &str = ".umidade";
pub const SUGGESTION_BUTTON: &str = ".botao-ia";
pub const SUGGESTION_SLOT: &str = ".resposta-ia";

const ICON_URL: &str = "https://openweathermap.org/img/wn";

/// Errors shown to the user inside the page
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControllerError {
    #[error("Erro ao extrair temperatura/umidade. Tente novamente.")]
    Extraction,

    #[error("Resposta de clima incompleta: falta {0}")]
    IncompleteWeather(&'static str),
}

/// The weather card shown after a successful lookup
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherCard {
    pub city: String,
    /// Whole degrees, rounded down
    pub temperature: f64,
    pub humidity: f64,
    pub icon: String,
}

impl WeatherCard {
    /// Read the card fields from the provider payload
    pub fn from_provider(body: &Value) -> Result<Self, ControllerError> {
        let city = body["name"]
            .as_str()
            .ok_or(ControllerError::IncompleteWeather("name"))?;
        let temperature = body["main"]["temp"]
            .as_f64()
            .ok_or(ControllerError::IncompleteWeather("main.temp"))?;
        let humidity = body["main"]["humidity"]
            .as_f64()
            .ok_or(ControllerError::IncompleteWeather("main.humidity"))?;
        let icon = body["weather"][0]["icon"].as_str().unwrap_or_default();

        Ok(Self {
            city: city.to_string(),
            temperature: temperature.floor(),
            humidity,
            icon: icon.to_string(),
        })
    }

    /// HTML for the weather panel, including the suggestion button
    pub fn render(&self) -> String {
        format!(
            r#"<h2 class="cidade">{city}</h2>
<p class="temperatura">{temperature} °C</p>
<img class="icone-img" src="{ICON_URL}/{icon}.png">
<p class="umidade">Umidade do ar : {humidity} %</p>
<button class="botao-ia">Sugestão de Roupa</button>
<p class="resposta-ia"></p>"#,
            city = escape_html(&self.city),
            temperature = shared::format_number(self.temperature),
            icon = escape_html(&self.icon),
            humidity = shared::format_number(self.humidity),
        )
    }
}

/// Values scraped back from the rendered weather card
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionForm {
    pub temperature: f64,
    pub humidity: f64,
    pub city: String,
}

impl SuggestionForm {
    /// Parse the rendered temperature and humidity texts
    pub fn from_rendered(
        temperature_text: &str,
        humidity_text: &str,
        city: &str,
    ) -> Result<Self, ControllerError> {
        let temperature = extract_number(temperature_text).ok_or(ControllerError::Extraction)?;
        let humidity = extract_whole_number(humidity_text).ok_or(ControllerError::Extraction)?;

        Ok(Self {
            temperature,
            humidity,
            city: city.trim().to_string(),
        })
    }

    pub fn into_request(self) -> SuggestionRequest {
        SuggestionRequest {
            temperature: self.temperature,
            humidity: self.humidity,
            city: self.city,
        }
    }
}

/// Pick the message to show for an error answer
pub fn error_message(status: u16, body: &Value) -> String {
    let candidates = [
        body.pointer("/error/message_pt"),
        body.pointer("/error/message"),
        body.get("error"),
        body.get("message"),
    ];

    candidates
        .into_iter()
        .flatten()
        .find_map(|v| v.as_str().filter(|s| !s.is_empty()))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Erro {}", status))
}

/// Text for the suggestion slot
pub fn suggestion_text(result: &SuggestionResult) -> &str {
    if result.content.trim().is_empty() {
        "Sugestão não disponível"
    } else {
        &result.content
    }
}

pub fn render_loading() -> String {
    "<p>🔄 Carregando clima...</p>".to_string()
}

pub fn render_suggestion_loading() -> String {
    "<p>🤖 Gerando sugestão...</p>".to_string()
}

pub fn render_suggestion(result: &SuggestionResult) -> String {
    format!("<p>{}</p>", escape_html(suggestion_text(result)))
}

pub fn render_error(message: &str) -> String {
    format!(
        r#"<p style="color: red;">❌ {}</p>"#,
        escape_html(message)
    )
}

/// Escape text placed inside HTML elements and attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
