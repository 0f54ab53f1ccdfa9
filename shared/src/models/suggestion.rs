//! Clothing suggestion models

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::suggestion::Reading;
use crate::validation::{is_truthy, loose_text, ValidationError};

/// Body of `POST /ai/suggest` as sent by the browser controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub temperature: f64,
    pub humidity: f64,
    pub city: String,
}

/// Body of `POST /ai/suggest` as received on the wire.
///
/// Fields keep whatever JSON the caller sent, so that a missing one is
/// reported by name and present ones are never rejected for their type.
#[derive(Debug, Clone, Default)]
pub struct SuggestionPayload {
    pub temperature: Option<Value>,
    pub humidity: Option<Value>,
    pub city: Option<Value>,
}

impl SuggestionPayload {
    /// Pick the fields out of a JSON body. Anything but an object has none.
    pub fn from_body(body: Value) -> Self {
        let Value::Object(mut fields) = body else {
            return Self::default();
        };
        Self {
            temperature: fields.remove("temperature"),
            humidity: fields.remove("humidity"),
            city: fields.remove("city"),
        }
    }

    /// Check that all three fields are given.
    ///
    /// `temperature` and `humidity` only have to be present (`null` included);
    /// `city` must be truthy.
    pub fn into_input(self) -> Result<SuggestionInput, ValidationError> {
        let temperature = self
            .temperature
            .ok_or(ValidationError::Missing { field: "temperature" })?;
        let humidity = self
            .humidity
            .ok_or(ValidationError::Missing { field: "humidity" })?;
        let city = self
            .city
            .filter(is_truthy)
            .ok_or(ValidationError::Missing { field: "city" })?;

        Ok(SuggestionInput {
            temperature: Reading::from_json(&temperature),
            humidity: Reading::from_json(&humidity),
            city: loose_text(&city),
        })
    }
}

/// Validated input of the suggestion chain
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionInput {
    pub temperature: Reading,
    pub humidity: Reading,
    pub city: String,
}

impl From<SuggestionRequest> for SuggestionInput {
    fn from(request: SuggestionRequest) -> Self {
        Self {
            temperature: Reading::from(request.temperature),
            humidity: Reading::from(request.humidity),
            city: request.city,
        }
    }
}

/// Which branch of the suggestion chain produced the text
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionMode {
    /// Text written by the AI provider
    Live,
    /// Provider not configured, rule table used directly
    Static,
    /// Provider failed, rule table used with the fallback marker
    Fallback,
}

/// Response of `POST /ai/suggest`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionResult {
    pub content: String,
    /// Provider response, error echo, or `{"mode": "static"}`
    pub raw: Value,
    pub mode: SuggestionMode,
}
