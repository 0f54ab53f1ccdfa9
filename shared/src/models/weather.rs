//! Weather lookup models

use serde::{Deserialize, Serialize};

use crate::validation::{validate_city, ValidationError};

/// Query string of `GET /weather`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherQuery {
    #[serde(default)]
    pub city: Option<String>,
}

impl WeatherQuery {
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
        }
    }

    /// Build from raw query pairs; a repeated `city` joins its values with commas
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let cities: Vec<String> = pairs
            .into_iter()
            .filter(|(key, _)| key == "city")
            .map(|(_, value)| value)
            .collect();

        Self {
            city: (!cities.is_empty()).then(|| cities.join(",")),
        }
    }

    /// The trimmed city name, or a missing-parameter error
    pub fn city(&self) -> Result<&str, ValidationError> {
        validate_city(self.city.as_deref())
    }
}

/// Weather provider payload, relayed to the browser unchanged
pub type WeatherResult = serde_json::Value;
