//! Static clothing suggestions
//!
//! Rule table used whenever the AI provider is not configured or fails.
//! Five half-open temperature bands cover the whole real line.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validation::{loose_number, loose_text};

/// Suffix appended to the static text when it replaces a failed AI call
pub const FALLBACK_MARKER: &str = " (modo fallback)";

/// Temperature band driving the static suggestion
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureBand {
    /// Below 10°C
    Freezing,
    /// 10°C up to (not including) 15°C
    Cold,
    /// 15°C up to 20°C
    Cool,
    /// 20°C up to 25°C
    Mild,
    /// 25°C and above
    Hot,
}

impl TemperatureBand {
    /// Classify a temperature in Celsius.
    ///
    /// NaN falls through every comparison and lands in `Hot`.
    pub fn classify(temperature: f64) -> Self {
        if temperature < 10.0 {
            TemperatureBand::Freezing
        } else if temperature < 15.0 {
            TemperatureBand::Cold
        } else if temperature < 20.0 {
            TemperatureBand::Cool
        } else if temperature < 25.0 {
            TemperatureBand::Mild
        } else {
            TemperatureBand::Hot
        }
    }

    /// Clothing advice for this band, phrased to follow "Com X°C, "
    pub fn advice(&self) -> &'static str {
        match self {
            TemperatureBand::Freezing => "use casaco pesado, cachecol, gorro e luvas",
            TemperatureBand::Cold => "use casaco de meia estação, suéter",
            TemperatureBand::Cool => "use uma jaqueta leve ou suéter",
            TemperatureBand::Mild => "use roupas confortáveis de meia estação",
            TemperatureBand::Hot => "prefira roupas leves e respiráveis",
        }
    }
}

/// A measurement as the caller sent it
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// Value used for banding, NaN when the input is not numeric
    pub value: f64,
    /// Text interpolated into suggestions and prompts
    pub text: String,
}

impl Reading {
    pub fn from_json(value: &Value) -> Self {
        Self {
            value: loose_number(value),
            text: loose_text(value),
        }
    }
}

impl From<f64> for Reading {
    fn from(value: f64) -> Self {
        Self {
            value,
            text: format_number(value),
        }
    }
}

/// Build the static suggestion sentence for the given conditions
pub fn static_suggestion(temperature: &Reading, humidity: &Reading) -> String {
    let band = TemperatureBand::classify(temperature.value);
    format!(
        "Com {}°C, {}. Umidade: {}%",
        temperature.text,
        band.advice(),
        humidity.text
    )
}

/// Static suggestion tagged with [`FALLBACK_MARKER`]
pub fn fallback_suggestion(temperature: &Reading, humidity: &Reading) -> String {
    let mut text = static_suggestion(temperature, humidity);
    text.push_str(FALLBACK_MARKER);
    text
}

/// Render a number the way it reads in the UI: `23` rather than `23.0`.
///
/// Magnitudes from 1e21 up and below 1e-6 use exponent notation (`1e+21`,
/// `1.5e-7`), everything else plain decimals.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // covers -0.0
        "0".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value.abs() >= 1e21 || value.abs() < 1e-6 {
        let formatted = format!("{:e}", value);
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        }
    } else {
        value.to_string()
    }
}
