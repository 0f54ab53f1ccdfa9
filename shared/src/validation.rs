//! Validation utilities shared by the server and the browser controller

use serde_json::Value;
use thiserror::Error;

use crate::suggestion::format_number;

/// A request field failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Missing { field } => field,
        }
    }

    /// Portuguese message shown to end users
    pub fn message_pt(&self) -> String {
        match self {
            ValidationError::Missing { field } => format!("{} é obrigatório", field),
        }
    }
}

// ============================================================================
// Request Validations
// ============================================================================

/// Validate a city name: present and not blank
pub fn validate_city(city: Option<&str>) -> Result<&str, ValidationError> {
    match city.map(str::trim) {
        Some(city) if !city.is_empty() => Ok(city),
        _ => Err(ValidationError::Missing { field: "city" }),
    }
}

// ============================================================================
// Loose JSON fields
// ============================================================================
//
// Suggestion fields only have to be present. Whatever the caller sent is
// read the way a browser script would read it: as text for display, and
// as a number (NaN when not numeric) for banding.

/// Whether a present value counts as given: not `null`, `false`, `0` or `""`
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text of a value as it appears when interpolated into a sentence.
///
/// Arrays join their elements with commas, objects read `[object Object]`.
pub fn loose_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => loose_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Numeric reading of a value; NaN when it holds no number.
///
/// `null`, `false`, `""` and `[]` read as 0, `true` as 1, strings are parsed
/// after trimming. Hexadecimal and binary literals are not recognized.
pub fn loose_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_loose_number(s),
        Value::Array(_) => parse_loose_number(&loose_text(value)),
        Value::Object(_) => f64::NAN,
    }
}

fn parse_loose_number(text: &str) -> f64 {
    let text = text.trim();
    match text {
        "" => 0.0,
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        // Rust also parses "inf" and "nan" spellings, which are not numbers here
        _ if text.chars().any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E')) => f64::NAN,
        _ => text.parse::<f64>().unwrap_or(f64::NAN),
    }
}

// ============================================================================
// Numeric Extraction from rendered text
// ============================================================================

/// Keep digits, minus signs, dots and commas; commas become dots.
///
/// `"-5,5°C"` becomes `"-5.5"`, `"Umidade do ar : 45 %"` becomes `"45"`.
pub fn clean_numeric_text(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '-' | '.' | ','))
        .map(|c| if c == ',' { '.' } else { c })
        .collect()
}

/// Extract a decimal number from rendered text such as `"23 °C"`.
///
/// Parses the longest numeric prefix of the cleaned text, so `"1.2.3"`
/// yields `1.2`. Returns `None` when no digit leads the cleaned text.
pub fn extract_number(text: &str) -> Option<f64> {
    let cleaned = clean_numeric_text(text);
    let end = numeric_prefix_len(&cleaned, true)?;
    cleaned[..end].parse::<f64>().ok()
}

/// Extract a whole number from rendered text, dropping any fraction
pub fn extract_whole_number(text: &str) -> Option<f64> {
    let cleaned = clean_numeric_text(text);
    let end = numeric_prefix_len(&cleaned, false)?;
    cleaned[..end].parse::<f64>().ok()
}

/// Length of the leading `-?digits(.digits)?` run, or `None` without digits
fn numeric_prefix_len(s: &str, allow_fraction: bool) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut digits = 0;

    if bytes.first() == Some(&b'-') {
        end = 1;
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if allow_fraction && end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
            digits += 1;
        }
        // "5." keeps only "5"
        if frac_end > end + 1 {
            end = frac_end;
        }
    }

    (digits > 0).then_some(end)
}
