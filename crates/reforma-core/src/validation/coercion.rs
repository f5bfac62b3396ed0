//! Coercion of string-typed form values.
//!
//! Multipart text parts always arrive as strings. These functions turn them
//! into numbers, flags and JSON values; range and shape checks belong to the
//! schema validator.

use super::error::ValidationError;

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.filter(|value| !value.is_empty())
}

/// Parse a decimal number. Absent or empty input is a missing field.
pub fn parse_number(raw: Option<&str>, field_name: &str) -> Result<f64, ValidationError> {
    let value =
        non_empty(raw).ok_or_else(|| ValidationError::MissingField(field_name.to_string()))?;

    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| ValidationError::InvalidNumber(field_name.to_string()))
}

/// Parse an on/off flag. Only `"true"` and `"1"` are truthy; never fails.
pub fn parse_boolean_flag(raw: Option<&str>) -> bool {
    matches!(non_empty(raw), Some("true") | Some("1"))
}

/// Decode a JSON-encoded field without imposing a shape on it.
pub fn parse_structured(
    raw: Option<&str>,
    field_name: &str,
) -> Result<serde_json::Value, ValidationError> {
    let value =
        non_empty(raw).ok_or_else(|| ValidationError::MissingField(field_name.to_string()))?;

    serde_json::from_str(value).map_err(|e| {
        tracing::debug!(field = field_name, error = %e, "Structured field is not valid JSON");
        ValidationError::InvalidJson(field_name.to_string())
    })
}
