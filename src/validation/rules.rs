//! Built-in validators, registered by default under their snake_case
//! identifiers (`required`, `min_length`, `max_length`, `min`, `max`,
//! `pattern`).

use regex::Regex;
use serde_json::{Map, Value};
use tracing::warn;

use super::Validator;

/// `required`: the value must be present and, for strings, non-blank.
pub struct Required;

impl Validator for Required {
    fn validate(&self, value: &Value, _params: &Map<String, Value>) -> bool {
        match value {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        }
    }
}

/// `min_length`: string character count must be at least `{{min}}`.
pub struct MinLength;

impl Validator for MinLength {
    fn validate(&self, value: &Value, params: &Map<String, Value>) -> bool {
        let min = params.get("min").and_then(Value::as_u64).unwrap_or(0);
        value
            .as_str()
            .map(|s| s.chars().count() as u64 >= min)
            .unwrap_or(false)
    }
}

/// `max_length`: string character count must be at most `{{max}}`.
pub struct MaxLength;

impl Validator for MaxLength {
    fn validate(&self, value: &Value, params: &Map<String, Value>) -> bool {
        let max = params
            .get("max")
            .and_then(Value::as_u64)
            .unwrap_or(u64::MAX);
        value
            .as_str()
            .map(|s| s.chars().count() as u64 <= max)
            .unwrap_or(false)
    }
}

/// `min`: numeric value (or numeric string) must be at least `{{min}}`.
pub struct Min;

impl Validator for Min {
    fn validate(&self, value: &Value, params: &Map<String, Value>) -> bool {
        let Some(min) = params.get("min").and_then(as_number) else {
            return true;
        };
        as_number(value).map(|n| n >= min).unwrap_or(false)
    }
}

/// `max`: numeric value (or numeric string) must be at most `{{max}}`.
pub struct Max;

impl Validator for Max {
    fn validate(&self, value: &Value, params: &Map<String, Value>) -> bool {
        let Some(max) = params.get("max").and_then(as_number) else {
            return true;
        };
        as_number(value).map(|n| n <= max).unwrap_or(false)
    }
}

/// `pattern`: string value must match the `{{pattern}}` regex.
///
/// An unparseable pattern fails closed: the rule reports a failure rather
/// than waving the value through.
pub struct Pattern;

impl Validator for Pattern {
    fn validate(&self, value: &Value, params: &Map<String, Value>) -> bool {
        let Some(pattern) = params.get("pattern").and_then(Value::as_str) else {
            return true;
        };
        let regex = match Regex::new(pattern) {
            Ok(re) => re,
            Err(err) => {
                warn!(pattern = %pattern, error = %err, "Invalid validation pattern");
                return false;
            }
        };
        value.as_str().map(|s| regex.is_match(s)).unwrap_or(false)
    }
}

fn as_number(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}
