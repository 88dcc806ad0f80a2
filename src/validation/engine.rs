use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::DispatchError;
use crate::registry::Registry;
use crate::routes::FieldRules;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([A-Za-z0-9_.-]+)\s*\}\}").expect("valid token regex"));

/// Evaluate validation rules against request data.
///
/// Only fields present in `accept` are validated, in `accept` order. The
/// first failing rule per field records that field's rendered message and
/// stops further rules for the field. Empty `validations` or empty `data`
/// yield an empty map immediately without constructing any validator.
///
/// Returns `DispatchError::UnknownValidator` when a rule names a validator
/// the registry cannot resolve — a configuration error, not a validation
/// failure.
pub fn validate(
    accept: &[String],
    validations: &[FieldRules],
    data: &Map<String, Value>,
    registry: &Registry,
) -> Result<BTreeMap<String, String>, DispatchError> {
    let mut errors = BTreeMap::new();
    if validations.is_empty() || data.is_empty() {
        return Ok(errors);
    }

    for field in accept {
        let Some(rules) = validations
            .iter()
            .find(|fr| &fr.field == field)
            .map(|fr| &fr.rules)
        else {
            continue;
        };
        let value = data.get(field).unwrap_or(&Value::Null);
        for rule in rules {
            let validator = registry
                .validator(&rule.validator)
                .ok_or_else(|| DispatchError::UnknownValidator(rule.validator.clone()))?;
            if !validator.validate(value, &rule.params) {
                debug!(field = %field, validator = %rule.validator, "Validation rule failed");
                errors.insert(field.clone(), render_message(&rule.message, &rule.params));
                break;
            }
        }
    }
    Ok(errors)
}

/// Render a rule's message template.
///
/// Every `{{key}}` token is replaced by the string form of `params[key]`;
/// unmatched tokens are left verbatim.
#[must_use]
pub fn render_message(template: &str, params: &Map<String, Value>) -> String {
    TOKEN_RE
        .replace_all(template, |caps: &regex::Captures<'_>| {
            match params.get(&caps[1]) {
                Some(value) => param_display(value),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn param_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_render_substitutes_params() {
        let msg = render_message(
            "Price must be at least {{min}}",
            &params(json!({ "min": 0 })),
        );
        assert_eq!(msg, "Price must be at least 0");
    }

    #[test]
    fn test_render_string_params_unquoted() {
        let msg = render_message("Hello {{name}}", &params(json!({ "name": "Ada" })));
        assert_eq!(msg, "Hello Ada");
    }

    #[test]
    fn test_render_leaves_unmatched_tokens() {
        let msg = render_message("{{min}} to {{max}}", &params(json!({ "min": 1 })));
        assert_eq!(msg, "1 to {{max}}");
    }
}
