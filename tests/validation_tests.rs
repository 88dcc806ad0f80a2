//! Tests for the validation engine: accepted-field filtering,
//! first-failure-wins, message templating, early-outs, and the built-in
//! validators.

use routeflow::error::DispatchError;
use routeflow::routes::{FieldRules, RuleSpec};
use routeflow::validation::{render_message, validate, Validator};
use routeflow::Registry;
use serde_json::{json, Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn data(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

fn rule(validator: &str, params: Value, message: &str) -> RuleSpec {
    RuleSpec {
        validator: validator.to_string(),
        params: data(params),
        message: message.to_string(),
    }
}

fn field(name: &str, rules: Vec<RuleSpec>) -> FieldRules {
    FieldRules {
        field: name.to_string(),
        rules,
    }
}

#[test]
fn test_required_fails_on_blank_string() {
    let registry = Registry::new();
    let validations = vec![field(
        "name",
        vec![rule("required", json!({}), "Name is required")],
    )];
    let errors = validate(
        &["name".to_string()],
        &validations,
        &data(json!({ "name": "" })),
        &registry,
    )
    .unwrap();
    assert_eq!(errors.get("name").map(String::as_str), Some("Name is required"));
}

#[test]
fn test_passing_field_contributes_no_entry() {
    let registry = Registry::new();
    let validations = vec![field(
        "name",
        vec![rule("required", json!({}), "Name is required")],
    )];
    let errors = validate(
        &["name".to_string()],
        &validations,
        &data(json!({ "name": "Ada" })),
        &registry,
    )
    .unwrap();
    assert!(errors.is_empty());
}

#[test]
fn test_only_accepted_fields_are_validated() {
    let registry = Registry::new();
    let validations = vec![field(
        "name",
        vec![rule("required", json!({}), "Name is required")],
    )];
    // "name" has a failing value but is not in the accept list.
    let errors = validate(
        &["email".to_string()],
        &validations,
        &data(json!({ "name": "" })),
        &registry,
    )
    .unwrap();
    assert!(errors.is_empty());
}

#[test]
fn test_first_failure_wins_per_field() {
    let registry = Registry::new();
    let validations = vec![field(
        "name",
        vec![
            rule("required", json!({}), "Name is required"),
            rule("min_length", json!({ "min": 3 }), "At least {{min}} chars"),
        ],
    )];
    let errors = validate(
        &["name".to_string()],
        &validations,
        &data(json!({ "name": "" })),
        &registry,
    )
    .unwrap();
    assert_eq!(errors.get("name").map(String::as_str), Some("Name is required"));
}

#[test]
fn test_empty_data_skips_validator_construction() {
    let mut registry = Registry::new();
    let constructed = Arc::new(AtomicUsize::new(0));
    struct Never;
    impl Validator for Never {
        fn validate(&self, _: &Value, _: &Map<String, Value>) -> bool {
            false
        }
    }
    let count = Arc::clone(&constructed);
    registry.register_validator("never", move || {
        count.fetch_add(1, Ordering::SeqCst);
        Box::new(Never)
    });

    let validations = vec![field("name", vec![rule("never", json!({}), "nope")])];
    let errors = validate(&["name".to_string()], &validations, &Map::new(), &registry).unwrap();
    assert!(errors.is_empty());
    assert_eq!(constructed.load(Ordering::SeqCst), 0);
}

#[test]
fn test_validators_constructed_per_invocation() {
    let mut registry = Registry::new();
    let constructed = Arc::new(AtomicUsize::new(0));
    struct AlwaysOk;
    impl Validator for AlwaysOk {
        fn validate(&self, _: &Value, _: &Map<String, Value>) -> bool {
            true
        }
    }
    let count = Arc::clone(&constructed);
    registry.register_validator("ok", move || {
        count.fetch_add(1, Ordering::SeqCst);
        Box::new(AlwaysOk)
    });

    let validations = vec![field("name", vec![rule("ok", json!({}), "x")])];
    let payload = data(json!({ "name": "v" }));
    for _ in 0..3 {
        let _ = validate(&["name".to_string()], &validations, &payload, &registry).unwrap();
    }
    assert_eq!(constructed.load(Ordering::SeqCst), 3);
}

#[test]
fn test_unknown_validator_is_configuration_error() {
    let registry = Registry::new();
    let validations = vec![field("name", vec![rule("no_such", json!({}), "x")])];
    let err = validate(
        &["name".to_string()],
        &validations,
        &data(json!({ "name": "v" })),
        &registry,
    )
    .unwrap_err();
    assert!(matches!(err, DispatchError::UnknownValidator(name) if name == "no_such"));
}

#[test]
fn test_message_templating() {
    assert_eq!(
        render_message("Price must be at least {{min}}", &data(json!({ "min": 0 }))),
        "Price must be at least 0"
    );
    assert_eq!(
        render_message("Hello {{name}}!", &data(json!({ "name": "Ada" }))),
        "Hello Ada!"
    );
    assert_eq!(
        render_message("{{present}} and {{missing}}", &data(json!({ "present": 1 }))),
        "1 and {{missing}}"
    );
}

#[test]
fn test_builtin_length_and_range_rules() {
    let registry = Registry::new();

    let min_length = registry.validator("min_length").unwrap();
    assert!(min_length.validate(&json!("abcd"), &data(json!({ "min": 3 }))));
    assert!(!min_length.validate(&json!("ab"), &data(json!({ "min": 3 }))));

    let max_length = registry.validator("max_length").unwrap();
    assert!(max_length.validate(&json!("ab"), &data(json!({ "max": 3 }))));
    assert!(!max_length.validate(&json!("abcd"), &data(json!({ "max": 3 }))));

    let min = registry.validator("min").unwrap();
    assert!(min.validate(&json!(5), &data(json!({ "min": 5 }))));
    assert!(min.validate(&json!("10"), &data(json!({ "min": 5 }))));
    assert!(!min.validate(&json!(4), &data(json!({ "min": 5 }))));

    let max = registry.validator("max").unwrap();
    assert!(max.validate(&json!(5), &data(json!({ "max": 5 }))));
    assert!(!max.validate(&json!(6), &data(json!({ "max": 5 }))));
}

#[test]
fn test_builtin_pattern_rule() {
    let registry = Registry::new();
    let pattern = registry.validator("pattern").unwrap();
    let params = data(json!({ "pattern": "^[a-z]+$" }));
    assert!(pattern.validate(&json!("abc"), &params));
    assert!(!pattern.validate(&json!("Abc"), &params));
    // Unparseable patterns fail closed.
    assert!(!pattern.validate(&json!("abc"), &data(json!({ "pattern": "[" }))));
}
