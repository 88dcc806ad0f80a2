//! # Validation Module
//!
//! Per-field rule evaluation producing a field → message error map.
//!
//! Only fields listed in a route's `accept` list are consulted. Rules for
//! a field run in declared order and the first failure wins: its message
//! template is rendered (with `{{key}}` parameter substitution) and no
//! further rules run for that field. Validators are constructed per
//! invocation through their registered factories and must be pure.

mod engine;
pub mod rules;

pub use engine::{render_message, validate};

use serde_json::{Map, Value};

/// A single validation rule implementation.
///
/// Validators are pure: they must not mutate request data or raise side
/// effects.
pub trait Validator: Send + Sync {
    fn validate(&self, value: &Value, params: &Map<String, Value>) -> bool;
}
