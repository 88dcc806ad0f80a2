use http::Method;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A declarative route table: group prefix → ordered route definitions.
///
/// The full URI of each route is the group prefix concatenated with the
/// route's `uri`; a prefix of `"/"` is a special case and is not
/// duplicated.
pub type RouteTable = BTreeMap<String, Vec<RouteDef>>;

/// One route definition as written in a route-table file.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteDef {
    pub method: String,
    pub uri: String,
    pub controller: String,
    pub action: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub template: Option<String>,
    /// Fields accepted for validation, in declared order.
    #[serde(default)]
    pub accept: Vec<String>,
    /// Field → ordered validation rules.
    #[serde(default)]
    pub validations: BTreeMap<String, Vec<RuleSpec>>,
    /// Middleware identifiers, executed strictly in declared order.
    #[serde(default)]
    pub middlewares: Vec<String>,
}

/// One validation rule: the validator to construct, its parameters, and
/// the message template used when it fails.
///
/// Message templates substitute `{{key}}` tokens with the string form of
/// `params[key]`; unmatched tokens are left verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RuleSpec {
    pub validator: String,
    #[serde(default)]
    pub params: Map<String, Value>,
    pub message: String,
}

/// Ordered validation rules for a single field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRules {
    pub field: String,
    pub rules: Vec<RuleSpec>,
}

/// The resolved, immutable handler descriptor for a registered route.
///
/// Built once at route-table compilation and read-only for the lifetime of
/// the dispatcher; safe for unsynchronized concurrent reads.
#[derive(Debug, Clone)]
pub struct RouteMeta {
    /// HTTP method, case-normalized to uppercase at registration.
    pub method: Method,
    /// Full path pattern including the group prefix (e.g. `/users/{id}`).
    pub path_pattern: String,
    /// Controller identifier, resolved via the container or registry.
    pub controller: String,
    /// Action identifier invoked on the resolved controller.
    pub action: String,
    /// Public routes bypass the authentication gate.
    pub is_public: bool,
    /// Template name handed to the controller when it supports one.
    pub template: Option<String>,
    /// Fields consulted by the validation engine, in declared order.
    pub accept: Vec<String>,
    /// Per-field validation rules.
    pub validations: Vec<FieldRules>,
    /// Middleware identifiers, executed in declared order.
    pub middlewares: Vec<String>,
}

impl RouteMeta {
    /// Look up the validation rules declared for a field.
    #[must_use]
    pub fn rules_for(&self, field: &str) -> Option<&[RuleSpec]> {
        self.validations
            .iter()
            .find(|fr| fr.field == field)
            .map(|fr| fr.rules.as_slice())
    }
}
