use serde_json::{Map, Value};

use super::{Middleware, MiddlewareResult};
use crate::router::ParamVec;
use crate::routes::RouteMeta;

/// Fills absent request-data fields with configured defaults.
///
/// Only keys missing from the incoming data are merged; fields the caller
/// supplied are never overwritten.
pub struct DefaultsMiddleware {
    defaults: Map<String, Value>,
}

impl DefaultsMiddleware {
    #[must_use]
    pub fn new(defaults: Map<String, Value>) -> Self {
        Self { defaults }
    }
}

impl Middleware for DefaultsMiddleware {
    fn handle(
        &self,
        _route: &RouteMeta,
        _vars: &ParamVec,
        data: &Map<String, Value>,
    ) -> MiddlewareResult {
        let missing: Map<String, Value> = self
            .defaults
            .iter()
            .filter(|(k, _)| !data.contains_key(*k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if missing.is_empty() {
            MiddlewareResult::Continue
        } else {
            MiddlewareResult::Merge(missing)
        }
    }
}
