use serde_json::{Map, Value};
use tracing::debug;

use super::{Middleware, MiddlewareResult};
use crate::router::ParamVec;
use crate::routes::RouteMeta;

/// Observation-only middleware: logs each pass and always continues.
pub struct TracingMiddleware;

impl Middleware for TracingMiddleware {
    fn handle(
        &self,
        route: &RouteMeta,
        vars: &ParamVec,
        data: &Map<String, Value>,
    ) -> MiddlewareResult {
        debug!(
            controller = %route.controller,
            action = %route.action,
            path_params = ?vars,
            data_fields = data.len(),
            "Middleware pass-through"
        );
        MiddlewareResult::Continue
    }
}
