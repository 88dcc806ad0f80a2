use serde_json::{Map, Value};

use crate::router::ParamVec;
use crate::routes::RouteMeta;

/// What a middleware told the chain.
#[derive(Debug, Clone, PartialEq)]
pub enum MiddlewareResult {
    /// Request data unchanged; proceed to the next middleware.
    Continue,
    /// Merge these fields into the request data (new keys added, existing
    /// keys overwritten) before continuing.
    Merge(Map<String, Value>),
    /// Stop the chain; the request is forbidden.
    Abort,
}

pub trait Middleware: Send + Sync {
    fn handle(
        &self,
        route: &RouteMeta,
        vars: &ParamVec,
        data: &Map<String, Value>,
    ) -> MiddlewareResult;
}
