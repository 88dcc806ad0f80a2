use thiserror::Error;

/// Configuration failures raised while dispatching a request.
///
/// Each variant means the route table names an implementation the registry
/// (and the optional container) cannot resolve. These indicate a malformed
/// route table rather than a recoverable runtime condition, so they are
/// propagated to the caller instead of being normalized into a `Response`.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown controller `{0}` named in route table")]
    UnknownController(String),
    #[error("unknown middleware `{0}` named in route table")]
    UnknownMiddleware(String),
    #[error("unknown validator `{0}` named in route table")]
    UnknownValidator(String),
}

/// Failures raised while compiling a route table into route metadata.
#[derive(Debug, Error)]
pub enum RouteTableError {
    #[error("invalid HTTP method `{method}` for route `{uri}`")]
    InvalidMethod { method: String, uri: String },
    #[error("route `{uri}` is missing a controller identifier")]
    MissingController { uri: String },
    #[error("route `{uri}` is missing an action identifier")]
    MissingAction { uri: String },
}
