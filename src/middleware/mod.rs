//! # Middleware Module
//!
//! Per-route, ordered pre-processing steps with abort/mutate/continue
//! semantics.
//!
//! A route declares middleware by identifier; the dispatcher resolves each
//! identifier (container first, then registry) and invokes
//! [`Middleware::handle`] in declared order. A middleware can let the
//! request pass unchanged, merge extra fields into the request data for
//! every later stage, or abort the chain — which ends the request with
//! `{403, "Forbidden by middleware"}`.

mod core;
mod defaults;
mod tracing;

pub use core::{Middleware, MiddlewareResult};
pub use defaults::DefaultsMiddleware;
pub use self::tracing::TracingMiddleware;
