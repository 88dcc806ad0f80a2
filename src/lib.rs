//! # RouteFlow
//!
//! **RouteFlow** is a declarative HTTP request-dispatch pipeline: given a
//! route table, an incoming method+path, and request data, it resolves a
//! handler, enforces the cross-cutting stages (authentication gate,
//! middleware chain, lifecycle hooks, input validation), invokes the
//! resolved controller, and normalizes the result — or the failure — into
//! a structured [`Response`].
//!
//! ## Architecture
//!
//! - **[`routes`]** - declarative route tables and their compilation into
//!   immutable handler descriptors
//! - **[`router`]** - regex-based path matching and route resolution
//! - **[`hooks`]** - named lifecycle events with ordered listeners and
//!   short-circuit fan-out
//! - **[`middleware`]** - per-route pre-processing with
//!   abort/mutate/continue semantics
//! - **[`validation`]** - per-field rule evaluation with templated error
//!   messages
//! - **[`registry`]** - identifier → factory resolution for controllers,
//!   middleware, and validators
//! - **[`session`]** - the auth/session collaborator interface
//! - **[`dispatcher`]** - the orchestrator tying the stages together
//!
//! The transport layer is deliberately absent: hosts parse requests
//! however they like and hand `dispatch` a method, a path, and a data map.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use routeflow::{
//!     build_routes, Dispatcher, DispatchOutcome, EchoController, MemorySession, Registry,
//!     Router, RouteTable,
//! };
//!
//! # fn main() -> anyhow::Result<()> {
//! let table: RouteTable = serde_json::from_value(serde_json::json!({
//!     "/": [
//!         { "method": "GET", "uri": "/pets/{id}", "controller": "pets",
//!           "action": "show", "is_public": true }
//!     ]
//! }))?;
//! let router = Router::new(build_routes(&table)?);
//!
//! let mut registry = Registry::new();
//! registry.register_controller("pets", || Box::new(EchoController::new()));
//!
//! let dispatcher = Dispatcher::new(router, registry, Arc::new(MemorySession::new()));
//! let outcome = dispatcher.dispatch("GET", "/pets/42", serde_json::Map::new())?;
//! assert!(matches!(outcome, DispatchOutcome::Response(ref r) if r.code == 200));
//! # Ok(())
//! # }
//! ```

pub mod dispatcher;
pub mod echo;
pub mod error;
pub mod hooks;
pub mod ids;
pub mod middleware;
pub mod registry;
pub mod router;
pub mod routes;
pub mod runtime_config;
pub mod session;
pub mod validation;

pub use dispatcher::{DispatchOutcome, Dispatcher, Response};
pub use echo::EchoController;
pub use error::{DispatchError, RouteTableError};
pub use hooks::{Hook, HookBus, HookEvent, HookOutcome};
pub use middleware::{Middleware, MiddlewareResult};
pub use registry::{Container, Controller, Registry};
pub use router::{MatchOutcome, ParamVec, RouteMatch, Router};
pub use routes::{build_routes, load_routes, RouteDef, RouteMeta, RouteTable, RuleSpec};
pub use runtime_config::DispatchConfig;
pub use session::{MemorySession, SessionContext};
pub use validation::Validator;
