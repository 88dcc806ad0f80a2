//! # Route Table Module
//!
//! Declarative route definitions and their compilation into immutable
//! [`RouteMeta`] handler descriptors.
//!
//! A route table maps a group prefix to an ordered list of route
//! definitions. Compilation normalizes methods to uppercase, joins prefixes
//! with member paths exactly once, and freezes every descriptor: after
//! [`build_routes`] returns, the metadata is read-only for the lifetime of
//! the dispatcher and safe for unsynchronized concurrent reads.

mod build;
mod load;
mod types;

pub use build::build_routes;
pub use load::load_routes;
pub use types::{FieldRules, RouteDef, RouteMeta, RouteTable, RuleSpec};
