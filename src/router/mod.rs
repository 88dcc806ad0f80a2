//! # Router Module
//!
//! Path matching and route resolution for the dispatch pipeline.
//!
//! Route patterns (e.g. `/pets/{id}`) are compiled to regexes at startup;
//! matching an incoming request walks the table in declaration order and
//! extracts path variables from the first pattern whose method and path
//! both match. Paths that match only under other methods produce a
//! method-not-allowed outcome carrying the allowed method set.
//!
//! The dispatcher treats this module as a black-box collaborator: it only
//! consumes the three-way [`MatchOutcome`] contract.

mod core;
#[cfg(test)]
mod tests;

pub use core::{MatchOutcome, ParamVec, RouteMatch, Router, MAX_INLINE_PARAMS};
