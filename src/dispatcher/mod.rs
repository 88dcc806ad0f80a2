//! # Dispatcher Module
//!
//! The orchestrator of the request lifecycle. `dispatch(method, path,
//! data)` is the single entry point; every other component reports back
//! simple result values and only the dispatcher has cross-stage knowledge.
//!
//! ## Request Flow
//!
//! 1. Strip the query string, percent-decode the path, fire
//!    `route.dispatch` (observation only)
//! 2. Match: not-found and method-not-allowed become structured 404/405
//!    responses (`route.notFound` listeners may supply the 404 response)
//! 3. Fire `route.matched` (observation only by default)
//! 4. Authentication gate: non-public route + unauthenticated caller is a
//!    hard stop
//! 5. Validation: a non-empty error map stores errors + submitted data in
//!    the session and hard-stops with a redirect
//! 6. Middleware chain: abort → 403, merge → mutated request data
//! 7. `route.before`: may veto (403) or replace the outcome outright
//! 8. Controller invocation (container-first resolution, panic recovery)
//! 9. `route.after` may replace the success response; failures fire
//!    `route.error` and fall back to a 500
//!
//! Exactly one terminal state is reached per call; no stage is revisited.
//!
//! ## Concurrency
//!
//! Request-per-call, synchronous: a dispatch call runs to completion on
//! the calling thread. A single dispatcher (route table, descriptors,
//! listener lists — all immutable after construction) is safe to share
//! across concurrent calls; request data, path variables, and error maps
//! are per-call values.

mod core;

pub use core::{DispatchOutcome, Dispatcher, Response};
