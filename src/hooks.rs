//! # Event Bus Module
//!
//! Named lifecycle hooks with ordered listener lists and short-circuit
//! fan-out.
//!
//! The dispatcher fires a hook at each fixed pipeline stage; zero or more
//! listeners observe it in registration order. A listener can veto the
//! stage by returning [`HookOutcome::Abort`] (later listeners are skipped),
//! supply a replacement payload with [`HookOutcome::Value`], or stay silent
//! with [`HookOutcome::Continue`]. When several listeners supply values,
//! the last one wins.
//!
//! Events carry typed payloads ([`HookEvent`]) rather than positional
//! argument lists, so listener signatures are statically checkable.
//!
//! Listener registration is append-only and not synchronized against
//! concurrent `fire` calls: register everything before the dispatcher is
//! exposed to traffic.

use crate::dispatcher::Response;
use crate::router::ParamVec;
use crate::routes::RouteMeta;
use http::Method;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// The fixed pipeline extension points, in firing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    /// `route.dispatch` — fired at dispatch entry, observation only.
    Dispatch,
    /// `route.notFound` — fired when no route matches; a supplied value
    /// becomes the response verbatim.
    NotFound,
    /// `route.matched` — fired after a successful match, observation only
    /// unless the matched-veto switch is on.
    Matched,
    /// `route.middleware` — fired before each middleware, observation only.
    Middleware,
    /// `route.before` — fired before invocation; may veto or replace the
    /// pipeline outcome.
    Before,
    /// `route.after` — fired on the success path; a supplied value replaces
    /// the response.
    After,
    /// `route.error` — fired on invocation failure; a supplied value
    /// replaces the 500 response.
    Error,
}

impl Hook {
    /// The wire-visible hook name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Hook::Dispatch => "route.dispatch",
            Hook::NotFound => "route.notFound",
            Hook::Matched => "route.matched",
            Hook::Middleware => "route.middleware",
            Hook::Before => "route.before",
            Hook::After => "route.after",
            Hook::Error => "route.error",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed payloads for each hook, borrowed from the in-flight dispatch.
pub enum HookEvent<'a> {
    Dispatch {
        method: &'a Method,
        path: &'a str,
        data: &'a Map<String, Value>,
    },
    NotFound {
        path: &'a str,
    },
    Matched {
        route: &'a RouteMeta,
        vars: &'a ParamVec,
        path: &'a str,
    },
    Middleware {
        name: &'a str,
        route: &'a RouteMeta,
        vars: &'a ParamVec,
        data: &'a Map<String, Value>,
    },
    Before {
        route: &'a RouteMeta,
        vars: &'a ParamVec,
        data: &'a Map<String, Value>,
    },
    After {
        response: &'a Response,
        route: &'a RouteMeta,
        vars: &'a ParamVec,
    },
    Error {
        error: &'a anyhow::Error,
        route: &'a RouteMeta,
        vars: &'a ParamVec,
    },
}

impl HookEvent<'_> {
    /// The hook this event belongs to.
    #[must_use]
    pub fn hook(&self) -> Hook {
        match self {
            HookEvent::Dispatch { .. } => Hook::Dispatch,
            HookEvent::NotFound { .. } => Hook::NotFound,
            HookEvent::Matched { .. } => Hook::Matched,
            HookEvent::Middleware { .. } => Hook::Middleware,
            HookEvent::Before { .. } => Hook::Before,
            HookEvent::After { .. } => Hook::After,
            HookEvent::Error { .. } => Hook::Error,
        }
    }
}

/// What a listener told the bus.
#[derive(Debug, Clone, PartialEq)]
pub enum HookOutcome {
    /// No opinion; the next listener runs and the stage proceeds.
    Continue,
    /// Veto: stop fan-out immediately and report the abort to the caller.
    Abort,
    /// A replacement payload; tracked last-wins across listeners.
    Value(Value),
}

impl HookOutcome {
    /// Extract the replacement value, if any.
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        match self {
            HookOutcome::Value(v) => Some(v),
            _ => None,
        }
    }
}

/// A registered hook listener.
pub type Listener = Box<dyn Fn(&HookEvent<'_>) -> HookOutcome + Send + Sync>;

/// Ordered listener lists per hook.
///
/// Registrations accumulate for the lifetime of the bus and are never
/// removed or reordered; registering the same listener twice calls it
/// twice.
#[derive(Default)]
pub struct HookBus {
    listeners: HashMap<Hook, Vec<Listener>>,
}

impl HookBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener to the hook's ordered list.
    pub fn on<F>(&mut self, hook: Hook, listener: F)
    where
        F: Fn(&HookEvent<'_>) -> HookOutcome + Send + Sync + 'static,
    {
        self.listeners.entry(hook).or_default().push(Box::new(listener));
    }

    /// Number of listeners registered for a hook.
    #[must_use]
    pub fn listener_count(&self, hook: Hook) -> usize {
        self.listeners.get(&hook).map_or(0, Vec::len)
    }

    /// Fire an event: call each listener in registration order.
    ///
    /// Stops at the first [`HookOutcome::Abort`]. Otherwise returns the
    /// last non-null value seen, or [`HookOutcome::Continue`] when no
    /// listener had an opinion. Firing a hook with no listeners is a no-op.
    #[must_use]
    pub fn fire(&self, event: &HookEvent<'_>) -> HookOutcome {
        let hook = event.hook();
        let Some(listeners) = self.listeners.get(&hook) else {
            return HookOutcome::Continue;
        };

        let mut last = HookOutcome::Continue;
        for (idx, listener) in listeners.iter().enumerate() {
            match listener(event) {
                HookOutcome::Abort => {
                    debug!(hook = %hook, listener_idx = idx, "Listener aborted event");
                    return HookOutcome::Abort;
                }
                HookOutcome::Value(v) => last = HookOutcome::Value(v),
                HookOutcome::Continue => {}
            }
        }
        last
    }
}
