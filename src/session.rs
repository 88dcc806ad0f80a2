//! # Session Module
//!
//! The session/auth collaborator consumed by the dispatcher.
//!
//! The dispatcher reads the authentication state through this interface,
//! stores validation failures (error map plus the raw submitted data) into
//! it, and asks it to redirect to the referring location on the
//! validation-failure path. Persistence of the session state itself is out
//! of scope; hosts supply their own implementation, and [`MemorySession`]
//! covers tests and embedded use.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub trait SessionContext: Send + Sync {
    /// Whether the caller behind this session is authenticated.
    fn is_authenticated(&self) -> bool;

    /// Persist a failed validation: the field → message error map plus the
    /// raw submitted data, typically for re-rendering the form.
    fn store_validation_errors(
        &self,
        errors: BTreeMap<String, String>,
        submitted: Map<String, Value>,
    );

    /// The referring location used as the validation-redirect target.
    fn referrer(&self) -> String {
        "/".to_string()
    }

    /// Record a redirect to the given location.
    fn redirect(&self, location: &str);
}

/// In-memory session for tests and hosts without a real session store.
pub struct MemorySession {
    authenticated: AtomicBool,
    referrer: Mutex<String>,
    stored: Mutex<Option<(BTreeMap<String, String>, Map<String, Value>)>>,
    redirects: Mutex<Vec<String>>,
}

impl MemorySession {
    #[must_use]
    pub fn new() -> Self {
        MemorySession {
            authenticated: AtomicBool::new(false),
            referrer: Mutex::new("/".to_string()),
            stored: Mutex::new(None),
            redirects: Mutex::new(Vec::new()),
        }
    }

    /// A session that starts out authenticated.
    #[must_use]
    pub fn authenticated() -> Self {
        let session = Self::new();
        session.set_authenticated(true);
        session
    }

    pub fn set_authenticated(&self, on: bool) {
        self.authenticated.store(on, Ordering::SeqCst);
    }

    pub fn set_referrer(&self, location: &str) {
        *self.referrer.lock().expect("session lock poisoned") = location.to_string();
    }

    /// The last stored validation failure, if any.
    #[must_use]
    pub fn stored_errors(&self) -> Option<(BTreeMap<String, String>, Map<String, Value>)> {
        self.stored.lock().expect("session lock poisoned").clone()
    }

    /// Every redirect recorded so far, oldest first.
    #[must_use]
    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().expect("session lock poisoned").clone()
    }
}

impl Default for MemorySession {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext for MemorySession {
    fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    fn store_validation_errors(
        &self,
        errors: BTreeMap<String, String>,
        submitted: Map<String, Value>,
    ) {
        *self.stored.lock().expect("session lock poisoned") = Some((errors, submitted));
    }

    fn referrer(&self) -> String {
        self.referrer.lock().expect("session lock poisoned").clone()
    }

    fn redirect(&self, location: &str) {
        self.redirects
            .lock()
            .expect("session lock poisoned")
            .push(location.to_string());
    }
}
