//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for the dispatch pipeline's two
//! flagged behavior switches.
//!
//! ## Environment Variables
//!
//! ### `RFLOW_STRUCTURED_HALTS`
//!
//! When set (`1`, `true`, `yes`), the two hard-stop lifecycle exits are
//! folded into ordinary structured responses instead of being returned as
//! distinct `DispatchOutcome` variants:
//!
//! - unauthenticated → `{401, "Not authenticated"}`
//! - validation failure → `{303, "See Other"}` with the redirect location
//!   in `detail`
//!
//! Default: off — the hard stops surface as
//! [`DispatchOutcome::Unauthenticated`](crate::dispatcher::DispatchOutcome)
//! and `DispatchOutcome::ValidationRedirect`, preserving the "no further
//! pipeline stages run" guarantee in the type.
//!
//! ### `RFLOW_MATCHED_VETO`
//!
//! When set, an `Abort` returned by a `route.matched` listener halts the
//! request with `{403, "Forbidden by matched event"}`. Off by default: the
//! matched hook is observation-only while `route.before` retains veto
//! power, and unifying the two is an explicit opt-in.
//!
//! ## Usage
//!
//! ```rust
//! use routeflow::runtime_config::DispatchConfig;
//!
//! let config = DispatchConfig::from_env();
//! println!("structured halts: {}", config.structured_halts);
//! ```

use std::env;

/// Pipeline behavior switches, loaded from the environment or set directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchConfig {
    /// Fold hard-stop exits into structured `Response`s (default: off).
    pub structured_halts: bool,
    /// Honor `Abort` from `route.matched` listeners (default: off).
    pub matched_veto: bool,
}

impl DispatchConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        DispatchConfig {
            structured_halts: env_flag("RFLOW_STRUCTURED_HALTS"),
            matched_veto: env_flag("RFLOW_MATCHED_VETO"),
        }
    }

    pub fn with_structured_halts(mut self, on: bool) -> Self {
        self.structured_halts = on;
        self
    }

    pub fn with_matched_veto(mut self, on: bool) -> Self {
        self.matched_veto = on;
        self
    }
}

fn env_flag(name: &str) -> bool {
    matches!(
        env::var(name).ok().as_deref(),
        Some("1") | Some("true") | Some("yes")
    )
}
