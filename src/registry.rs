//! # Registry Module
//!
//! Identifier → implementation resolution for controllers, middleware, and
//! validators.
//!
//! Route tables refer to implementations by name; the registry maps those
//! names to factories (controllers, validators — a fresh instance per
//! resolution) or shared instances (middleware). An optional [`Container`]
//! can take precedence for controllers and middleware; when it declines,
//! resolution falls back to the registry. An identifier neither can
//! resolve is a configuration error for that request, surfaced as a
//! [`DispatchError`](crate::error::DispatchError), never silently skipped.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

use crate::dispatcher::Response;
use crate::middleware::Middleware;
use crate::router::ParamVec;
use crate::validation::rules::{Max, MaxLength, Min, MinLength, Pattern, Required};
use crate::validation::Validator;

/// A handler implementation resolved from a route's controller identifier.
///
/// The dispatcher injects the (possibly middleware-mutated) request data,
/// sets the declared template when there is one (`set_template` defaults to
/// a no-op for controllers without template support), then invokes the
/// named action with the extracted path variables.
pub trait Controller: Send {
    fn inject(&mut self, data: Map<String, Value>);

    fn set_template(&mut self, _template: &str) {}

    fn call(&mut self, action: &str, vars: &ParamVec) -> anyhow::Result<Response>;
}

/// Optional external resolver consulted before the registry.
pub trait Container: Send + Sync {
    fn controller(&self, name: &str) -> Option<Box<dyn Controller>> {
        let _ = name;
        None
    }

    fn middleware(&self, name: &str) -> Option<Arc<dyn Middleware>> {
        let _ = name;
        None
    }
}

pub type ControllerFactory = Box<dyn Fn() -> Box<dyn Controller> + Send + Sync>;
pub type ValidatorFactory = Box<dyn Fn() -> Box<dyn Validator> + Send + Sync>;

/// Identifier → factory/instance tables for everything a route table can
/// name.
///
/// `new()` pre-registers the built-in validators; `empty()` starts bare.
/// Validator factories are invoked per validation rule evaluation — no
/// instance caching.
pub struct Registry {
    controllers: HashMap<String, ControllerFactory>,
    middlewares: HashMap<String, Arc<dyn Middleware>>,
    validators: HashMap<String, ValidatorFactory>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// A registry with the built-in validators pre-registered.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_validator("required", || Box::new(Required));
        registry.register_validator("min_length", || Box::new(MinLength));
        registry.register_validator("max_length", || Box::new(MaxLength));
        registry.register_validator("min", || Box::new(Min));
        registry.register_validator("max", || Box::new(Max));
        registry.register_validator("pattern", || Box::new(Pattern));
        registry
    }

    /// A registry with nothing registered, not even the built-in validators.
    #[must_use]
    pub fn empty() -> Self {
        Registry {
            controllers: HashMap::new(),
            middlewares: HashMap::new(),
            validators: HashMap::new(),
        }
    }

    pub fn register_controller<F>(&mut self, name: &str, factory: F)
    where
        F: Fn() -> Box<dyn Controller> + Send + Sync + 'static,
    {
        self.controllers.insert(name.to_string(), Box::new(factory));
    }

    pub fn register_middleware(&mut self, name: &str, middleware: Arc<dyn Middleware>) {
        self.middlewares.insert(name.to_string(), middleware);
    }

    pub fn register_validator<F>(&mut self, name: &str, factory: F)
    where
        F: Fn() -> Box<dyn Validator> + Send + Sync + 'static,
    {
        self.validators.insert(name.to_string(), Box::new(factory));
    }

    /// Construct a fresh controller for the identifier.
    #[must_use]
    pub fn controller(&self, name: &str) -> Option<Box<dyn Controller>> {
        self.controllers.get(name).map(|factory| factory())
    }

    #[must_use]
    pub fn middleware(&self, name: &str) -> Option<Arc<dyn Middleware>> {
        self.middlewares.get(name).map(Arc::clone)
    }

    /// Construct a fresh validator for the identifier.
    #[must_use]
    pub fn validator(&self, name: &str) -> Option<Box<dyn Validator>> {
        self.validators.get(name).map(|factory| factory())
    }
}
