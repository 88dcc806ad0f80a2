//! Dispatcher core module - hot path for request dispatch.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::error::DispatchError;
use crate::hooks::{Hook, HookBus, HookEvent, HookOutcome};
use crate::ids::RequestId;
use crate::middleware::MiddlewareResult;
use crate::registry::{Container, Registry};
use crate::router::{MatchOutcome, ParamVec, RouteMatch, Router};
use crate::routes::RouteMeta;
use crate::runtime_config::DispatchConfig;
use crate::session::SessionContext;
use crate::validation;
use http::Method;

fn default_code() -> u16 {
    200
}

/// The uniform result shape for every dispatch outcome.
///
/// `code` follows conventional HTTP status semantics (404, 405, 403, 500),
/// `message` is human-readable, `detail` carries diagnostic context
/// (allowed methods, error messages), and `payload` holds arbitrary
/// handler-defined fields, flattened on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default = "default_code")]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(flatten, skip_serializing_if = "Map::is_empty")]
    pub payload: Map<String, Value>,
}

impl Response {
    #[must_use]
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Response {
            code,
            message: message.into(),
            detail: None,
            payload: Map::new(),
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Add a handler-defined payload field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.payload.insert(key.into(), value);
        self
    }

    /// Convert a hook-supplied JSON value into a response, verbatim.
    ///
    /// Objects map onto the response shape (a missing `code` defaults to
    /// 200, unknown keys land in the payload); a non-object value becomes
    /// the `body` payload field of a 200.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        if value.is_object() {
            serde_json::from_value(value).unwrap_or_else(|_| Response::new(200, "OK"))
        } else {
            Response::new(200, "OK").with_field("body", value)
        }
    }
}

/// Terminal state of one dispatch call.
///
/// The two hard-stop lifecycle exits are distinct variants rather than
/// response values: no further pipeline stages ran, and the side effects
/// (session error storage, redirect) have already happened. With
/// [`DispatchConfig::structured_halts`] they are folded into plain
/// [`Response`]s instead.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Response(Response),
    /// Hard stop: the route is not public and the caller is not
    /// authenticated.
    Unauthenticated,
    /// Hard stop: validation failed; errors and the submitted data were
    /// stored in the session and a redirect to `location` was issued.
    ValidationRedirect { location: String },
}

impl DispatchOutcome {
    /// Fold the hard-stop variants into structured responses.
    #[must_use]
    pub fn into_response(self) -> Response {
        match self {
            DispatchOutcome::Response(resp) => resp,
            DispatchOutcome::Unauthenticated => Response::new(401, "Not authenticated"),
            DispatchOutcome::ValidationRedirect { location } => {
                Response::new(303, "See Other").with_detail(location)
            }
        }
    }

    #[must_use]
    pub fn as_response(&self) -> Option<&Response> {
        match self {
            DispatchOutcome::Response(resp) => Some(resp),
            _ => None,
        }
    }
}

/// Orchestrates the request lifecycle.
///
/// `dispatch` is the single entry point: it owns the full pipeline —
/// matcher, hooks, authentication gate, validation, middleware chain,
/// controller invocation — and normalizes every outcome into a
/// [`DispatchOutcome`]. One instance is expected to be shared across many
/// concurrent dispatch calls; the route table and descriptors are immutable
/// after construction, and all per-request state lives on the call stack.
///
/// Hook listener registration is construction-time only: register
/// everything before the dispatcher is exposed to concurrent traffic.
pub struct Dispatcher {
    router: Router,
    registry: Registry,
    container: Option<Arc<dyn Container>>,
    session: Arc<dyn SessionContext>,
    hooks: HookBus,
    config: DispatchConfig,
}

impl Dispatcher {
    #[must_use]
    pub fn new(router: Router, registry: Registry, session: Arc<dyn SessionContext>) -> Self {
        Dispatcher {
            router,
            registry,
            container: None,
            session,
            hooks: HookBus::new(),
            config: DispatchConfig::default(),
        }
    }

    /// Attach an external container, consulted before the registry when
    /// resolving controllers and middleware.
    #[must_use]
    pub fn with_container(mut self, container: Arc<dyn Container>) -> Self {
        self.container = Some(container);
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a hook listener. Listeners accumulate for the lifetime of
    /// the dispatcher and fire in registration order.
    pub fn on<F>(&mut self, hook: Hook, listener: F)
    where
        F: Fn(&HookEvent<'_>) -> HookOutcome + Send + Sync + 'static,
    {
        self.hooks.on(hook, listener);
    }

    #[must_use]
    pub fn hooks(&self) -> &HookBus {
        &self.hooks
    }

    /// Dispatch a request through the full pipeline.
    ///
    /// `path` may include a query string, which is discarded; the remainder
    /// is percent-decoded before matching. Exactly one terminal state is
    /// reached per call. The only error this returns is a configuration
    /// error — an identifier in the route table that neither the container
    /// nor the registry can resolve; every runtime failure is normalized
    /// into the returned outcome.
    pub fn dispatch(
        &self,
        method: &str,
        path: &str,
        data: Map<String, Value>,
    ) -> Result<DispatchOutcome, DispatchError> {
        let request_id = RequestId::new();
        let raw_path = path.split('?').next().unwrap_or(path);
        let path = match urlencoding::decode(raw_path) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => raw_path.to_string(),
        };
        let Ok(method) = Method::from_bytes(method.to_ascii_uppercase().as_bytes()) else {
            warn!(request_id = %request_id, method = %method, "Unparseable request method");
            return Ok(self.not_found(&path));
        };

        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            data_fields = data.len(),
            "Dispatch entry"
        );
        // Observation only: the dispatch hook cannot gate the request.
        let _ = self.hooks.fire(&HookEvent::Dispatch {
            method: &method,
            path: &path,
            data: &data,
        });

        let matched = match self.router.route(&method, &path) {
            MatchOutcome::Found(matched) => matched,
            MatchOutcome::NotFound => return Ok(self.not_found(&path)),
            MatchOutcome::MethodNotAllowed { allowed } => {
                let allowed = allowed
                    .iter()
                    .map(Method::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                return Ok(DispatchOutcome::Response(
                    Response::new(405, "Method not allowed")
                        .with_detail(format!("Allowed methods: {allowed}")),
                ));
            }
        };
        let route = &matched.route;
        let vars = &matched.path_params;

        let matched_outcome = self.hooks.fire(&HookEvent::Matched {
            route,
            vars,
            path: &path,
        });
        // The matched hook is observation-only by default; route.before is
        // the gating hook. The veto switch is an explicit opt-in.
        if self.config.matched_veto && matched_outcome == HookOutcome::Abort {
            return Ok(DispatchOutcome::Response(Response::new(
                403,
                "Forbidden by matched event",
            )));
        }

        if !route.is_public && !self.session.is_authenticated() {
            warn!(
                request_id = %request_id,
                path = %path,
                controller = %route.controller,
                "Unauthenticated request to non-public route"
            );
            return Ok(if self.config.structured_halts {
                DispatchOutcome::Response(Response::new(401, "Not authenticated"))
            } else {
                DispatchOutcome::Unauthenticated
            });
        }

        // Accepted fields and rules are only consulted for non-empty data.
        if !data.is_empty() && !route.validations.is_empty() {
            let errors =
                validation::validate(&route.accept, &route.validations, &data, &self.registry)?;
            if !errors.is_empty() {
                info!(
                    request_id = %request_id,
                    error_fields = errors.len(),
                    "Validation failed"
                );
                let location = self.session.referrer();
                self.session.store_validation_errors(errors, data);
                self.session.redirect(&location);
                return Ok(if self.config.structured_halts {
                    DispatchOutcome::Response(Response::new(303, "See Other").with_detail(location))
                } else {
                    DispatchOutcome::ValidationRedirect { location }
                });
            }
        }

        let data = match self.run_middleware(&matched, data, &request_id)? {
            ChainOutcome::Data(data) => data,
            ChainOutcome::Forbidden => {
                return Ok(DispatchOutcome::Response(Response::new(
                    403,
                    "Forbidden by middleware",
                )));
            }
        };

        match self.hooks.fire(&HookEvent::Before { route, vars, data: &data }) {
            HookOutcome::Abort => {
                return Ok(DispatchOutcome::Response(Response::new(
                    403,
                    "Forbidden by before event",
                )));
            }
            // A before listener may fully replace the pipeline outcome.
            HookOutcome::Value(value) => {
                return Ok(DispatchOutcome::Response(Response::from_value(value)));
            }
            HookOutcome::Continue => {}
        }

        Ok(DispatchOutcome::Response(self.invoke(
            route,
            vars,
            data,
            &request_id,
        )?))
    }

    /// Resolve the not-found terminal state, giving `route.notFound`
    /// listeners the chance to supply the response verbatim.
    fn not_found(&self, path: &str) -> DispatchOutcome {
        match self.hooks.fire(&HookEvent::NotFound { path }) {
            HookOutcome::Value(value) => DispatchOutcome::Response(Response::from_value(value)),
            _ => DispatchOutcome::Response(Response::new(404, "Not found!")),
        }
    }

    /// Run the matched route's middleware chain in declared order.
    fn run_middleware(
        &self,
        matched: &RouteMatch,
        mut data: Map<String, Value>,
        request_id: &RequestId,
    ) -> Result<ChainOutcome, DispatchError> {
        let route = &matched.route;
        for name in &route.middlewares {
            // Observation only: the middleware hook does not gate.
            let _ = self.hooks.fire(&HookEvent::Middleware {
                name,
                route,
                vars: &matched.path_params,
                data: &data,
            });

            let middleware = self
                .container
                .as_ref()
                .and_then(|c| c.middleware(name))
                .or_else(|| self.registry.middleware(name))
                .ok_or_else(|| DispatchError::UnknownMiddleware(name.clone()))?;

            match middleware.handle(route, &matched.path_params, &data) {
                MiddlewareResult::Abort => {
                    info!(
                        request_id = %request_id,
                        middleware = %name,
                        "Middleware aborted chain"
                    );
                    return Ok(ChainOutcome::Forbidden);
                }
                MiddlewareResult::Merge(extra) => {
                    debug!(
                        request_id = %request_id,
                        middleware = %name,
                        merged_fields = extra.len(),
                        "Middleware merged request data"
                    );
                    for (key, value) in extra {
                        data.insert(key, value);
                    }
                }
                MiddlewareResult::Continue => {}
            }
        }
        Ok(ChainOutcome::Data(data))
    }

    /// Resolve the controller and invoke the action, normalizing failures
    /// through the `route.after`/`route.error` hooks.
    fn invoke(
        &self,
        route: &RouteMeta,
        vars: &ParamVec,
        data: Map<String, Value>,
        request_id: &RequestId,
    ) -> Result<Response, DispatchError> {
        let mut controller = self
            .container
            .as_ref()
            .and_then(|c| c.controller(&route.controller))
            .or_else(|| self.registry.controller(&route.controller))
            .ok_or_else(|| DispatchError::UnknownController(route.controller.clone()))?;

        controller.inject(data);
        if let Some(template) = &route.template {
            controller.set_template(template);
        }

        debug!(
            request_id = %request_id,
            controller = %route.controller,
            action = %route.action,
            "Invoking controller action"
        );
        let result = catch_unwind(AssertUnwindSafe(|| controller.call(&route.action, vars)))
            .unwrap_or_else(|panic| {
                error!(
                    request_id = %request_id,
                    controller = %route.controller,
                    action = %route.action,
                    "Controller panicked"
                );
                Err(anyhow::anyhow!("controller panicked: {panic:?}"))
            });

        match result {
            Ok(mut response) => {
                if let HookOutcome::Value(value) =
                    self.hooks.fire(&HookEvent::After { response: &response, route, vars })
                {
                    response = Response::from_value(value);
                }
                info!(
                    request_id = %request_id,
                    code = response.code,
                    "Dispatch complete"
                );
                Ok(response)
            }
            Err(err) => {
                error!(
                    request_id = %request_id,
                    controller = %route.controller,
                    action = %route.action,
                    error = %err,
                    "Controller action failed"
                );
                let response = match self.hooks.fire(&HookEvent::Error { error: &err, route, vars })
                {
                    HookOutcome::Value(value) => Response::from_value(value),
                    _ => Response::new(500, "Internal Server Error").with_detail(err.to_string()),
                };
                Ok(response)
            }
        }
    }
}

enum ChainOutcome {
    Data(Map<String, Value>),
    Forbidden,
}
