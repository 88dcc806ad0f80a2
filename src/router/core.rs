use crate::routes::RouteMeta;
use http::Method;
use regex::Regex;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Maximum number of path variables before heap allocation.
/// Most route patterns have ≤4 variables (e.g. `/users/{id}/posts/{post}`).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated path-variable storage for the dispatch hot path.
///
/// Variable names use `Arc<str>` instead of `String` because they come from
/// the static route table (known at startup) and `Arc::clone()` is an O(1)
/// atomic increment. Values remain `String` as they are per-request data
/// extracted from the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Result of successfully matching a request method+path to a route.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route descriptor (Arc to avoid expensive clones).
    pub route: Arc<RouteMeta>,
    /// Path variables extracted from the URL (e.g. `{id}` → `("id", "123")`).
    pub path_params: ParamVec,
}

impl RouteMatch {
    /// Get a path variable by name.
    ///
    /// Uses "last write wins" semantics: if duplicate variable names exist
    /// at different path depths, returns the last occurrence.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Convert path variables to a HashMap.
    /// Note: this allocates — use `get_path_param()` in hot paths.
    #[must_use]
    pub fn path_params_map(&self) -> HashMap<String, String> {
        self.path_params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// Outcome of a match attempt.
#[derive(Debug, Clone)]
pub enum MatchOutcome {
    /// A route matched the method and path.
    Found(RouteMatch),
    /// No registered pattern matched the path.
    NotFound,
    /// At least one pattern matched the path, but under other methods.
    MethodNotAllowed {
        /// Methods registered for the matching patterns, declaration order,
        /// deduplicated.
        allowed: Vec<Method>,
    },
}

/// Matches incoming requests against the compiled route table.
///
/// Path patterns like `/users/{id}` are compiled into regexes at
/// construction; matching walks the table in declaration order, so the
/// first route whose pattern and method both match wins.
#[derive(Clone)]
pub struct Router {
    routes: Vec<(Method, Regex, Arc<RouteMeta>, Vec<Arc<str>>)>,
}

impl Router {
    /// Compile a router from route metadata.
    #[must_use]
    pub fn new(routes: Vec<RouteMeta>) -> Self {
        let routes: Vec<_> = routes
            .into_iter()
            .map(|route| {
                let (regex, param_names) = Self::path_to_regex(&route.path_pattern);
                let method = route.method.clone();
                (method, regex, Arc::new(route), param_names)
            })
            .collect();

        info!(routes_count = routes.len(), "Routing table compiled");
        Self { routes }
    }

    /// Match a request to a route.
    ///
    /// Returns [`MatchOutcome::Found`] with the descriptor and extracted
    /// path variables, [`MatchOutcome::MethodNotAllowed`] when the path is
    /// registered under other methods only, and [`MatchOutcome::NotFound`]
    /// otherwise.
    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> MatchOutcome {
        debug!(method = %method, path = %path, "Route match attempt");

        let mut allowed: Vec<Method> = Vec::new();
        for (route_method, regex, meta, param_names) in &self.routes {
            let Some(caps) = regex.captures(path) else {
                continue;
            };
            if route_method != method {
                if !allowed.contains(route_method) {
                    allowed.push(route_method.clone());
                }
                continue;
            }

            let mut params = ParamVec::new();
            for (idx, name) in param_names.iter().enumerate() {
                if let Some(value) = caps.get(idx + 1) {
                    params.push((Arc::clone(name), value.as_str().to_string()));
                }
            }
            debug!(
                method = %method,
                path = %path,
                route_pattern = %meta.path_pattern,
                path_params = ?params,
                "Route matched"
            );
            return MatchOutcome::Found(RouteMatch {
                route: Arc::clone(meta),
                path_params: params,
            });
        }

        if allowed.is_empty() {
            warn!(method = %method, path = %path, "No route matched");
            MatchOutcome::NotFound
        } else {
            warn!(
                method = %method,
                path = %path,
                allowed = ?allowed,
                "Path matched under other methods"
            );
            MatchOutcome::MethodNotAllowed { allowed }
        }
    }

    /// Number of compiled routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Convert a path pattern to a regex and extract variable names.
    ///
    /// Transforms patterns like `/users/{id}` into `^/users/([^/]+)$` with
    /// variable names `["id"]`.
    pub(crate) fn path_to_regex(path: &str) -> (Regex, Vec<Arc<str>>) {
        if path == "/" {
            return (
                Regex::new(r"^/$").expect("Failed to compile path regex"),
                Vec::new(),
            );
        }

        let mut pattern = String::with_capacity(path.len() + 5);
        pattern.push('^');
        let mut param_names = Vec::with_capacity(path.matches('{').count());

        for segment in path.split('/') {
            if segment.starts_with('{') && segment.ends_with('}') {
                let param_name = segment.trim_start_matches('{').trim_end_matches('}');
                pattern.push_str("/([^/]+)");
                param_names.push(Arc::from(param_name));
            } else if !segment.is_empty() {
                pattern.push('/');
                pattern.push_str(&regex::escape(segment));
            }
        }

        pattern.push('$');
        let regex = Regex::new(&pattern).expect("Failed to compile path regex");

        (regex, param_names)
    }
}
