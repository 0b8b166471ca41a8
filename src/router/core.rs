//! Static route table - fallback routing for paths no mapping provider claims.

use crate::context::RequestContext;
use crate::handler::Handler;
use crate::middleware::PathExposingMiddleware;
use http::Method;
use regex::Regex;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use super::mapping::{ExecutionChain, HandlerMapping};

/// Maximum number of path/query parameters before heap allocation.
/// Most REST APIs have ≤4 path params (e.g., /users/{id}/posts/{postId}).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the hot path.
///
/// Param names use `Arc<str>` because they come from the route table (known at
/// startup); values are per-request data from the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

struct StaticRoute {
    method: Method,
    pattern: Arc<str>,
    regex: Regex,
    param_names: Vec<Arc<str>>,
    handler: Arc<dyn Handler>,
}

/// Result of successfully matching a request path to a static route
#[derive(Clone)]
pub struct RouteMatch {
    /// Handler registered for the route
    pub handler: Arc<dyn Handler>,
    /// Pattern the route was declared with (e.g. `/pets/{id}`)
    pub pattern: Arc<str>,
    /// Path parameters extracted from the URL (e.g., `{id}` → `{"id": "123"}`)
    pub path_params: ParamVec,
}

impl RouteMatch {
    /// Get a path parameter by name ("last write wins" for duplicate names)
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Debug for RouteMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("handler", &self.handler.name())
            .field("pattern", &self.pattern)
            .field("path_params", &self.path_params)
            .finish()
    }
}

/// Ordered table of `(method, pattern) → handler` routes.
///
/// Routes are tested in registration order; the first match wins.
#[derive(Default)]
pub struct Router {
    routes: Vec<StaticRoute>,
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route.
    ///
    /// `pattern` segments of the form `{name}` match one non-empty path segment and
    /// are captured as path parameter `name`; every other segment matches literally.
    ///
    /// # Errors
    ///
    /// Returns the regex compilation error if the pattern cannot be compiled.
    pub fn add_route(
        &mut self,
        method: Method,
        pattern: &str,
        handler: Arc<dyn Handler>,
    ) -> Result<(), regex::Error> {
        let (regex, param_names) = Self::path_to_regex(pattern)?;
        info!(
            method = %method,
            pattern = %pattern,
            handler_name = %handler.name(),
            "Static route registered"
        );
        self.routes.push(StaticRoute {
            method,
            pattern: Arc::from(pattern),
            regex,
            param_names: param_names.into_iter().map(Arc::from).collect(),
            handler,
        });
        Ok(())
    }

    /// Match a request against the table.
    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        debug!(method = %method, path = %path, "Route match attempt");

        for route in self.routes.iter().filter(|r| r.method == *method) {
            let Some(captures) = route.regex.captures(path) else {
                continue;
            };
            let path_params: ParamVec = route
                .param_names
                .iter()
                .zip(captures.iter().skip(1))
                .filter_map(|(name, m)| m.map(|m| (Arc::clone(name), m.as_str().to_string())))
                .collect();

            debug!(
                method = %method,
                path = %path,
                handler_name = %route.handler.name(),
                route_pattern = %route.pattern,
                path_params = ?path_params,
                "Route matched"
            );

            return Some(RouteMatch {
                handler: Arc::clone(&route.handler),
                pattern: Arc::clone(&route.pattern),
                path_params,
            });
        }

        debug!(method = %method, path = %path, "No static route matched");
        None
    }

    /// Registered routes as `(method, pattern, handler name)`, in match order.
    #[must_use]
    pub fn routes(&self) -> Vec<(Method, String, String)> {
        self.routes
            .iter()
            .map(|r| (r.method.clone(), r.pattern.to_string(), r.handler.name().to_string()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Convert a route pattern to an anchored regex and its ordered parameter names
    ///
    /// `/users/{id}/posts` becomes `^/users/([^/]+)/posts$` with params `["id"]`.
    pub(crate) fn path_to_regex(path: &str) -> Result<(Regex, Vec<String>), regex::Error> {
        if path == "/" {
            return Ok((Regex::new(r"^/$")?, Vec::new()));
        }

        let mut pattern = String::with_capacity(path.len() + 5);
        pattern.push('^');
        let mut param_names = Vec::with_capacity(path.matches('{').count());

        for segment in path.split('/') {
            if segment.len() > 2 && segment.starts_with('{') && segment.ends_with('}') {
                param_names.push(segment[1..segment.len() - 1].to_string());
                pattern.push_str("/([^/]+)");
            } else if !segment.is_empty() {
                pattern.push('/');
                pattern.push_str(&regex::escape(segment));
            }
        }
        if path.len() > 1 && path.ends_with('/') {
            pattern.push('/');
        }

        pattern.push('$');
        Ok((Regex::new(&pattern)?, param_names))
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router").field("routes", &self.routes()).finish()
    }
}

impl HandlerMapping for Router {
    fn lookup(&self, ctx: &RequestContext) -> anyhow::Result<Option<ExecutionChain>> {
        let path = ctx.lookup_path();
        Ok(self.route(&ctx.method, path).map(|m| {
            ExecutionChain::new(m.handler)
                .with_path_params(m.path_params)
                .with_interceptor(Arc::new(PathExposingMiddleware::new(m.pattern.as_ref(), path)))
        }))
    }

    fn name(&self) -> &str {
        "static_router"
    }
}
