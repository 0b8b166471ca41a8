use crate::binding::{
    ArgumentResolver, Arguments, BackingObjectArgumentResolver, BindError, PathParamArgumentResolver,
    Resolution,
};
use crate::context::{normalize_lookup_path, RequestContext};
use crate::handler::{Handler, HandlerResponse};
use crate::middleware::Middleware;
use crate::router::HandlerMapping;
use crate::runtime_config::RuntimeConfig;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Why a request could not be dispatched.
#[derive(Debug)]
pub enum DispatchError {
    /// No handler mapping produced a chain for the path.
    NoHandler { path: String },
    /// A handler mapping's collaborator failed; the error is exactly what it returned.
    Mapping(anyhow::Error),
    /// No resolver produced a value for a handler parameter.
    UnresolvableParameter {
        handler: String,
        parameter: String,
        expected: String,
    },
    /// A resolver refused to bind a parameter.
    Binding(BindError),
}

impl DispatchError {
    /// HTTP status the host reports for this error.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            DispatchError::NoHandler { .. } => 404,
            DispatchError::Mapping(_)
            | DispatchError::UnresolvableParameter { .. }
            | DispatchError::Binding(_) => 500,
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::NoHandler { path } => write!(f, "no handler for path '{path}'"),
            DispatchError::Mapping(err) => fmt::Display::fmt(err, f),
            DispatchError::UnresolvableParameter {
                handler,
                parameter,
                expected,
            } => write!(
                f,
                "could not resolve parameter '{parameter}' ({expected}) of handler '{handler}'"
            ),
            DispatchError::Binding(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::Mapping(err) => {
                let provider_error: &(dyn std::error::Error + 'static) = &**err;
                Some(provider_error)
            }
            DispatchError::Binding(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BindError> for DispatchError {
    fn from(err: BindError) -> Self {
        DispatchError::Binding(err)
    }
}

/// Host dispatch pipeline: handler mappings, middleware and argument resolvers.
#[derive(Clone, Default)]
pub struct Dispatcher {
    mappings: Vec<Arc<dyn HandlerMapping>>,
    resolvers: Vec<Arc<dyn ArgumentResolver>>,
    middlewares: Vec<Arc<dyn Middleware>>,
    mount_root: String,
}

impl Dispatcher {
    /// An empty dispatcher: no mappings, no resolvers, no middleware, no mount root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A dispatcher with the standard resolvers (backing object first, then path
    /// parameters) configured from `config`.
    #[must_use]
    pub fn from_config(config: &RuntimeConfig) -> Self {
        let mut dispatcher = Self::new().with_mount_root(&config.mount_root);
        dispatcher.add_resolver(Arc::new(BackingObjectArgumentResolver::with_policy(
            config.binding_policy,
        )));
        dispatcher.add_resolver(Arc::new(PathParamArgumentResolver));
        dispatcher
    }

    /// Prefix stripped from every raw path before lookup (e.g. `/app`).
    #[must_use]
    pub fn with_mount_root(mut self, mount_root: &str) -> Self {
        self.mount_root = mount_root.to_string();
        self
    }

    #[must_use]
    pub fn mount_root(&self) -> &str {
        &self.mount_root
    }

    /// Register a handler mapping. Mappings are kept sorted by `order()`; equal
    /// orders keep registration order.
    pub fn add_mapping(&mut self, mapping: Arc<dyn HandlerMapping>) {
        let order = mapping.order();
        let pos = self.mappings.partition_point(|m| m.order() <= order);
        info!(
            mapping = mapping.name(),
            order,
            position = pos,
            "Handler mapping registered"
        );
        self.mappings.insert(pos, mapping);
    }

    /// Register an argument resolver. Resolvers are asked in registration order.
    pub fn add_resolver(&mut self, resolver: Arc<dyn ArgumentResolver>) {
        self.resolvers.push(resolver);
    }

    /// Add middleware that runs for every dispatched request, before any
    /// chain-specific interceptor.
    pub fn add_middleware(&mut self, mw: Arc<dyn Middleware>) {
        self.middlewares.push(mw);
    }

    /// Names of the registered mappings in consultation order.
    #[must_use]
    pub fn mapping_names(&self) -> Vec<String> {
        self.mappings.iter().map(|m| m.name().to_string()).collect()
    }

    /// Dispatch a request, translating failures into HTTP error responses.
    pub fn dispatch(&self, ctx: &mut RequestContext) -> HandlerResponse {
        match self.try_dispatch(ctx) {
            Ok(response) => response,
            Err(err) => {
                let status = err.status();
                if status >= 500 {
                    error!(
                        request_id = %ctx.request_id,
                        path = %ctx.raw_path,
                        status,
                        error = %err,
                        "Dispatch failed"
                    );
                } else {
                    info!(
                        request_id = %ctx.request_id,
                        path = %ctx.raw_path,
                        status,
                        error = %err,
                        "Dispatch declined"
                    );
                }
                HandlerResponse::error(status, &err.to_string())
            }
        }
    }

    /// Dispatch a request.
    ///
    /// # Errors
    ///
    /// See [`DispatchError`]. Mapping failures are returned without modification.
    pub fn try_dispatch(&self, ctx: &mut RequestContext) -> Result<HandlerResponse, DispatchError> {
        let lookup_path = normalize_lookup_path(&ctx.raw_path, &self.mount_root).ok_or_else(|| {
            DispatchError::NoHandler {
                path: ctx.raw_path.clone(),
            }
        })?;
        ctx.set_lookup_path(lookup_path);

        let mut found = None;
        for mapping in &self.mappings {
            debug!(
                request_id = %ctx.request_id,
                mapping = mapping.name(),
                path = %ctx.lookup_path(),
                "Handler mapping lookup"
            );
            if let Some(chain) = mapping.lookup(ctx).map_err(DispatchError::Mapping)? {
                found = Some(chain);
                break;
            }
        }
        let Some(chain) = found else {
            return Err(DispatchError::NoHandler {
                path: ctx.lookup_path().to_string(),
            });
        };

        let (handler, interceptors, path_params) = chain.into_parts();
        ctx.path_params = path_params;

        // Globals first, then the chain's interceptors
        let pipeline: Vec<&Arc<dyn Middleware>> =
            self.middlewares.iter().chain(interceptors.iter()).collect();
        let start = Instant::now();
        let mut ran = 0;
        let mut early_resp = None;
        for (idx, mw) in pipeline.iter().enumerate() {
            ran = idx + 1;
            if let Some(resp) = mw.before(ctx) {
                debug!(
                    request_id = %ctx.request_id,
                    middleware_idx = idx,
                    "Middleware returned early response"
                );
                early_resp = Some(resp);
                break;
            }
        }

        let outcome = match early_resp {
            Some(resp) => Ok(resp),
            None => self.bind_arguments(handler.as_ref(), ctx).map(|args| {
                info!(
                    request_id = %ctx.request_id,
                    handler_name = %handler.name(),
                    method = %ctx.method,
                    path = %ctx.lookup_path(),
                    "Request dispatched to handler"
                );
                handler.handle(ctx, args)
            }),
        };
        let latency = start.elapsed();

        // After hooks for every middleware whose before ran, innermost first.
        // A binding failure unwinds with the error response it will become.
        let (mut resp, failure) = match outcome {
            Ok(resp) => (resp, None),
            Err(err) => (HandlerResponse::error(err.status(), &err.to_string()), Some(err)),
        };
        for mw in pipeline[..ran].iter().rev() {
            mw.after(ctx, &mut resp, latency);
        }
        if let Some(err) = failure {
            return Err(err);
        }

        info!(
            request_id = %ctx.request_id,
            handler_name = %handler.name(),
            status = resp.status,
            latency_ms = latency.as_millis() as u64,
            "Handler response received"
        );
        Ok(resp)
    }

    /// Bind a value to every parameter `handler` declares.
    ///
    /// # Errors
    ///
    /// [`DispatchError::UnresolvableParameter`] when no resolver produces a value,
    /// [`DispatchError::Binding`] when a resolver refuses.
    pub fn bind_arguments(
        &self,
        handler: &dyn Handler,
        ctx: &RequestContext,
    ) -> Result<Arguments, DispatchError> {
        let mut args = Arguments::new();
        for parameter in handler.parameters() {
            let mut value = None;
            for resolver in self.resolvers.iter().filter(|r| r.supports(parameter)) {
                if let Resolution::Resolved(v) = resolver.resolve(parameter, ctx)? {
                    value = Some(v);
                    break;
                }
            }
            let Some(value) = value else {
                warn!(
                    request_id = %ctx.request_id,
                    handler_name = %handler.name(),
                    parameter = parameter.name(),
                    expected = parameter.parameter_type().name(),
                    "No resolver produced a value for parameter"
                );
                return Err(DispatchError::UnresolvableParameter {
                    handler: handler.name().to_string(),
                    parameter: parameter.name().to_string(),
                    expected: parameter.parameter_type().name().to_string(),
                });
            };
            args.push(Arc::from(parameter.name()), value);
        }
        Ok(args)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("mappings", &self.mapping_names())
            .field("resolvers", &self.resolvers.len())
            .field("middlewares", &self.middlewares.len())
            .field("mount_root", &self.mount_root)
            .finish()
    }
}
