use crate::context::RequestContext;
use crate::handler::Handler;
use crate::mapping::MappingProvider;
use crate::middleware::{BackingObjectExposingMiddleware, PathExposingMiddleware};
use crate::object::ObjectRef;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use super::core::Router;
use super::mapping::{ExecutionChain, HandlerMapping};

/// Handler mapping for paths whose target is decided at runtime by a
/// [`MappingProvider`].
///
/// Every mapped path dispatches to the same pre-configured handler; what differs
/// per path is the backing object handed to it. Unmapped paths go to the optional
/// fallback [`Router`], and otherwise further down the dispatcher's mapping chain.
///
/// Provider calls are made on every lookup: nothing is cached, nothing retried, and
/// provider errors are returned exactly as produced.
pub struct BackingPathResolver {
    provider: Arc<dyn MappingProvider>,
    handler: Arc<dyn Handler>,
    fallback: Option<Router>,
    order: i32,
}

impl BackingPathResolver {
    /// Consulted ahead of every other mapping unless reordered with [`with_order`](Self::with_order).
    pub const DEFAULT_ORDER: i32 = i32::MIN;

    pub fn new(provider: Arc<dyn MappingProvider>, handler: Arc<dyn Handler>) -> Self {
        Self {
            provider,
            handler,
            fallback: None,
            order: Self::DEFAULT_ORDER,
        }
    }

    /// Routes consulted when the provider declines a path.
    #[must_use]
    pub fn with_fallback(mut self, router: Router) -> Self {
        self.fallback = Some(router);
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    /// Resolve `path` against the provider alone.
    ///
    /// `path` must be a lookup path (leading `/`, relative to the mount root).
    ///
    /// # Errors
    ///
    /// Any error from [`MappingProvider::is_path_mapped`] or
    /// [`MappingProvider::retrieve_backing_object`], unmodified.
    pub fn resolve(&self, path: &str) -> anyhow::Result<Option<ExecutionChain>> {
        if !self.provider.is_path_mapped(path)? {
            debug!(path = %path, "Path not mapped to a backing object");
            return Ok(None);
        }

        let backing_object = self.provider.retrieve_backing_object(path)?;
        info!(
            path = %path,
            handler_name = %self.handler.name(),
            object_type = backing_object.type_name(),
            "Path mapped to backing object"
        );
        Ok(Some(self.build_chain(backing_object, path)))
    }

    /// Chain for a mapped path: expose the path, then the backing object, then run
    /// the configured handler.
    fn build_chain(&self, backing_object: ObjectRef, path: &str) -> ExecutionChain {
        ExecutionChain::new(Arc::clone(&self.handler))
            .with_interceptor(Arc::new(PathExposingMiddleware::new(path, path)))
            .with_interceptor(Arc::new(BackingObjectExposingMiddleware::new(backing_object)))
    }
}

impl HandlerMapping for BackingPathResolver {
    fn lookup(&self, ctx: &RequestContext) -> anyhow::Result<Option<ExecutionChain>> {
        if let Some(chain) = self.resolve(ctx.lookup_path())? {
            return Ok(Some(chain));
        }
        match &self.fallback {
            Some(router) => router.lookup(ctx),
            None => Ok(None),
        }
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn name(&self) -> &str {
        "backing_path_resolver"
    }
}

impl fmt::Debug for BackingPathResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackingPathResolver")
            .field("handler", &self.handler.name())
            .field("fallback", &self.fallback)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}
