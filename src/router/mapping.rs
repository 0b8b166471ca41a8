use crate::context::RequestContext;
use crate::handler::Handler;
use crate::middleware::Middleware;
use std::fmt;
use std::sync::Arc;

use super::core::ParamVec;

/// One stage of handler lookup.
pub trait HandlerMapping: Send + Sync {
    /// Return the chain to execute for `ctx`, or `None` to let the next mapping try.
    ///
    /// # Errors
    ///
    /// Failures of collaborators consulted during lookup, passed through unmodified.
    fn lookup(&self, ctx: &RequestContext) -> anyhow::Result<Option<ExecutionChain>>;

    /// Priority: lower values are consulted first.
    fn order(&self) -> i32 {
        0
    }

    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Handler selected for a request together with the interceptors that run before it.
#[derive(Clone)]
pub struct ExecutionChain {
    handler: Arc<dyn Handler>,
    interceptors: Vec<Arc<dyn Middleware>>,
    path_params: ParamVec,
}

impl ExecutionChain {
    #[must_use]
    pub fn new(handler: Arc<dyn Handler>) -> Self {
        Self {
            handler,
            interceptors: Vec::new(),
            path_params: ParamVec::new(),
        }
    }

    /// Append an interceptor; interceptors run in the order they were added.
    #[must_use]
    pub fn with_interceptor(mut self, interceptor: Arc<dyn Middleware>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    #[must_use]
    pub fn with_path_params(mut self, path_params: ParamVec) -> Self {
        self.path_params = path_params;
        self
    }

    #[must_use]
    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    #[must_use]
    pub fn interceptors(&self) -> &[Arc<dyn Middleware>] {
        &self.interceptors
    }

    #[must_use]
    pub fn path_params(&self) -> &ParamVec {
        &self.path_params
    }

    pub(crate) fn into_parts(self) -> (Arc<dyn Handler>, Vec<Arc<dyn Middleware>>, ParamVec) {
        (self.handler, self.interceptors, self.path_params)
    }
}

impl fmt::Debug for ExecutionChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionChain")
            .field("handler", &self.handler.name())
            .field("interceptors", &self.interceptors.len())
            .field("path_params", &self.path_params)
            .finish()
    }
}
