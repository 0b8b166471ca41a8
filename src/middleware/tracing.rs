use std::time::Duration;

use tracing::info;

use super::Middleware;
use crate::context::RequestContext;
use crate::handler::HandlerResponse;

/// Logs one line when a request enters the pipeline and one when it leaves.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMiddleware;

impl Middleware for TracingMiddleware {
    fn before(&self, ctx: &mut RequestContext) -> Option<HandlerResponse> {
        info!(
            request_id = %ctx.request_id,
            method = %ctx.method,
            path = %ctx.lookup_path(),
            "Request started"
        );
        None
    }

    fn after(&self, ctx: &RequestContext, res: &mut HandlerResponse, latency: Duration) {
        info!(
            request_id = %ctx.request_id,
            method = %ctx.method,
            path = %ctx.lookup_path(),
            status = res.status,
            latency_ms = latency.as_millis() as u64,
            "Request completed"
        );
    }
}
