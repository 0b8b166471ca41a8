use std::time::Duration;

use crate::context::RequestContext;
use crate::handler::HandlerResponse;

/// Hook around handler invocation.
///
/// `before` may write request attributes; returning `Some` answers the request
/// without calling the handler. `after` runs for every middleware whose `before` ran,
/// in reverse order, and may rewrite the response.
pub trait Middleware: Send + Sync {
    fn before(&self, _ctx: &mut RequestContext) -> Option<HandlerResponse> {
        None
    }
    fn after(&self, _ctx: &RequestContext, _res: &mut HandlerResponse, _latency: Duration) {}
}
