use tracing::debug;

use super::Middleware;
use crate::context::RequestContext;
use crate::handler::HandlerResponse;
use crate::object::ObjectRef;
use crate::store;

/// Attaches one backing object to the request it was built for.
///
/// Created by [`BackingPathResolver`](crate::router::BackingPathResolver) for each
/// mapped request and placed in that request's execution chain.
#[derive(Debug, Clone)]
pub struct BackingObjectExposingMiddleware {
    backing_object: ObjectRef,
}

impl BackingObjectExposingMiddleware {
    #[must_use]
    pub fn new(backing_object: ObjectRef) -> Self {
        Self { backing_object }
    }

    #[must_use]
    pub fn backing_object(&self) -> &ObjectRef {
        &self.backing_object
    }
}

impl Middleware for BackingObjectExposingMiddleware {
    fn before(&self, ctx: &mut RequestContext) -> Option<HandlerResponse> {
        store::expose_backing_object(ctx, self.backing_object.clone());
        debug!(
            request_id = %ctx.request_id,
            path = %ctx.lookup_path(),
            object_type = self.backing_object.type_name(),
            "Backing object exposed"
        );
        None
    }
}
