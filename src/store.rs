//! # Request-Scoped Attribute Store
//!
//! Named slots on a [`RequestContext`] used to hand values from the handler mapping
//! stage to argument resolution. The backing object lives in exactly one slot,
//! [`BACKING_OBJECT_ATTRIBUTE`], written by
//! [`BackingObjectExposingMiddleware`](crate::middleware::BackingObjectExposingMiddleware)
//! before the handler runs and read by
//! [`BackingObjectArgumentResolver`](crate::binding::BackingObjectArgumentResolver).
//!
//! Keys are prefixed with the crate name so they never collide with attributes
//! written by unrelated middleware.

use crate::context::RequestContext;
use crate::object::ObjectRef;
use tracing::debug;

/// Slot holding the backing object of the current request.
pub const BACKING_OBJECT_ATTRIBUTE: &str =
    concat!(env!("CARGO_PKG_NAME"), "::BackingPathResolver.backing_object");

/// Slot holding the lookup path that the matched handler mapping consumed.
pub const PATH_WITHIN_MAPPING_ATTRIBUTE: &str =
    concat!(env!("CARGO_PKG_NAME"), "::HandlerMapping.path_within_mapping");

/// Slot holding the route pattern (or literal path) that matched the request.
pub const BEST_MATCHING_PATTERN_ATTRIBUTE: &str =
    concat!(env!("CARGO_PKG_NAME"), "::HandlerMapping.best_matching_pattern");

/// Store `value` under `key` on the request, returning the value it replaced.
pub fn set(ctx: &mut RequestContext, key: &'static str, value: ObjectRef) -> Option<ObjectRef> {
    let previous = ctx.attributes_mut().set(key, value);
    if previous.is_some() {
        debug!(request_id = %ctx.request_id, key, "Request attribute replaced");
    }
    previous
}

/// Read the value stored under `key`, if any.
#[must_use]
pub fn get<'a>(ctx: &'a RequestContext, key: &str) -> Option<&'a ObjectRef> {
    ctx.attributes().get(key)
}

/// Attach the request's backing object. A request carries at most one; attaching
/// again replaces it.
pub fn expose_backing_object(ctx: &mut RequestContext, backing_object: ObjectRef) {
    set(ctx, BACKING_OBJECT_ATTRIBUTE, backing_object);
}

/// The request's backing object, if the backing path resolver matched this request.
#[must_use]
pub fn backing_object(ctx: &RequestContext) -> Option<&ObjectRef> {
    get(ctx, BACKING_OBJECT_ATTRIBUTE)
}

/// The path-within-mapping exposed by the matched handler mapping.
#[must_use]
pub fn path_within_mapping(ctx: &RequestContext) -> Option<&str> {
    get(ctx, PATH_WITHIN_MAPPING_ATTRIBUTE)
        .and_then(|o| o.downcast_ref::<String>())
        .map(String::as_str)
}

/// The pattern that matched, as exposed by the matched handler mapping.
#[must_use]
pub fn best_matching_pattern(ctx: &RequestContext) -> Option<&str> {
    get(ctx, BEST_MATCHING_PATTERN_ATTRIBUTE)
        .and_then(|o| o.downcast_ref::<String>())
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    #[test]
    fn keys_are_namespaced_and_distinct() {
        assert!(BACKING_OBJECT_ATTRIBUTE.starts_with("brrtrouter-backing::"));
        assert_ne!(BACKING_OBJECT_ATTRIBUTE, PATH_WITHIN_MAPPING_ATTRIBUTE);
        assert_ne!(PATH_WITHIN_MAPPING_ATTRIBUTE, BEST_MATCHING_PATTERN_ATTRIBUTE);
    }

    #[test]
    fn absent_until_exposed() {
        let mut ctx = RequestContext::new(Method::GET, "/custom/path");
        assert!(backing_object(&ctx).is_none());
        let obj = ObjectRef::new(42u32);
        expose_backing_object(&mut ctx, obj.clone());
        assert!(backing_object(&ctx).is_some_and(|o| o.ptr_eq(&obj)));
        assert!(get(&ctx, BACKING_OBJECT_ATTRIBUTE).is_some());
    }

    #[test]
    fn single_slot_per_request() {
        let mut ctx = RequestContext::new(Method::GET, "/");
        let first = ObjectRef::new(1u8);
        let second = ObjectRef::new(2u8);
        expose_backing_object(&mut ctx, first.clone());
        let replaced = set(&mut ctx, BACKING_OBJECT_ATTRIBUTE, second.clone());
        assert!(replaced.is_some_and(|o| o.ptr_eq(&first)));
        assert!(backing_object(&ctx).is_some_and(|o| o.ptr_eq(&second)));
        assert_eq!(ctx.attributes().len(), 1);
    }

    #[test]
    fn path_attributes_read_back_as_str() {
        let mut ctx = RequestContext::new(Method::GET, "/pets/7");
        set(&mut ctx, PATH_WITHIN_MAPPING_ATTRIBUTE, ObjectRef::new("/pets/7".to_string()));
        set(&mut ctx, BEST_MATCHING_PATTERN_ATTRIBUTE, ObjectRef::new("/pets/{id}".to_string()));
        assert_eq!(path_within_mapping(&ctx), Some("/pets/7"));
        assert_eq!(best_matching_pattern(&ctx), Some("/pets/{id}"));
    }
}
