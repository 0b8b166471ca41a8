use crate::binding::{Arguments, MethodParameter};
use crate::context::RequestContext;
use serde::Serialize;
use serde_json::Value;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Maximum inline headers before heap allocation
/// Most requests have ≤16 headers (JSF: no heap in hot path)
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage for the hot path
///
/// Header names use `Arc<str>` because they repeat across requests; values are
/// per-request data.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Response produced by a handler (or by middleware short-circuiting one)
#[derive(Debug, Clone, Serialize)]
pub struct HandlerResponse {
    /// HTTP status code (200, 404, 500, etc.)
    pub status: u16,
    /// HTTP response headers (stack-allocated for ≤16 headers)
    #[serde(skip_serializing)]
    pub headers: HeaderVec,
    /// Response body as JSON
    pub body: Value,
}

impl HandlerResponse {
    #[must_use]
    pub fn new(status: u16, headers: HeaderVec, body: Value) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a JSON response with default headers
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("content-type"), "application/json".to_string()));
        Self {
            status,
            headers,
            body,
        }
    }

    #[must_use]
    pub fn ok_json(body: Value) -> Self {
        Self::json(200, body)
    }

    /// Create an error response
    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, serde_json::json!({ "error": message }))
    }

    /// Get a header by name
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or update a header
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }
}

/// A dispatch target with a declared parameter list.
pub trait Handler: Send + Sync {
    /// Name used in logs and error messages
    fn name(&self) -> &str;

    /// Parameters the dispatcher must bind before calling [`handle`](Self::handle)
    fn parameters(&self) -> &[MethodParameter];

    /// Process one request. `args` holds a value for every declared parameter.
    fn handle(&self, ctx: &RequestContext, args: Arguments) -> HandlerResponse;
}

/// [`Handler`] backed by a closure.
pub struct FnHandler<F> {
    name: String,
    parameters: Vec<MethodParameter>,
    handler_fn: F,
}

impl<F> FnHandler<F>
where
    F: Fn(&RequestContext, Arguments) -> HandlerResponse + Send + Sync,
{
    pub fn new(name: impl Into<String>, parameters: Vec<MethodParameter>, handler_fn: F) -> Self {
        Self {
            name: name.into(),
            parameters,
            handler_fn,
        }
    }
}

impl<F> Handler for FnHandler<F>
where
    F: Fn(&RequestContext, Arguments) -> HandlerResponse + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> &[MethodParameter] {
        &self.parameters
    }

    fn handle(&self, ctx: &RequestContext, args: Arguments) -> HandlerResponse {
        (self.handler_fn)(ctx, args)
    }
}

impl<F> fmt::Debug for FnHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    #[test]
    fn error_response_shape() {
        let resp = HandlerResponse::error(404, "nothing here");
        assert_eq!(resp.status, 404);
        assert_eq!(resp.body, serde_json::json!({ "error": "nothing here" }));
        assert_eq!(resp.get_header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn set_header_replaces_case_insensitively() {
        let mut resp = HandlerResponse::ok_json(Value::Null);
        resp.set_header("Content-Type", "text/html".to_string());
        assert_eq!(resp.headers.len(), 1);
        assert_eq!(resp.get_header("content-type"), Some("text/html"));
    }

    #[test]
    fn fn_handler_delegates_to_closure() {
        let handler = FnHandler::new("ping", Vec::new(), |ctx: &RequestContext, args: Arguments| {
            HandlerResponse::ok_json(serde_json::json!({
                "path": ctx.lookup_path(),
                "args": args.len(),
            }))
        });
        let ctx = RequestContext::new(Method::GET, "/ping");
        let resp = handler.handle(&ctx, Arguments::new());
        assert_eq!(handler.name(), "ping");
        assert!(handler.parameters().is_empty());
        assert_eq!(resp.body["path"], "/ping");
        assert_eq!(resp.body["args"], 0);
    }
}
