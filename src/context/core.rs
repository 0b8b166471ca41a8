use crate::handler::HeaderVec;
use crate::ids::{RequestId, REQUEST_ID_HEADER};
use crate::object::ObjectRef;
use crate::router::ParamVec;
use http::Method;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use super::path::normalize_lookup_path;

/// Per-request key → value map.
///
/// Keys are plain strings; libraries storing values here namespace their keys so
/// independent installations sharing one request never collide.
#[derive(Debug, Default, Clone)]
pub struct Attributes {
    inner: HashMap<Cow<'static, str>, ObjectRef>,
}

impl Attributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, returning the value it replaced.
    pub fn set(&mut self, key: impl Into<Cow<'static, str>>, value: ObjectRef) -> Option<ObjectRef> {
        self.inner.insert(key.into(), value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ObjectRef> {
        self.inner.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ObjectRef> {
        self.inner.remove(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(|k| k.as_ref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// One in-flight request/response exchange.
#[derive(Debug)]
pub struct RequestContext {
    /// Correlation id, taken from `x-request-id` when the caller supplied a valid one
    pub request_id: RequestId,
    pub method: Method,
    /// Request target as received, including any mount root and query string
    pub raw_path: String,
    /// HTTP headers (stack-allocated for ≤16 headers)
    pub headers: HeaderVec,
    /// Query string parameters parsed from `raw_path`
    pub query_params: ParamVec,
    /// Path parameters from the matched route, filled in by the dispatcher
    pub path_params: ParamVec,
    lookup_path: String,
    attributes: Attributes,
}

impl RequestContext {
    /// Create the context for a request with no headers.
    #[must_use]
    pub fn new(method: Method, raw_path: impl Into<String>) -> Self {
        Self::with_headers(method, raw_path, HeaderVec::new())
    }

    #[must_use]
    pub fn with_headers(method: Method, raw_path: impl Into<String>, headers: HeaderVec) -> Self {
        let raw_path = raw_path.into();
        let request_id = RequestId::from_header_or_new(
            headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(REQUEST_ID_HEADER))
                .map(|(_, v)| v.as_str()),
        );
        let query_params = parse_query(&raw_path);
        let lookup_path = normalize_lookup_path(&raw_path, "").unwrap_or_else(|| "/".to_string());
        Self {
            request_id,
            method,
            raw_path,
            headers,
            query_params,
            path_params: ParamVec::new(),
            lookup_path,
            attributes: Attributes::new(),
        }
    }

    /// Path used for handler lookup: starts with `/`, relative to the mount root.
    #[inline]
    #[must_use]
    pub fn lookup_path(&self) -> &str {
        &self.lookup_path
    }

    pub(crate) fn set_lookup_path(&mut self, path: String) {
        self.lookup_path = path;
    }

    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// Get a header by name (case-insensitive per RFC 7230)
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Get a path parameter by name ("last write wins" for duplicate names)
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a query parameter by name ("last write wins" for duplicate names)
    #[must_use]
    pub fn get_query_param(&self, name: &str) -> Option<&str> {
        self.query_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

fn parse_query(raw_path: &str) -> ParamVec {
    let Some((_, rest)) = raw_path.split_once('?') else {
        return ParamVec::new();
    };
    let query = rest.split('#').next().unwrap_or_default();
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (Arc::from(k.as_ref()), v.into_owned()))
        .collect()
}
