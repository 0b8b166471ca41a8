//! # Router Module
//!
//! Handler lookup for the dispatch pipeline.
//!
//! Lookup is split across [`HandlerMapping`] implementations consulted in priority
//! order. Each one either declines a request or returns an [`ExecutionChain`]: the
//! handler to invoke plus the interceptors that must run first.
//!
//! - [`BackingPathResolver`] asks a [`MappingProvider`](crate::mapping::MappingProvider)
//!   whether the request path is mapped at runtime. If it is, the fetched backing
//!   object travels with the chain and is attached to the request before the
//!   configured handler runs.
//! - [`Router`] holds routes declared up front (`GET /pets/{id}`), compiled to regex
//!   patterns with path parameter extraction. It serves as fallback routing for
//!   paths no provider claims.
//!
//! ## Example
//!
//! ```rust
//! use brrtrouter_backing::binding::Arguments;
//! use brrtrouter_backing::context::RequestContext;
//! use brrtrouter_backing::handler::{FnHandler, HandlerResponse};
//! use brrtrouter_backing::router::Router;
//! use http::Method;
//! use std::sync::Arc;
//!
//! let mut router = Router::new();
//! router
//!     .add_route(
//!         Method::GET,
//!         "/pets/{id}",
//!         Arc::new(FnHandler::new("get_pet", Vec::new(), |_: &RequestContext, _: Arguments| {
//!             HandlerResponse::ok_json(serde_json::Value::Null)
//!         })),
//!     )
//!     .unwrap();
//!
//! let m = router.route(&Method::GET, "/pets/42").unwrap();
//! assert_eq!(m.get_path_param("id"), Some("42"));
//! ```

mod backing;
mod core;
mod mapping;

pub use backing::BackingPathResolver;
pub use core::{ParamVec, RouteMatch, Router, MAX_INLINE_PARAMS};
pub use mapping::{ExecutionChain, HandlerMapping};
