//! # Middleware Module
//!
//! Interception steps that run around a handler invocation.
//!
//! Middleware is registered globally on the [`Dispatcher`](crate::dispatcher::Dispatcher)
//! or attached per request to an [`ExecutionChain`](crate::router::ExecutionChain) by the
//! handler mapping that matched. Every `before` runs strictly before argument binding
//! and handler invocation for the same request; returning `Some(response)` from
//! `before` short-circuits the handler.
//!
//! - [`BackingObjectExposingMiddleware`] attaches the fetched backing object to the request
//! - [`PathExposingMiddleware`] exposes the matched path and pattern as request attributes
//! - [`TracingMiddleware`] logs request start and completion with structured fields

mod backing;
mod core;
mod path;
mod tracing;

pub use backing::BackingObjectExposingMiddleware;
pub use core::Middleware;
pub use path::PathExposingMiddleware;
pub use self::tracing::TracingMiddleware;
