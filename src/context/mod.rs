//! # Context Module
//!
//! [`RequestContext`] is the per-exchange state threaded through the dispatch
//! pipeline: who the request is, which path it asked for, and an attribute bag
//! ([`Attributes`]) that interceptors write and argument resolvers read.
//!
//! There is no ambient or global request state: everything a middleware, handler
//! mapping or resolver learns about the request comes from the context it is handed.
//! The context is created when a request arrives and dropped when the exchange
//! completes, releasing every attribute it holds.

mod core;
mod path;

pub use core::{Attributes, RequestContext};
pub use path::normalize_lookup_path;
