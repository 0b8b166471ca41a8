//! # Handler Module
//!
//! Handlers are the targets of dispatch. Each one declares its parameters up front
//! as [`MethodParameter`](crate::binding::MethodParameter)s; the dispatcher binds a
//! value to every parameter through the registered argument resolvers before calling
//! [`Handler::handle`].
//!
//! ```rust
//! use brrtrouter_backing::binding::{Arguments, MethodParameter};
//! use brrtrouter_backing::context::RequestContext;
//! use brrtrouter_backing::handler::{FnHandler, HandlerResponse};
//! use brrtrouter_backing::object::ParameterType;
//!
//! struct Article { title: String }
//!
//! let handler = FnHandler::new(
//!     "render_article",
//!     vec![MethodParameter::backing("article", ParameterType::of::<Article>())],
//!     |_ctx: &RequestContext, args: Arguments| match args.get_as::<Article>("article") {
//!         Some(article) => HandlerResponse::ok_json(serde_json::json!({ "title": article.title })),
//!         None => HandlerResponse::error(404, "no article"),
//!     },
//! );
//! # let _ = handler;
//! ```

mod core;

pub use core::{FnHandler, Handler, HandlerResponse, HeaderVec, MAX_INLINE_HEADERS};
