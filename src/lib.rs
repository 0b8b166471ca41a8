//! # BRRTRouter Backing
//!
//! **BRRTRouter Backing** resolves request paths to *backing objects* at runtime and
//! injects those objects into handler parameters. It lets a content-managed site map
//! arbitrary URLs (e.g. `/custom/path`) onto stored objects without registering a
//! route per URL.
//!
//! ## Overview
//!
//! A [`MappingProvider`](mapping::MappingProvider) answers two questions for a lookup
//! path: is it mapped, and which object backs it. The
//! [`BackingPathResolver`](router::BackingPathResolver) asks it on every request and,
//! when the path is mapped, builds an execution chain that stores the object on the
//! request and runs one fixed handler. The
//! [`BackingObjectArgumentResolver`](binding::BackingObjectArgumentResolver) then hands
//! the stored object to every handler parameter marked as a backing parameter whose
//! declared type the object satisfies.
//!
//! ## Architecture
//!
//! - **[`object`]** - Type-erased shared object references and runtime type descriptors
//! - **[`mapping`]** - The mapping provider contract and an in-memory table
//! - **[`context`]** - Per-request context, attribute bag and lookup-path normalization
//! - **[`store`]** - Well-known request attributes (backing object, matched path)
//! - **[`router`]** - Handler mappings: static route table and the backing path resolver
//! - **[`middleware`]** - Before/after hooks, including the attribute-exposing interceptors
//! - **[`binding`]** - Marked method parameters and argument resolvers
//! - **[`handler`]** - Handler trait, closure adaptor and response type
//! - **[`dispatcher`]** - The host pipeline wiring all of the above together
//! - **[`runtime_config`]** / **[`logging`]** - Environment-driven configuration
//! - **[`cli`]** - Command-line front end over a YAML mapping table
//!
//! ## Quick Start
//!
//! ```rust
//! use brrtrouter_backing::binding::{Arguments, MethodParameter};
//! use brrtrouter_backing::context::RequestContext;
//! use brrtrouter_backing::dispatcher::Dispatcher;
//! use brrtrouter_backing::handler::{FnHandler, HandlerResponse};
//! use brrtrouter_backing::mapping::StaticMappingProvider;
//! use brrtrouter_backing::object::{ObjectRef, ParameterType};
//! use brrtrouter_backing::router::BackingPathResolver;
//! use brrtrouter_backing::runtime_config::RuntimeConfig;
//! use http::Method;
//! use std::sync::Arc;
//!
//! struct Widget { id: u32 }
//!
//! let provider = StaticMappingProvider::new()
//!     .with("/custom/path", ObjectRef::new(Widget { id: 42 }));
//!
//! let handler = FnHandler::new(
//!     "render_widget",
//!     vec![MethodParameter::backing("widget", ParameterType::of::<Widget>())],
//!     |_ctx: &RequestContext, args: Arguments| match args.get_as::<Widget>("widget") {
//!         Some(w) => HandlerResponse::ok_json(serde_json::json!({ "id": w.id })),
//!         None => HandlerResponse::error(500, "unbound"),
//!     },
//! );
//!
//! let mut dispatcher = Dispatcher::from_config(&RuntimeConfig::default());
//! dispatcher.add_mapping(Arc::new(BackingPathResolver::new(
//!     Arc::new(provider),
//!     Arc::new(handler),
//! )));
//!
//! let response = dispatcher.dispatch(&mut RequestContext::new(Method::GET, "/custom/path"));
//! assert_eq!(response.status, 200);
//! assert_eq!(response.body["id"], 42);
//! ```
//!
//! ## Request Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Client
//!     participant Dispatcher
//!     participant Resolver as BackingPathResolver
//!     participant Provider as MappingProvider
//!     participant Store as Request attributes
//!     participant Binder as BackingObjectArgumentResolver
//!     participant Handler
//!
//!     Client->>Dispatcher: GET /custom/path
//!     Dispatcher->>Resolver: lookup
//!     Resolver->>Provider: is_path_mapped("/custom/path")
//!     Provider-->>Resolver: true
//!     Resolver->>Provider: retrieve_backing_object("/custom/path")
//!     Provider-->>Resolver: Widget{id: 42}
//!     Resolver-->>Dispatcher: chain(handler, expose interceptors)
//!     Dispatcher->>Store: set backing object
//!     Dispatcher->>Binder: resolve(widget: Widget)
//!     Binder->>Store: get backing object
//!     Binder-->>Dispatcher: Resolved(Widget{id: 42})
//!     Dispatcher->>Handler: handle(ctx, args)
//!     Handler-->>Client: 200
//! ```
//!
//! ## Configuration
//!
//! See [`runtime_config`] (`BRRTR_MOUNT_ROOT`, `BRRTR_STRICT_BINDING`) and
//! [`logging`] (`BRRTR_LOG_*`).

pub mod binding;
pub mod cli;
pub mod context;
pub mod dispatcher;
pub mod handler;
pub mod ids;
pub mod logging;
pub mod mapping;
pub mod middleware;
pub mod object;
pub mod router;
pub mod runtime_config;
pub mod store;

pub use binding::{
    ArgumentResolver, BackingObjectArgumentResolver, BindError, BindingPolicy, Marker,
    MethodParameter, Resolution,
};
pub use context::RequestContext;
pub use dispatcher::{DispatchError, Dispatcher};
pub use handler::{FnHandler, Handler, HandlerResponse};
pub use mapping::{MappingProvider, StaticMappingProvider};
pub use object::{is_instance_of, BackingObject, ObjectRef, ParameterType};
pub use router::{BackingPathResolver, ExecutionChain, HandlerMapping, Router};
