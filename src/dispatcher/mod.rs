//! # Dispatcher Module
//!
//! The dispatcher is the host pipeline that ties handler lookup, interception,
//! argument binding and handler invocation together for one request.
//!
//! ## Request Flow
//!
//! 1. The lookup path is computed from the raw request path and the mount root
//! 2. Handler mappings are consulted in ascending `order()`; the first chain wins
//! 3. Path parameters from the chain are copied into the request context
//! 4. Global middleware `before` runs, then the chain's interceptors `before`
//! 5. Every handler parameter is bound through the argument resolvers
//! 6. The handler is invoked
//! 7. `after` hooks run in reverse order
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Dispatcher
//!     participant Resolver as BackingPathResolver
//!     participant Provider as MappingProvider
//!     participant Expose as BackingObjectExposingMiddleware
//!     participant Binder as BackingObjectArgumentResolver
//!     participant Handler
//!
//!     Caller->>Dispatcher: dispatch(ctx)
//!     Dispatcher->>Resolver: lookup(ctx)
//!     Resolver->>Provider: is_path_mapped(path)
//!     alt Not mapped
//!         Resolver-->>Dispatcher: None (next mapping / fallback router)
//!     end
//!     Resolver->>Provider: retrieve_backing_object(path)
//!     Resolver-->>Dispatcher: ExecutionChain(handler, interceptors)
//!     Dispatcher->>Expose: before(ctx)
//!     Expose->>Expose: store backing object on ctx
//!     Dispatcher->>Binder: resolve(parameter, ctx)
//!     Binder-->>Dispatcher: Resolved(object) / Unresolved
//!     Dispatcher->>Handler: handle(ctx, args)
//!     Handler-->>Caller: HandlerResponse
//! ```
//!
//! ## Error Handling
//!
//! [`Dispatcher::try_dispatch`] reports failures as [`DispatchError`];
//! [`Dispatcher::dispatch`] turns them into HTTP responses:
//! - No mapping matched: 404
//! - Mapping provider failed: 500, with the provider's error untouched in the variant
//! - A parameter could not be bound: 500

mod core;

pub use core::{DispatchError, Dispatcher};
