//! # Mapping Module
//!
//! The mapping provider is the embedding application's answer to "which object, if
//! any, lives at this path?". URL-to-content mappings in a CMS are edited at runtime
//! by administrators, so they cannot be declared as static routes; the
//! [`BackingPathResolver`](crate::router::BackingPathResolver) asks the provider on
//! every request instead.
//!
//! Paths handed to a provider always begin with `/` and are relative to the
//! application's mount root: with the application mounted at `/app`, a request for
//! `https://example.com/app/custom/path` is looked up as `/custom/path`.
//!
//! Providers own their objects and their own thread safety. Errors returned from
//! either operation are propagated to the dispatcher untouched.
//!
//! [`StaticMappingProvider`] is an in-memory table suitable for tests, demos and
//! small deployments.

mod core;

pub use core::{MappingProvider, StaticMappingProvider};
