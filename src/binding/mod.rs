//! # Binding Module
//!
//! Argument resolution for handler parameters.
//!
//! A handler declares its parameters as [`MethodParameter`]s carrying a runtime
//! [`ParameterType`](crate::object::ParameterType) and zero or more [`Marker`]s. At
//! invocation time the dispatcher walks its [`ArgumentResolver`]s in registration
//! order; the first resolver that [`supports`](ArgumentResolver::supports) the
//! parameter and returns [`Resolution::Resolved`] provides the value. A resolver that
//! returns [`Resolution::Unresolved`] simply lets the next one try.
//!
//! ## Backing objects
//!
//! [`BackingObjectArgumentResolver`] handles parameters marked [`Marker::Backing`].
//! Its outcome is a pure function of three facts, evaluated once per parameter:
//!
//! | marked | stored object | type compatible | outcome                      |
//! |--------|---------------|-----------------|------------------------------|
//! | no     | -             | -               | `Unresolved`                 |
//! | yes    | absent        | -               | `Unresolved`                 |
//! | yes    | present       | no              | `Unresolved` (or error in [`BindingPolicy::Strict`]) |
//! | yes    | present       | yes             | `Resolved(the stored object)`|
//!
//! A type mismatch is not an error by default: other resolvers still get their
//! chance, and if none applies the dispatcher reports the parameter as
//! unresolvable.

mod backing;
mod core;
mod path_param;

pub use backing::BackingObjectArgumentResolver;
pub use core::{
    ArgumentResolver, Arguments, BindError, BindingPolicy, Marker, MethodParameter, Resolution,
};
pub use path_param::PathParamArgumentResolver;
