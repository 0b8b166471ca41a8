//! # Object Module
//!
//! Type-erased references to backing objects and the runtime type descriptors used
//! to decide whether a stored object may be bound to a declared handler parameter.
//!
//! A backing object's concrete type is only known when a request arrives, so the
//! binder cannot rely on static types. Every compatibility check funnels through
//! [`is_instance_of`], which compares the object's runtime `TypeId` against a
//! [`ParameterType`] (or runs the descriptor's capability predicate).
//!
//! ```rust
//! use brrtrouter_backing::object::{is_instance_of, ObjectRef, ParameterType};
//!
//! struct Widget { id: u64 }
//! struct Gadget;
//!
//! let widget = ObjectRef::new(Widget { id: 42 });
//! assert!(is_instance_of(&ParameterType::of::<Widget>(), &widget));
//! assert!(!is_instance_of(&ParameterType::of::<Gadget>(), &widget));
//! assert!(is_instance_of(&ParameterType::any(), &widget));
//! assert_eq!(widget.downcast::<Widget>().map(|w| w.id), Some(42));
//! ```

mod core;

pub use core::{is_instance_of, BackingObject, ObjectRef, ParameterType};
