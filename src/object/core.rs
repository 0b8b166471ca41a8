use smallvec::SmallVec;
use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Shared, type-erased reference to a value produced at request time.
///
/// Cloning an `ObjectRef` clones the `Arc`, never the value: every clone points at
/// the same allocation, which is what makes backing object injection identity
/// preserving.
#[derive(Clone)]
pub struct ObjectRef {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

/// The object a mapping provider associates with a request path.
pub type BackingObject = ObjectRef;

impl ObjectRef {
    /// Wrap an owned value.
    #[must_use]
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wrap a value that is already shared, keeping its allocation.
    #[must_use]
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            value,
            type_name: std::any::type_name::<T>(),
        }
    }

    /// `TypeId` of the concrete value behind the reference.
    #[inline]
    #[must_use]
    pub fn runtime_type_id(&self) -> TypeId {
        // Deref first: the Arc's own TypeId is not the value's.
        (*self.value).type_id()
    }

    /// Type name of the concrete value, for logs and error messages.
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.runtime_type_id() == TypeId::of::<T>()
    }

    /// Borrow the value as `T` if that is its concrete type.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Get a typed handle on the same allocation if the concrete type is `T`.
    #[must_use]
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.value).downcast::<T>().ok()
    }

    /// True when both references point at the same allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectRef").field(&self.type_name).finish()
    }
}

type TypePredicate = Arc<dyn Fn(&ObjectRef) -> bool + Send + Sync>;

#[derive(Clone)]
enum Acceptance {
    /// Any of the listed concrete types.
    OneOf(SmallVec<[TypeId; 4]>),
    /// Every object.
    Any,
    /// Capability check supplied by the handler author.
    Predicate(TypePredicate),
}

/// Runtime descriptor of a handler parameter's declared type.
///
/// Rust has no subtyping between concrete types, so "a type or one of its subtypes"
/// is expressed as a closed family built with [`ParameterType::or`], and a top type
/// as [`ParameterType::any`]. Anything more dynamic goes through
/// [`ParameterType::matching`].
#[derive(Clone)]
pub struct ParameterType {
    name: Cow<'static, str>,
    acceptance: Acceptance,
}

impl ParameterType {
    /// Accept exactly the concrete type `T`.
    #[must_use]
    pub fn of<T: Any>() -> Self {
        let mut ids = SmallVec::new();
        ids.push(TypeId::of::<T>());
        Self {
            name: Cow::Borrowed(std::any::type_name::<T>()),
            acceptance: Acceptance::OneOf(ids),
        }
    }

    /// Also accept the concrete type `T`.
    #[must_use]
    pub fn or<T: Any>(self) -> Self {
        let id = TypeId::of::<T>();
        let name = Cow::Owned(format!("{} | {}", self.name, std::any::type_name::<T>()));
        let acceptance = match self.acceptance {
            Acceptance::OneOf(mut ids) => {
                if !ids.contains(&id) {
                    ids.push(id);
                }
                Acceptance::OneOf(ids)
            }
            Acceptance::Any => Acceptance::Any,
            Acceptance::Predicate(predicate) => Acceptance::Predicate(Arc::new(move |o| {
                o.runtime_type_id() == id || predicate(o)
            })),
        };
        Self { name, acceptance }
    }

    /// Accept every object.
    #[must_use]
    pub fn any() -> Self {
        Self {
            name: Cow::Borrowed("any"),
            acceptance: Acceptance::Any,
        }
    }

    /// Accept objects for which `predicate` holds.
    pub fn matching<F>(name: impl Into<Cow<'static, str>>, predicate: F) -> Self
    where
        F: Fn(&ObjectRef) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            acceptance: Acceptance::Predicate(Arc::new(predicate)),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ParameterType").field(&self.name).finish()
    }
}

/// Whether `value` may be bound to a parameter declared as `declared`.
#[must_use]
pub fn is_instance_of(declared: &ParameterType, value: &ObjectRef) -> bool {
    match &declared.acceptance {
        Acceptance::OneOf(ids) => ids.contains(&value.runtime_type_id()),
        Acceptance::Any => true,
        Acceptance::Predicate(predicate) => predicate(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Widget {
        id: u64,
    }

    struct Gadget;

    struct Page;

    #[test]
    fn runtime_type_is_the_wrapped_value() {
        let obj = ObjectRef::new(Widget { id: 1 });
        assert_eq!(obj.runtime_type_id(), TypeId::of::<Widget>());
        assert!(obj.is::<Widget>());
        assert!(!obj.is::<Arc<Widget>>());
        assert!(obj.type_name().ends_with("Widget"));
    }

    #[test]
    fn downcast_shares_the_allocation() {
        let shared = Arc::new(Widget { id: 7 });
        let obj = ObjectRef::from_arc(Arc::clone(&shared));
        let back = obj.downcast::<Widget>().unwrap();
        assert!(Arc::ptr_eq(&shared, &back));
        assert!(obj.downcast::<Gadget>().is_none());
        assert_eq!(obj.downcast_ref::<Widget>(), Some(&Widget { id: 7 }));
    }

    #[test]
    fn clones_are_pointer_equal() {
        let a = ObjectRef::new(Widget { id: 1 });
        let b = a.clone();
        let c = ObjectRef::new(Widget { id: 1 });
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
    }

    #[test]
    fn exact_type_check() {
        let obj = ObjectRef::new(Widget { id: 1 });
        assert!(is_instance_of(&ParameterType::of::<Widget>(), &obj));
        assert!(!is_instance_of(&ParameterType::of::<Gadget>(), &obj));
    }

    #[test]
    fn family_accepts_each_member() {
        let content = ParameterType::of::<Widget>().or::<Page>();
        assert!(is_instance_of(&content, &ObjectRef::new(Widget { id: 1 })));
        assert!(is_instance_of(&content, &ObjectRef::new(Page)));
        assert!(!is_instance_of(&content, &ObjectRef::new(Gadget)));
        assert!(content.name().contains('|'));
    }

    #[test]
    fn any_accepts_everything() {
        assert!(is_instance_of(&ParameterType::any(), &ObjectRef::new(Gadget)));
        assert!(is_instance_of(&ParameterType::any().or::<Page>(), &ObjectRef::new(3u8)));
    }

    #[test]
    fn predicate_and_or_compose() {
        let big_widget = ParameterType::matching("BigWidget", |o| {
            o.downcast_ref::<Widget>().is_some_and(|w| w.id > 100)
        })
        .or::<Page>();
        assert!(is_instance_of(&big_widget, &ObjectRef::new(Widget { id: 101 })));
        assert!(!is_instance_of(&big_widget, &ObjectRef::new(Widget { id: 1 })));
        assert!(is_instance_of(&big_widget, &ObjectRef::new(Page)));
    }
}
