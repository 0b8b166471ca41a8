use crate::context::RequestContext;
use crate::object::{ObjectRef, ParameterType};
use smallvec::SmallVec;
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Tag attached to a handler parameter, inspected by resolvers at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Inject the request's backing object.
    Backing,
    /// Inject the named path parameter of the matched route.
    PathParam(Cow<'static, str>),
}

/// Formal parameter of a handler.
#[derive(Debug, Clone)]
pub struct MethodParameter {
    name: Arc<str>,
    parameter_type: ParameterType,
    markers: SmallVec<[Marker; 2]>,
}

impl MethodParameter {
    /// An unmarked parameter. Only resolvers that ignore markers can bind it.
    pub fn new(name: impl Into<Arc<str>>, parameter_type: ParameterType) -> Self {
        Self {
            name: name.into(),
            parameter_type,
            markers: SmallVec::new(),
        }
    }

    /// A parameter marked for backing object injection.
    pub fn backing(name: impl Into<Arc<str>>, parameter_type: ParameterType) -> Self {
        Self::new(name, parameter_type).with_marker(Marker::Backing)
    }

    /// A `String` parameter bound to the path parameter of the same name.
    pub fn path_param(name: &'static str) -> Self {
        Self::new(name, ParameterType::of::<String>())
            .with_marker(Marker::PathParam(Cow::Borrowed(name)))
    }

    #[must_use]
    pub fn with_marker(mut self, marker: Marker) -> Self {
        if !self.markers.contains(&marker) {
            self.markers.push(marker);
        }
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn parameter_type(&self) -> &ParameterType {
        &self.parameter_type
    }

    #[must_use]
    pub fn has_marker(&self, marker: &Marker) -> bool {
        self.markers.contains(marker)
    }

    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

/// Outcome of asking one resolver for one parameter.
#[derive(Debug, Clone)]
pub enum Resolution {
    Resolved(ObjectRef),
    /// This resolver does not produce a value for the parameter.
    Unresolved,
}

impl Resolution {
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    #[must_use]
    pub fn into_value(self) -> Option<ObjectRef> {
        match self {
            Resolution::Resolved(v) => Some(v),
            Resolution::Unresolved => None,
        }
    }
}

/// How a marked parameter whose stored object has the wrong type is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindingPolicy {
    /// Mismatch is `Unresolved`; other resolvers may still bind the parameter.
    #[default]
    Lenient,
    /// Mismatch is a [`BindError::TypeMismatch`].
    Strict,
}

impl BindingPolicy {
    #[must_use]
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            BindingPolicy::Strict
        } else {
            BindingPolicy::Lenient
        }
    }
}

/// Binding failure raised by a resolver (only in [`BindingPolicy::Strict`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    TypeMismatch {
        parameter: String,
        expected: String,
        actual: String,
    },
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::TypeMismatch {
                parameter,
                expected,
                actual,
            } => write!(
                f,
                "parameter '{parameter}' expects {expected} but the backing object is {actual}"
            ),
        }
    }
}

impl std::error::Error for BindError {}

/// Supplies values for handler parameters.
pub trait ArgumentResolver: Send + Sync {
    /// Whether this resolver handles `parameter` at all.
    fn supports(&self, parameter: &MethodParameter) -> bool;

    /// Produce a value for `parameter` from the request.
    ///
    /// # Errors
    ///
    /// Only for binding failures that must not fall through to other resolvers.
    fn resolve(
        &self,
        parameter: &MethodParameter,
        ctx: &RequestContext,
    ) -> Result<Resolution, BindError>;
}

/// Values bound to a handler's parameters, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    values: SmallVec<[(Arc<str>, ObjectRef); 4]>,
}

impl Arguments {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: Arc<str>, value: ObjectRef) {
        self.values.push((name, value));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ObjectRef> {
        self.values
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v)
    }

    /// Typed handle on the bound value; `None` if missing or of another type.
    #[must_use]
    pub fn get_as<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        self.get(name).and_then(ObjectRef::downcast::<T>)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ObjectRef)> {
        self.values.iter().map(|(k, v)| (k.as_ref(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_are_deduplicated() {
        let param = MethodParameter::backing("w", ParameterType::any()).with_marker(Marker::Backing);
        assert_eq!(param.markers().len(), 1);
        assert!(param.has_marker(&Marker::Backing));
        assert_eq!(param.name(), "w");
    }

    #[test]
    fn plain_parameter_carries_no_marker() {
        let param = MethodParameter::new("w", ParameterType::of::<u32>());
        assert!(param.markers().is_empty());
        assert!(!param.has_marker(&Marker::Backing));
    }

    #[test]
    fn path_param_parameter_is_a_string() {
        let param = MethodParameter::path_param("id");
        assert!(param.has_marker(&Marker::PathParam(Cow::Borrowed("id"))));
        assert!(crate::object::is_instance_of(
            param.parameter_type(),
            &ObjectRef::new("7".to_string())
        ));
    }

    #[test]
    fn arguments_typed_access() {
        let mut args = Arguments::new();
        args.push(Arc::from("count"), ObjectRef::new(3u32));
        assert_eq!(args.get_as::<u32>("count").as_deref(), Some(&3));
        assert!(args.get_as::<u64>("count").is_none());
        assert!(args.get("missing").is_none());
        assert_eq!(args.iter().map(|(k, _)| k).collect::<Vec<_>>(), vec!["count"]);
    }

    #[test]
    fn resolution_helpers() {
        assert!(Resolution::Resolved(ObjectRef::new(1u8)).is_resolved());
        assert!(Resolution::Unresolved.into_value().is_none());
    }

    #[test]
    fn policy_from_flag() {
        assert_eq!(BindingPolicy::from_strict(true), BindingPolicy::Strict);
        assert_eq!(BindingPolicy::from_strict(false), BindingPolicy::default());
    }
}
