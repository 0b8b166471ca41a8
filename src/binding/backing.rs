use super::core::{ArgumentResolver, BindError, BindingPolicy, Marker, MethodParameter, Resolution};
use crate::context::RequestContext;
use crate::object::is_instance_of;
use crate::store;
use tracing::{debug, warn};

/// Binds parameters marked [`Marker::Backing`] to the request's backing object.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackingObjectArgumentResolver {
    policy: BindingPolicy,
}

impl BackingObjectArgumentResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_policy(policy: BindingPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> BindingPolicy {
        self.policy
    }
}

impl ArgumentResolver for BackingObjectArgumentResolver {
    fn supports(&self, parameter: &MethodParameter) -> bool {
        parameter.has_marker(&Marker::Backing)
    }

    fn resolve(
        &self,
        parameter: &MethodParameter,
        ctx: &RequestContext,
    ) -> Result<Resolution, BindError> {
        if !self.supports(parameter) {
            return Ok(Resolution::Unresolved);
        }

        let Some(backing_object) = store::backing_object(ctx) else {
            debug!(
                request_id = %ctx.request_id,
                parameter = parameter.name(),
                "No backing object attached to request"
            );
            return Ok(Resolution::Unresolved);
        };

        if is_instance_of(parameter.parameter_type(), backing_object) {
            debug!(
                request_id = %ctx.request_id,
                parameter = parameter.name(),
                object_type = backing_object.type_name(),
                "Backing object bound to parameter"
            );
            return Ok(Resolution::Resolved(backing_object.clone()));
        }

        match self.policy {
            BindingPolicy::Lenient => {
                debug!(
                    request_id = %ctx.request_id,
                    parameter = parameter.name(),
                    expected = parameter.parameter_type().name(),
                    actual = backing_object.type_name(),
                    "Backing object type does not match parameter"
                );
                Ok(Resolution::Unresolved)
            }
            BindingPolicy::Strict => {
                warn!(
                    request_id = %ctx.request_id,
                    parameter = parameter.name(),
                    expected = parameter.parameter_type().name(),
                    actual = backing_object.type_name(),
                    "Backing object type does not match parameter - strict binding"
                );
                Err(BindError::TypeMismatch {
                    parameter: parameter.name().to_string(),
                    expected: parameter.parameter_type().name().to_string(),
                    actual: backing_object.type_name().to_string(),
                })
            }
        }
    }
}
