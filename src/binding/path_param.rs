use super::core::{ArgumentResolver, BindError, Marker, MethodParameter, Resolution};
use crate::context::RequestContext;
use crate::object::{is_instance_of, ObjectRef};

/// Binds parameters marked [`Marker::PathParam`] to the matched route's path
/// parameter of that name, as a `String`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathParamArgumentResolver;

impl ArgumentResolver for PathParamArgumentResolver {
    fn supports(&self, parameter: &MethodParameter) -> bool {
        parameter
            .markers()
            .iter()
            .any(|m| matches!(m, Marker::PathParam(_)))
    }

    fn resolve(
        &self,
        parameter: &MethodParameter,
        ctx: &RequestContext,
    ) -> Result<Resolution, BindError> {
        let name = parameter.markers().iter().find_map(|m| match m {
            Marker::PathParam(name) => Some(name.as_ref()),
            Marker::Backing => None,
        });
        let Some(value) = name.and_then(|n| ctx.get_path_param(n)) else {
            return Ok(Resolution::Unresolved);
        };
        let value = ObjectRef::new(value.to_string());
        if is_instance_of(parameter.parameter_type(), &value) {
            Ok(Resolution::Resolved(value))
        } else {
            Ok(Resolution::Unresolved)
        }
    }
}
