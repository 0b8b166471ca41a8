use super::Middleware;
use crate::context::RequestContext;
use crate::handler::HandlerResponse;
use crate::object::ObjectRef;
use crate::store::{self, BEST_MATCHING_PATTERN_ATTRIBUTE, PATH_WITHIN_MAPPING_ATTRIBUTE};

/// Exposes which pattern matched and which part of the path it consumed.
#[derive(Debug, Clone)]
pub struct PathExposingMiddleware {
    best_matching_pattern: String,
    path_within_mapping: String,
}

impl PathExposingMiddleware {
    pub fn new(best_matching_pattern: impl Into<String>, path_within_mapping: impl Into<String>) -> Self {
        Self {
            best_matching_pattern: best_matching_pattern.into(),
            path_within_mapping: path_within_mapping.into(),
        }
    }
}

impl Middleware for PathExposingMiddleware {
    fn before(&self, ctx: &mut RequestContext) -> Option<HandlerResponse> {
        store::set(
            ctx,
            BEST_MATCHING_PATTERN_ATTRIBUTE,
            ObjectRef::new(self.best_matching_pattern.clone()),
        );
        store::set(
            ctx,
            PATH_WITHIN_MAPPING_ATTRIBUTE,
            ObjectRef::new(self.path_within_mapping.clone()),
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    #[test]
    fn exposes_pattern_and_path() {
        let mw = PathExposingMiddleware::new("/pets/{id}", "/pets/7");
        let mut ctx = RequestContext::new(Method::GET, "/pets/7");
        assert!(mw.before(&mut ctx).is_none());
        assert_eq!(store::best_matching_pattern(&ctx), Some("/pets/{id}"));
        assert_eq!(store::path_within_mapping(&ctx), Some("/pets/7"));
        assert!(store::backing_object(&ctx).is_none());
    }
}
