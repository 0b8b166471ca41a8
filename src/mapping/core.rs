use crate::context::normalize_lookup_path;
use crate::object::ObjectRef;
use anyhow::anyhow;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Source of path → backing object mappings, supplied by the embedding application.
pub trait MappingProvider: Send + Sync {
    /// Whether any object is currently associated with `path`.
    ///
    /// # Errors
    ///
    /// Provider-specific failures (backing store unavailable, etc.).
    fn is_path_mapped(&self, path: &str) -> anyhow::Result<bool>;

    /// The object associated with `path`.
    ///
    /// Only called after [`is_path_mapped`](Self::is_path_mapped) returned `true`
    /// for the same path.
    ///
    /// # Errors
    ///
    /// Provider-specific failures, including the mapping disappearing between the
    /// two calls.
    fn retrieve_backing_object(&self, path: &str) -> anyhow::Result<ObjectRef>;
}

impl<P: MappingProvider + ?Sized> MappingProvider for Arc<P> {
    fn is_path_mapped(&self, path: &str) -> anyhow::Result<bool> {
        (**self).is_path_mapped(path)
    }

    fn retrieve_backing_object(&self, path: &str) -> anyhow::Result<ObjectRef> {
        (**self).retrieve_backing_object(path)
    }
}

/// In-memory mapping table.
///
/// Entries can be added and removed while requests are being served; lookups take
/// a read lock, edits a write lock.
#[derive(Debug, Default)]
pub struct StaticMappingProvider {
    entries: RwLock<HashMap<String, ObjectRef>>,
}

impl StaticMappingProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(self, path: impl Into<String>, object: ObjectRef) -> Self {
        self.insert(path, object);
        self
    }

    /// Map `path` to `object`, returning the object previously mapped there.
    ///
    /// `path` is keyed in lookup form (percent-decoded, `/`-prefixed, repeated
    /// separators collapsed), so `/caf%C3%A9` and `/café` name the same entry.
    pub fn insert(&self, path: impl Into<String>, object: ObjectRef) -> Option<ObjectRef> {
        let path = table_key(&path.into());
        info!(path = %path, object_type = object.type_name(), "Backing object mapped");
        self.entries.write().insert(path, object)
    }

    /// Unmap `path`, given in either raw or lookup form.
    pub fn remove(&self, path: &str) -> Option<ObjectRef> {
        let path = table_key(path);
        let removed = self.entries.write().remove(&path);
        if removed.is_some() {
            info!(path = %path, "Backing object unmapped");
        }
        removed
    }

    /// Mapped paths, sorted.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.entries.read().keys().cloned().collect();
        paths.sort();
        paths
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

fn table_key(path: &str) -> String {
    normalize_lookup_path(path, "").unwrap_or_else(|| path.to_string())
}

impl MappingProvider for StaticMappingProvider {
    fn is_path_mapped(&self, path: &str) -> anyhow::Result<bool> {
        let mapped = self.entries.read().contains_key(path);
        debug!(path = %path, mapped, "Mapping table lookup");
        Ok(mapped)
    }

    fn retrieve_backing_object(&self, path: &str) -> anyhow::Result<ObjectRef> {
        self.entries
            .read()
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!("no backing object mapped for path '{path}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_path_returns_same_object() {
        let obj = ObjectRef::new(42u64);
        let provider = StaticMappingProvider::new().with("/custom/path", obj.clone());
        assert!(provider.is_path_mapped("/custom/path").unwrap());
        let fetched = provider.retrieve_backing_object("/custom/path").unwrap();
        assert!(fetched.ptr_eq(&obj));
    }

    #[test]
    fn unmapped_path_is_declined_and_fetch_fails() {
        let provider = StaticMappingProvider::new();
        assert!(!provider.is_path_mapped("/other").unwrap());
        let err = provider.retrieve_backing_object("/other").unwrap_err();
        assert!(err.to_string().contains("/other"));
    }

    #[test]
    fn insert_adds_leading_separator() {
        let provider = StaticMappingProvider::new();
        provider.insert("about", ObjectRef::new("about page"));
        assert!(provider.is_path_mapped("/about").unwrap());
        assert_eq!(provider.paths(), vec!["/about".to_string()]);
    }

    #[test]
    fn encoded_entry_matches_decoded_lookup() {
        let provider = StaticMappingProvider::new().with("/caf%C3%A9", ObjectRef::new(1u8));
        assert!(provider.is_path_mapped("/café").unwrap());
        assert_eq!(provider.paths(), vec!["/café".to_string()]);
        assert!(provider.remove("/caf%C3%A9").is_some());
        assert!(provider.is_empty());
    }

    #[test]
    fn repeated_separators_are_collapsed_in_keys() {
        let provider = StaticMappingProvider::new().with("/a//b", ObjectRef::new(2u8));
        assert!(provider.is_path_mapped("/a/b").unwrap());
        assert!(!provider.is_path_mapped("/a//b").unwrap());
        assert!(provider.remove("a///b").is_some());
    }

    #[test]
    fn entries_can_change_at_runtime() {
        let provider = Arc::new(StaticMappingProvider::new());
        assert!(provider.is_empty());
        let previous = provider.insert("/news", ObjectRef::new(1u8));
        assert!(previous.is_none());
        let previous = provider.insert("/news", ObjectRef::new(2u8));
        assert_eq!(previous.and_then(|o| o.downcast_ref::<u8>().copied()), Some(1));
        assert_eq!(provider.len(), 1);
        assert!(provider.remove("/news").is_some());
        assert!(!provider.is_path_mapped("/news").unwrap());
    }
}
