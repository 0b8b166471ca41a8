use crate::mapping::StaticMappingProvider;
use crate::object::ObjectRef;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;
use tracing::info;

/// Content item rendered by a widget handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Editorial page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// Runtime type a mapping entry's `value` is decoded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Widget,
    Page,
    /// Kept as raw JSON
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingEntry {
    pub path: String,
    pub kind: ContentKind,
    #[serde(default)]
    pub value: Value,
}

impl MappingEntry {
    /// Decode `value` into the object for this entry's kind.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` does not deserialize into the kind's type.
    pub fn to_object(&self) -> Result<ObjectRef> {
        let object = match self.kind {
            ContentKind::Widget => ObjectRef::new(
                serde_json::from_value::<Widget>(self.value.clone())
                    .with_context(|| format!("invalid widget for path '{}'", self.path))?,
            ),
            ContentKind::Page => ObjectRef::new(
                serde_json::from_value::<Page>(self.value.clone())
                    .with_context(|| format!("invalid page for path '{}'", self.path))?,
            ),
            ContentKind::Json => ObjectRef::new(self.value.clone()),
        };
        Ok(object)
    }
}

/// Top-level mapping file document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingFile {
    #[serde(default)]
    pub mappings: Vec<MappingEntry>,
}

/// Build a provider from YAML text. Later entries for the same path replace earlier ones.
///
/// # Errors
///
/// Returns an error for malformed YAML or entries whose value does not match their kind.
pub fn parse_mapping_table(yaml: &str) -> Result<StaticMappingProvider> {
    let file: MappingFile = serde_yaml::from_str(yaml).context("invalid mapping file")?;
    let provider = StaticMappingProvider::new();
    for entry in &file.mappings {
        provider.insert(entry.path.as_str(), entry.to_object()?);
    }
    Ok(provider)
}

/// Load a provider from a YAML mapping file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_mapping_file(path: &Path) -> Result<StaticMappingProvider> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read mapping file {}", path.display()))?;
    let provider = parse_mapping_table(&text)?;
    info!(
        file = %path.display(),
        mappings = provider.len(),
        "Mapping table loaded"
    );
    Ok(provider)
}

/// JSON view of a backing object for CLI output.
pub(crate) fn render(object: &ObjectRef) -> Value {
    if let Some(widget) = object.downcast_ref::<Widget>() {
        json!({ "kind": "widget", "widget": widget })
    } else if let Some(page) = object.downcast_ref::<Page>() {
        json!({ "kind": "page", "page": page })
    } else if let Some(value) = object.downcast_ref::<Value>() {
        json!({ "kind": "json", "value": value })
    } else {
        json!({ "kind": "opaque", "type": object.type_name() })
    }
}

/// Short kind label for `inspect` output.
pub(crate) fn kind_of(object: &ObjectRef) -> &'static str {
    if object.is::<Widget>() {
        "widget"
    } else if object.is::<Page>() {
        "page"
    } else if object.is::<Value>() {
        "json"
    } else {
        object.type_name()
    }
}
