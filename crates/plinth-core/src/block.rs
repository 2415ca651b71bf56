use serde::{Deserialize, Serialize};

/// Opaque handle naming whatever paints a validated block.
///
/// The core never interprets this beyond equality -- resolving the handle
/// to an actual component is the presentation layer's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RendererRef(pub String);

impl RendererRef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RendererRef {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// A stored block attached to a page (or to the global header/footer sets).
///
/// `data` is untrusted input: its shape is whatever the editor last saved,
/// and it must be validated against the catalog entry for `block_type`
/// before anything renders it. Ordering, visibility, and time-window
/// filtering are owned by the collaborator that supplies block lists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockRecord {
    /// Key into the schema catalog.
    #[serde(rename = "type")]
    pub block_type: String,
    /// Authoring-side label, not shown to visitors.
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub data: serde_json::Value,
}

const fn default_enabled() -> bool {
    true
}

impl BlockRecord {
    #[must_use]
    pub fn new(block_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            block_type: block_type.into(),
            title: String::new(),
            enabled: true,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn block_record_type_field_renames() {
        let record = BlockRecord::new("Banner", json!({"title": "Ok"}));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "Banner");
        assert!(value.get("block_type").is_none());
    }

    #[test]
    fn missing_authoring_fields_default() {
        let record: BlockRecord =
            serde_json::from_value(json!({"type": "Banner", "data": {}})).unwrap();
        assert!(record.enabled);
        assert!(record.title.is_empty());
    }
}
