use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Represents a piece of content along with optional metadata.
/// Mirrors the LangChain document abstraction (`page_content` + `metadata`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Document {
    pub page_content: String,
    #[serde(default)]
    pub metadata: Value,
}

impl Document {
    pub fn new(page_content: impl Into<String>) -> Self {
        Self {
            page_content: page_content.into(),
            metadata: Value::Object(Default::default()),
        }
    }

    pub fn with_metadata(page_content: impl Into<String>, metadata: Value) -> Self {
        Self {
            page_content: page_content.into(),
            metadata,
        }
    }

    /// Raw metadata value stored under `key`.
    pub fn metadata_value(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    /// Metadata value under `key` when it is a string.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata_value(key).and_then(Value::as_str)
    }
}
