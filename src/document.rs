//! JSON form of an attribute tree.
//!
//! ```json
//! { "id": "ws-1", "attributes": { "name": "prod" }, "defaults": { "auto_apply": false } }
//! ```

use anyhow::{Context, Result};
use binding::{AttributeTree, Map};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Values set explicitly in configuration or state
    pub attributes: Map,
    /// Schema defaults, never written back as explicit values
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub defaults: Map,
}

impl TreeDocument {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid tree document in {}", path.display()))
    }

    pub fn into_tree(self) -> AttributeTree {
        AttributeTree::from_parts(self.id, self.attributes, self.defaults)
    }

    pub fn from_tree(tree: AttributeTree) -> Self {
        let (id, attributes, defaults) = tree.into_parts();
        Self {
            id,
            attributes,
            defaults,
        }
    }
}

/// Read a JSON file into any deserializable type
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Could not read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid {what} in {}", path.display()))
}
