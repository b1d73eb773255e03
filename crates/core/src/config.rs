use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DESCRIPTOR_EXTENSION: &str = "csproj";
pub const DEFAULT_MAX_DEPTH: usize = 25;
pub const DEFAULT_ROOT_ELEMENT: &str = "RootNamespace";
pub const DEFAULT_KEYWORD: &str = "namespace";

/// Knobs for namespace inference.
///
/// Every field is optional when deserialized, so a client can send
/// `{"maxDepth": 10}` and keep the remaining defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InferenceConfig {
    /// Extension identifying project descriptor files. A leading dot is optional.
    pub descriptor_extension: String,
    /// Number of directories inspected, the document's own directory included.
    pub max_depth: usize,
    /// Element inside the descriptor whose text overrides the file-name root.
    pub root_element: String,
    /// Declaration keyword that triggers a suggestion.
    pub keyword: String,
    /// Document extensions that never receive a suggestion.
    pub script_extensions: Vec<String>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            descriptor_extension: DEFAULT_DESCRIPTOR_EXTENSION.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            root_element: DEFAULT_ROOT_ELEMENT.to_string(),
            keyword: DEFAULT_KEYWORD.to_string(),
            script_extensions: vec!["csx".to_string()],
        }
    }
}

impl InferenceConfig {
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// File-name suffix a descriptor must end with, e.g. `.csproj`.
    pub fn descriptor_suffix(&self) -> String {
        format!(".{}", self.descriptor_extension.trim_start_matches('.'))
    }
}
