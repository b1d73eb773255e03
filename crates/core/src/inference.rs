use crate::config::InferenceConfig;
use crate::error::Result;
use crate::naming;
use crate::project::{ProjectDescriptor, ProjectLocator, RootIdentifier, RootNamespaceReader};
use crate::trigger::TriggerGate;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace, warn};

/// Everything one lookup learned about a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inference {
    pub namespace: String,
    pub descriptor: ProjectDescriptor,
    pub root: RootIdentifier,
    pub relative_path: PathBuf,
}

/// A completion payload. Label, inserted text and detail are the namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub label: String,
    pub insert_text: String,
    pub detail: String,
}

impl Suggestion {
    pub fn new(namespace: String) -> Self {
        Self {
            label: namespace.clone(),
            insert_text: namespace.clone(),
            detail: namespace,
        }
    }
}

/// Stateless namespace inference. Each call re-reads the filesystem.
pub struct NamespaceEngine {
    config: InferenceConfig,
    gate: TriggerGate,
    locator: ProjectLocator,
    reader: RootNamespaceReader,
}

impl NamespaceEngine {
    pub fn new(config: InferenceConfig) -> Result<Self> {
        Ok(Self {
            gate: TriggerGate::new(&config)?,
            locator: ProjectLocator::new(&config),
            reader: RootNamespaceReader::new(&config)?,
            config,
        })
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Infers the namespace for `file` regardless of cursor context.
    ///
    /// `Ok(None)` means no descriptor was found or nothing usable came out of it.
    pub fn infer(&self, file: &Path) -> Result<Option<Inference>> {
        let file = normalize(&std::path::absolute(file)?);
        let Some(start) = file.parent() else {
            return Ok(None);
        };

        let Some(location) = self.locator.locate(start)? else {
            return Ok(None);
        };

        let Some(root) = self.reader.resolve(&location.descriptor) else {
            warn!(
                descriptor = %location.descriptor.full_path.display(),
                "descriptor has no usable root identifier"
            );
            return Ok(None);
        };

        let namespace = naming::synthesize_path(&root.value, &location.relative_path);
        if namespace.is_empty() {
            return Ok(None);
        }

        debug!(
            file = %file.display(),
            namespace = %namespace,
            root_source = ?root.source,
            "inferred namespace"
        );

        Ok(Some(Inference {
            namespace,
            descriptor: location.descriptor,
            root,
            relative_path: location.relative_path,
        }))
    }

    /// Gate plus inference. Failures are logged and yield no suggestion.
    pub fn suggest(&self, file: &Path, line_prefix: &str) -> Option<Suggestion> {
        if self.gate.is_script(file) {
            trace!(file = %file.display(), "script document, skipping");
            return None;
        }
        if !self.gate.is_namespace_declaration(line_prefix) {
            return None;
        }

        match self.infer(file) {
            Ok(inference) => inference.map(|i| Suggestion::new(i.namespace)),
            Err(e) => {
                warn!(file = %file.display(), "namespace lookup failed: {}", e);
                None
            }
        }
    }
}

/// Folds `.` and `..` lexically so the upward walk only visits real ancestors.
/// `..` at the root stays at the root.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last = normalized.components().next_back();
                match last {
                    Some(Component::Normal(_)) => {
                        normalized.pop();
                    }
                    Some(Component::RootDir | Component::Prefix(_)) => {}
                    _ => normalized.push(component),
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}
