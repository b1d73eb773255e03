use crate::config::InferenceConfig;
use crate::error::{NsfillError, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// A project descriptor file found next to, or above, a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDescriptor {
    pub file_name: String,
    pub containing_directory: PathBuf,
    pub full_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectLocation {
    pub descriptor: ProjectDescriptor,
    /// Start directory relative to the descriptor's directory. Empty at the project root.
    pub relative_path: PathBuf,
}

/// Walks from a directory towards the filesystem root looking for a descriptor.
pub struct ProjectLocator {
    suffix: String,
    max_depth: usize,
}

impl ProjectLocator {
    pub fn new(config: &InferenceConfig) -> Self {
        Self {
            suffix: config.descriptor_suffix(),
            max_depth: config.max_depth,
        }
    }

    /// Inspects `start` and its ancestors, at most `max_depth` directories in total.
    ///
    /// Returns the nearest directory holding a descriptor, or `None` once the
    /// bound or the filesystem root is reached. A directory that cannot be
    /// listed aborts the walk with [`NsfillError::ReadDir`].
    pub fn locate(&self, start: &Path) -> Result<Option<ProjectLocation>> {
        let mut current = Some(start);

        for depth in 0..self.max_depth {
            let Some(dir) = current else {
                break;
            };

            if let Some(descriptor) = self.find_descriptor(dir)? {
                debug!(
                    descriptor = %descriptor.full_path.display(),
                    depth,
                    "found project descriptor"
                );
                let relative_path = start
                    .strip_prefix(dir)
                    .map(Path::to_path_buf)
                    .unwrap_or_default();
                return Ok(Some(ProjectLocation {
                    descriptor,
                    relative_path,
                }));
            }

            current = dir.parent();
        }

        debug!(
            start = %start.display(),
            max_depth = self.max_depth,
            "no project descriptor found"
        );
        Ok(None)
    }

    /// Picks the descriptor in `dir` with the smallest file name, so that
    /// directories with several projects resolve the same way on every platform.
    fn find_descriptor(&self, dir: &Path) -> Result<Option<ProjectDescriptor>> {
        let read_dir_error = |source| NsfillError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut chosen: Option<String> = None;
        for entry in fs::read_dir(dir).map_err(read_dir_error)? {
            let entry = entry.map_err(read_dir_error)?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if !self.is_descriptor_name(name) {
                continue;
            }
            if entry.file_type().map(|t| t.is_dir()).unwrap_or(true) {
                trace!(dir = %dir.display(), name, "skipping directory named like a descriptor");
                continue;
            }
            if chosen.as_deref().is_none_or(|current| name < current) {
                chosen = Some(name.to_string());
            }
        }

        Ok(chosen.map(|file_name| ProjectDescriptor {
            full_path: dir.join(&file_name),
            containing_directory: dir.to_path_buf(),
            file_name,
        }))
    }

    fn is_descriptor_name(&self, name: &str) -> bool {
        name.ends_with(&self.suffix)
    }
}
