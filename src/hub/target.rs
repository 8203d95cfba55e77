//! Where `rerank-download` puts a model.

use std::path::{Path, PathBuf};

use crate::registry::ModelRegistry;

use super::error::HubError;

/// Repository to fetch and the directory to write it into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub repo_id: String,
    pub dir: PathBuf,
}

impl DownloadTarget {
    /// Built-in names map to their remote id and default to their registry
    /// `local_path`. Anything else is taken as a repository id and needs `dir`.
    pub fn resolve(
        registry: &ModelRegistry,
        model: &str,
        dir: Option<PathBuf>,
    ) -> Result<Self, HubError> {
        let (repo_id, dir) = match (registry.get(model), dir) {
            (Some(spec), Some(dir)) => (spec.remote_id.clone(), dir),
            (Some(spec), None) => (spec.remote_id.clone(), spec.local_path.clone()),
            (None, Some(dir)) => (model.to_string(), dir),
            (None, None) => {
                return Err(HubError::TargetRequired {
                    model: model.to_string(),
                    supported: registry.names(),
                });
            }
        };

        Ok(Self { repo_id, dir })
    }

    /// Refuses a directory that already holds files unless `force` is set.
    pub fn check_writable(&self, force: bool) -> Result<(), HubError> {
        if !force && is_non_empty_dir(&self.dir)? {
            return Err(HubError::TargetNotEmpty {
                path: self.dir.clone(),
            });
        }
        Ok(())
    }
}

fn is_non_empty_dir(path: &Path) -> Result<bool, HubError> {
    if !path.is_dir() {
        return Ok(false);
    }

    let mut entries = std::fs::read_dir(path).map_err(|source| HubError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(entries.next().is_some())
}
