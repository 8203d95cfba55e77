//! Logical model name to storage configuration.
//!
//! The registry is built once at startup and never mutated. Every name the
//! [`ModelCache`](crate::cache::ModelCache) can hold is a key here.

pub mod error;


pub use error::RegistryError;

use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_MAX_SEQ_LEN;

/// Compile-time catalog entry; `dir_name` is joined onto the models directory.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinModel {
    pub name: &'static str,
    pub dir_name: &'static str,
    pub remote_id: &'static str,
    pub max_length: usize,
}

/// Models served out of the box.
pub const BUILTIN_MODELS: [BuiltinModel; 3] = [
    BuiltinModel {
        name: "BAAI/bge-reranker-base",
        dir_name: "bge-reranker-base",
        remote_id: "BAAI/bge-reranker-base",
        max_length: DEFAULT_MAX_SEQ_LEN,
    },
    BuiltinModel {
        name: "BAAI/bge-reranker-large",
        dir_name: "bge-reranker-large",
        remote_id: "BAAI/bge-reranker-large",
        max_length: DEFAULT_MAX_SEQ_LEN,
    },
    BuiltinModel {
        name: "BAAI/bge-reranker-v2-m3",
        dir_name: "bge-reranker-v2-m3",
        remote_id: "BAAI/bge-reranker-v2-m3",
        max_length: DEFAULT_MAX_SEQ_LEN,
    },
];

/// Storage configuration of one supported model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    /// Logical name clients send in `model`.
    pub name: String,
    /// Directory preferred over a remote fetch when it exists.
    pub local_path: PathBuf,
    /// Hub repository identifier (`org/repo`).
    pub remote_id: String,
    /// Tokenizer truncation length for a `(query, document)` pair.
    pub max_length: usize,
}

impl ModelSpec {
    pub fn new(
        name: impl Into<String>,
        local_path: impl Into<PathBuf>,
        remote_id: impl Into<String>,
        max_length: usize,
    ) -> Self {
        Self {
            name: name.into(),
            local_path: local_path.into(),
            remote_id: remote_id.into(),
            max_length,
        }
    }

    /// Organisation prefix of the remote identifier, `"unknown"` if there is none.
    pub fn owned_by(&self) -> &str {
        match self.remote_id.split_once('/') {
            Some((org, _)) if !org.is_empty() => org,
            _ => "unknown",
        }
    }

    /// `true` when `local_path` exists and is a directory.
    pub fn has_local_dir(&self) -> bool {
        self.local_path.is_dir()
    }

    /// `true` when anything exists at `local_path`.
    pub fn local_available(&self) -> bool {
        self.local_path.exists()
    }
}

/// Immutable, ordered set of supported models.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    models: Vec<ModelSpec>,
}

impl ModelRegistry {
    /// Builds a registry from explicit specs; names must be unique and non-empty.
    pub fn new(models: Vec<ModelSpec>) -> Result<Self, RegistryError> {
        if models.is_empty() {
            return Err(RegistryError::Empty);
        }

        for (i, spec) in models.iter().enumerate() {
            if spec.name.trim().is_empty() {
                return Err(RegistryError::InvalidSpec {
                    reason: format!("model #{i} has an empty name"),
                });
            }
            if spec.max_length == 0 {
                return Err(RegistryError::InvalidSpec {
                    reason: format!("model '{}' has max_length 0", spec.name),
                });
            }
            if models[..i].iter().any(|other| other.name == spec.name) {
                return Err(RegistryError::DuplicateModel {
                    name: spec.name.clone(),
                });
            }
        }

        Ok(Self { models })
    }

    /// The built-in catalog with local directories rooted at `models_dir`.
    pub fn builtin(models_dir: impl AsRef<Path>) -> Self {
        let models_dir = models_dir.as_ref();
        let models = BUILTIN_MODELS
            .iter()
            .map(|m| {
                ModelSpec::new(
                    m.name,
                    models_dir.join(m.dir_name),
                    m.remote_id,
                    m.max_length,
                )
            })
            .collect();
        Self { models }
    }

    pub fn get(&self, name: &str) -> Option<&ModelSpec> {
        self.models.iter().find(|spec| spec.name == name)
    }

    /// Like [`get`](Self::get) but reports the supported set on a miss.
    pub fn require(&self, name: &str) -> Result<&ModelSpec, RegistryError> {
        self.get(name)
            .ok_or_else(|| RegistryError::UnsupportedModel {
                model: name.to_string(),
                supported: self.names(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Supported names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.models.iter().map(|spec| spec.name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelSpec> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
