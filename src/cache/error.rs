use thiserror::Error;

use crate::registry::RegistryError;

/// Errors returned by [`ModelCache::resolve`](super::ModelCache::resolve).
///
/// `Clone` because concurrent waiters on one load all receive the same failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Name is not in the registry.
    #[error("unsupported model: {model}. supported models: {supported:?}")]
    UnsupportedModel {
        model: String,
        supported: Vec<String>,
    },

    /// The scoring backend failed to materialize the model.
    #[error("failed to load model '{model}': {reason}")]
    ModelLoad { model: String, reason: String },
}

impl From<RegistryError> for CacheError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::UnsupportedModel { model, supported } => {
                CacheError::UnsupportedModel { model, supported }
            }
            other => CacheError::ModelLoad {
                model: String::new(),
                reason: other.to_string(),
            },
        }
    }
}
