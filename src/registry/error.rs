use thiserror::Error;

/// Errors raised while building or querying the [`ModelRegistry`](super::ModelRegistry).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unsupported model: {model}. supported models: {supported:?}")]
    UnsupportedModel {
        model: String,
        supported: Vec<String>,
    },

    #[error("model registered twice: {name}")]
    DuplicateModel { name: String },

    #[error("invalid model spec: {reason}")]
    InvalidSpec { reason: String },

    #[error("model registry must contain at least one model")]
    Empty,
}
