use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by cross-encoder load/scoring.
pub enum CrossEncoderError {
    /// Model directory was not found.
    #[error("cross-encoder model not found at path: {path}")]
    ModelNotFound {
        /// Missing model path.
        path: PathBuf,
    },

    /// Model load failed.
    #[error("failed to load cross-encoder model: {reason}")]
    ModelLoadFailed {
        /// Error message.
        reason: String,
    },

    /// Inference failed.
    #[error("cross-encoder inference failed: {reason}")]
    InferenceFailed {
        /// Error message.
        reason: String,
    },

    /// Tokenization failed.
    #[error("tokenization failed: {reason}")]
    TokenizationFailed {
        /// Error message.
        reason: String,
    },

    /// Configuration is invalid.
    #[error("invalid cross-encoder configuration: {reason}")]
    InvalidConfig {
        /// Error message.
        reason: String,
    },
}

impl From<candle_core::Error> for CrossEncoderError {
    fn from(err: candle_core::Error) -> Self {
        CrossEncoderError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for CrossEncoderError {
    fn from(err: std::io::Error) -> Self {
        CrossEncoderError::ModelLoadFailed {
            reason: err.to_string(),
        }
    }
}
