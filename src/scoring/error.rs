use thiserror::Error;

use crate::inference::CrossEncoderError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("cross-encoder error: {0}")]
    CrossEncoder(#[from] CrossEncoderError),

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("scoring computation failed: {reason}")]
    ComputationFailed { reason: String },
}
