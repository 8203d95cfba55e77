use std::path::PathBuf;

use crate::constants::{DEFAULT_BATCH_SIZE, DEFAULT_MAX_SEQ_LEN};

#[derive(Debug, Clone)]
/// Configuration for [`CrossEncoder`](super::CrossEncoder).
pub struct CrossEncoderConfig {
    /// Directory containing `config.json`, `model.safetensors`, and `tokenizer.json`.
    pub model_dir: PathBuf,

    /// Tokenizer truncation length for a `(query, document)` pair.
    pub max_length: usize,

    /// Max pairs per forward pass.
    pub batch_size: usize,
}

impl CrossEncoderConfig {
    /// Creates a config for a model directory with default limits.
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: model_dir.into(),
            max_length: DEFAULT_MAX_SEQ_LEN,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Validates basic invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.model_dir.as_os_str().is_empty() {
            return Err("model_dir cannot be empty".to_string());
        }
        if self.max_length == 0 {
            return Err("max_length must be greater than 0".to_string());
        }
        if self.batch_size == 0 {
            return Err("batch_size must be greater than 0".to_string());
        }
        Ok(())
    }
}
