//! Cross-encoder inference on candle.
//!
//! - [`classifier`] wraps BERT and XLM-RoBERTa sequence classifiers.
//! - [`cross_encoder`] tokenizes `(query, document)` pairs and runs batched forward passes.

/// Sequence-pair classifiers (BERT / XLM-RoBERTa).
pub mod classifier;
mod config;
/// Cross-encoder scorer.
pub mod cross_encoder;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// Tokenizer loading helpers.
pub mod tokenizer;


pub use classifier::{Architecture, SequenceClassifier};
pub use config::CrossEncoderConfig;
pub use cross_encoder::{CrossEncoder, sigmoid};
pub use error::CrossEncoderError;
