//! Rerank library crate (used by the server, the download helper and integration tests).
//!
//! A cross-encoder rerank service with a vLLM-compatible HTTP API. Given a query
//! and a list of documents it scores every `(query, document)` pair with a
//! cross-encoder and returns the documents' original indices ordered by
//! descending relevance.
//!
//! ## Modules
//! - [`config`]: environment-driven server configuration
//! - [`registry`]: logical model names and where their files live
//! - [`cache`]: process-wide, load-once model cache
//! - [`inference`]: candle cross-encoders (BERT and XLM-RoBERTa heads)
//! - [`scoring`]: the [`RelevanceScorer`] seam and the ranking rules
//! - [`hub`]: model file download from a Hugging Face compatible endpoint
//! - [`gateway`]: the Axum router and handlers
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod config;
pub mod constants;
pub mod gateway;
pub mod hub;
pub mod inference;
pub mod registry;
pub mod scoring;

#[cfg(any(test, feature = "mock"))]
pub use cache::MockModelLoader;
pub use cache::{CacheError, CrossEncoderLoader, ModelCache, ModelLoader, ModelSource};

pub use config::{Config, ConfigError};
pub use gateway::{AppState, GatewayError, create_router_with_state};
pub use hub::{DownloadTarget, HubClient, HubError};
pub use inference::{CrossEncoder, CrossEncoderConfig, CrossEncoderError};
pub use registry::{BUILTIN_MODELS, ModelRegistry, ModelSpec, RegistryError};
#[cfg(any(test, feature = "mock"))]
pub use scoring::{FailingScorer, LexicalScorer};
pub use scoring::{RelevanceScorer, ScoredDocument, ScoringError, rank_scores, rerank_documents};
