//! Relevance scoring and ranking.
//!
//! [`RelevanceScorer`] is the seam between request handling and inference: the
//! gateway only ever sees `score_batch(query, documents) -> Vec<f32>`. The
//! candle-backed [`CrossEncoder`](crate::inference::CrossEncoder) implements it for
//! real models; [`LexicalScorer`] stands in for tests.
//!
//! [`rank_scores`] turns raw scores into the response ordering:
//! - descending by score, stable, so equal scores keep ascending original index
//! - NaN scores sort after every number
//! - `top_n > 0` truncates, `top_n <= 0` or `None` returns everything

pub mod error;
pub mod scorer;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use error::ScoringError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{FailingScorer, LexicalScorer};
pub use scorer::{format_ranking, rank_scores, rerank_documents};
pub use types::ScoredDocument;

/// Scores `(query, document)` pairs with one loaded model.
///
/// Implementations must be deterministic for a fixed `(model, query, document)`
/// and must score pairs independently; they are free to batch internally.
pub trait RelevanceScorer: Send + Sync + std::fmt::Debug {
    /// Logical model name this scorer was loaded for.
    fn model_name(&self) -> &str;

    /// Returns one score per document, in document order. Higher is more relevant.
    fn score_batch(&self, query: &str, documents: &[String]) -> Result<Vec<f32>, ScoringError>;
}
