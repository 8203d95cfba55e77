//! Deterministic scorers for tests (enabled with `cfg(test)` or the `mock` feature).

use std::collections::HashSet;

use super::RelevanceScorer;
use super::error::ScoringError;

/// Share of the query's characters (counted per distinct word) that also appear
/// as whole words in the document. Always in `[0, 1]`; longer shared words weigh more.
#[derive(Debug, Clone)]
pub struct LexicalScorer {
    model_name: String,
}

impl LexicalScorer {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
        }
    }

    pub fn score(&self, query: &str, document: &str) -> f32 {
        let query_words = words(query);
        let total: usize = query_words.iter().map(|w| w.len()).sum();
        if total == 0 {
            return 0.0;
        }

        let document_words = words(document);
        let shared: usize = query_words
            .intersection(&document_words)
            .map(|w| w.len())
            .sum();

        shared as f32 / total as f32
    }
}

fn words(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

impl RelevanceScorer for LexicalScorer {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn score_batch(&self, query: &str, documents: &[String]) -> Result<Vec<f32>, ScoringError> {
        Ok(documents
            .iter()
            .map(|document| self.score(query, document))
            .collect())
    }
}

/// Scorer whose every call fails; exercises the 500 path.
#[derive(Debug, Clone)]
pub struct FailingScorer {
    model_name: String,
}

impl FailingScorer {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
        }
    }
}

impl RelevanceScorer for FailingScorer {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn score_batch(&self, _query: &str, _documents: &[String]) -> Result<Vec<f32>, ScoringError> {
        Err(ScoringError::ComputationFailed {
            reason: "device lost".to_string(),
        })
    }
}
