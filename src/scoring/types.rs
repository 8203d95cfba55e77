use serde::{Deserialize, Serialize};

/// A document's original position paired with its relevance score.
///
/// `index` always points into the request's document list as sent, never into
/// the sorted output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    /// 0-based position in the request's `documents`.
    pub index: usize,
    /// Higher is more relevant.
    pub relevance_score: f32,
}

impl ScoredDocument {
    pub fn new(index: usize, relevance_score: f32) -> Self {
        Self {
            index,
            relevance_score,
        }
    }
}

impl std::fmt::Display for ScoredDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "idx={}: {:.6}", self.index, self.relevance_score)
    }
}
