use std::cmp::Ordering;
use tracing::debug;

use super::RelevanceScorer;
use super::error::ScoringError;
use super::types::ScoredDocument;

/// Scores every document against `query` and ranks the results.
pub fn rerank_documents(
    scorer: &dyn RelevanceScorer,
    query: &str,
    documents: &[String],
    top_n: Option<i64>,
) -> Result<Vec<ScoredDocument>, ScoringError> {
    if documents.is_empty() {
        return Err(ScoringError::InvalidInput {
            reason: "documents must not be empty".to_string(),
        });
    }

    debug!(
        model = scorer.model_name(),
        query_len = query.len(),
        num_documents = documents.len(),
        "Scoring documents"
    );

    let scores = scorer.score_batch(query, documents)?;
    if scores.len() != documents.len() {
        return Err(ScoringError::ComputationFailed {
            reason: format!(
                "scorer returned {} scores for {} documents",
                scores.len(),
                documents.len()
            ),
        });
    }

    let ranked = rank_scores(scores, top_n);

    debug!(
        top_score = ranked.first().map(|d| d.relevance_score),
        returned = ranked.len(),
        "Reranking complete"
    );

    Ok(ranked)
}

/// Orders `scores` (indexed by original position) descending and applies `top_n`.
pub fn rank_scores(scores: Vec<f32>, top_n: Option<i64>) -> Vec<ScoredDocument> {
    let mut ranked: Vec<ScoredDocument> = scores
        .into_iter()
        .enumerate()
        .map(|(index, score)| ScoredDocument::new(index, score))
        .collect();

    // `sort_by` is stable: ties keep ascending original index.
    ranked.sort_by(|a, b| descending(a.relevance_score, b.relevance_score));

    if let Some(n) = top_n.filter(|n| *n > 0) {
        ranked.truncate(usize::try_from(n).unwrap_or(usize::MAX));
    }

    ranked
}

/// Renders `rank=1->idx=3: 0.912345, ...` for request logs.
pub fn format_ranking(ranked: &[ScoredDocument]) -> String {
    if ranked.is_empty() {
        return "(empty)".to_string();
    }

    ranked
        .iter()
        .enumerate()
        .map(|(rank, doc)| format!("rank={}->{}", rank + 1, doc))
        .collect::<Vec<_>>()
        .join(", ")
}

fn descending(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
