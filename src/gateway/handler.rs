use axum::{Json, extract::State};
use tracing::{info, instrument};

use crate::cache::CacheError;
use crate::constants::QUERY_LOG_PREFIX_CHARS;
use crate::gateway::error::GatewayError;
use crate::gateway::payload::{RerankRequest, RerankResponse};
use crate::gateway::state::AppState;
use crate::scoring::{format_ranking, rerank_documents};

#[instrument(skip(state, request), fields(model = tracing::field::Empty))]
pub async fn rerank_handler(
    State(state): State<AppState>,
    Json(request): Json<serde_json::Value>,
) -> Result<Json<RerankResponse>, GatewayError> {
    let request: RerankRequest = serde_json::from_value(request)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))?;

    if request.documents.is_empty() {
        return Err(GatewayError::InvalidRequest(
            "documents must not be empty".to_string(),
        ));
    }

    let model_name = state
        .effective_model(request.model.as_deref())
        .to_string();
    tracing::Span::current().record("model", tracing::field::display(&model_name));

    state
        .registry()
        .require(&model_name)
        .map_err(CacheError::from)?;

    let scorer = state.cache.resolve(&model_name).await?;

    info!(
        query = %query_prefix(&request.query),
        documents = request.documents.len(),
        model = %model_name,
        top_n = ?request.top_n,
        "Rerank request received"
    );

    let RerankRequest {
        query,
        documents,
        top_n,
        ..
    } = request;

    let results = tokio::task::spawn_blocking(move || {
        rerank_documents(scorer.as_ref(), &query, &documents, top_n)
    })
    .await
    .map_err(|e| GatewayError::Internal(format!("scoring task failed: {e}")))??;

    info!(
        returned = results.len(),
        model = %model_name,
        ranking = %format_ranking(&results),
        "Rerank complete"
    );

    Ok(Json(RerankResponse { results }))
}

fn query_prefix(query: &str) -> String {
    let mut prefix: String = query.chars().take(QUERY_LOG_PREFIX_CHARS).collect();
    if query.chars().nth(QUERY_LOG_PREFIX_CHARS).is_some() {
        prefix.push_str("...");
    }
    prefix
}
