//! HTTP gateway (Axum) exposing the vLLM-compatible rerank API.
//!
//! | Route | Auth | Purpose |
//! |---|---|---|
//! | `GET /` | no | service status, loaded/supported models |
//! | `GET /healthz` | no | liveness check |
//! | `GET /v1/models` | no | registered models with load/local state |
//! | `POST /v1/rerank` | API key when configured | rerank documents |

pub mod auth;
pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::{ErrorResponse, GatewayError};
pub use handler::rerank_handler;
pub use payload::{
    HealthResponse, ModelCard, ModelList, RerankRequest, RerankResponse, StatusResponse,
};
pub use state::AppState;

use crate::constants::SERVICE_NAME;

pub fn create_router_with_state(state: AppState) -> Router {
    let rerank_routes = Router::new()
        .route("/v1/rerank", post(rerank_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ));

    Router::new()
        .route("/", get(status_handler))
        .route("/healthz", get(health_handler))
        .route("/v1/models", get(list_models_handler))
        .merge(rerank_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tracing::instrument]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[tracing::instrument(skip(state))]
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    let authentication = if state.auth_enabled() {
        "enabled"
    } else {
        "disabled"
    };

    Json(StatusResponse {
        status: "running".to_string(),
        service: SERVICE_NAME.to_string(),
        loaded_models: state.cache.loaded_models(),
        default_model: state.default_model.clone(),
        supported_models: state.registry().names(),
        authentication: authentication.to_string(),
    })
}

#[tracing::instrument(skip(state))]
pub async fn list_models_handler(State(state): State<AppState>) -> Json<ModelList> {
    let data = state
        .registry()
        .iter()
        .map(|spec| ModelCard {
            id: spec.name.clone(),
            object: "model".to_string(),
            owned_by: spec.owned_by().to_string(),
            loaded: state.cache.is_loaded(&spec.name),
            local_available: spec.local_available(),
        })
        .collect();

    Json(ModelList {
        object: "list".to_string(),
        data,
    })
}
