use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::cache::CacheError;
use crate::scoring::ScoringError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("unsupported model: {model}. supported models: {supported:?}")]
    UnsupportedModel {
        model: String,
        supported: Vec<String>,
    },

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("model load failed: {0}")]
    ModelLoad(String),

    #[error("rerank failed: {0}")]
    ScoringFailed(#[from] ScoringError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CacheError> for GatewayError {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::UnsupportedModel { model, supported } => {
                GatewayError::UnsupportedModel { model, supported }
            }
            CacheError::ModelLoad { .. } => GatewayError::ModelLoad(err.to_string()),
        }
    }
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) | GatewayError::UnsupportedModel { .. } => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            GatewayError::ModelLoad(_)
            | GatewayError::ScoringFailed(_)
            | GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error body. `detail` mirrors `error` for clients written against FastAPI servers.
#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %message, "Request rejected");
        }

        let mut headers = HeaderMap::new();
        if status == StatusCode::UNAUTHORIZED {
            headers.insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        let body = Json(ErrorResponse {
            error: message.clone(),
            detail: message,
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
