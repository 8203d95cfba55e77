use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

use crate::gateway::error::GatewayError;
use crate::gateway::state::AppState;

/// Rejects the request unless it carries the configured API key.
///
/// Runs before the body is read, so unauthorized requests never reach validation.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, GatewayError> {
    if let Some(expected) = state.api_key.as_deref() {
        check_api_key(request.headers(), expected)?;
    }
    Ok(next.run(request).await)
}

/// Accepts `Bearer <key>` or a bare `<key>`; the token must equal `expected` exactly.
pub fn check_api_key(headers: &HeaderMap, expected: &str) -> Result<(), GatewayError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| GatewayError::Unauthorized("missing Authorization header".to_string()))?
        .to_str()
        .map_err(|_| GatewayError::Unauthorized("malformed Authorization header".to_string()))?;

    let token = value.strip_prefix("Bearer ").unwrap_or(value);

    if token != expected {
        return Err(GatewayError::Unauthorized("invalid API key".to_string()));
    }

    Ok(())
}
