use serde::{Deserialize, Serialize};

use crate::scoring::ScoredDocument;

/// `POST /v1/rerank` body (vLLM shape).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RerankRequest {
    pub query: String,
    pub documents: Vec<String>,
    /// Missing or empty selects the server's default model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Values `<= 0` mean "return everything".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_n: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RerankResponse {
    pub results: Vec<ScoredDocument>,
}

/// `GET /` body.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StatusResponse {
    pub status: String,
    pub service: String,
    pub loaded_models: Vec<String>,
    pub default_model: String,
    pub supported_models: Vec<String>,
    pub authentication: String,
}

/// One entry of `GET /v1/models`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModelCard {
    pub id: String,
    pub object: String,
    pub owned_by: String,
    pub loaded: bool,
    pub local_available: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ModelList {
    pub object: String,
    pub data: Vec<ModelCard>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthResponse {
    pub status: String,
}
