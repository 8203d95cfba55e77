//! HTTP client helpers for tests.

use rerank::gateway::{ErrorResponse, ModelList, RerankRequest, RerankResponse, StatusResponse};
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    pub async fn rerank(&self, request: &RerankRequest) -> Result<RerankResponse, TestClientError> {
        let mut builder = self.client.post(self.url("/v1/rerank")).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let resp = builder.send().await?;
        let status = resp.status().as_u16();

        match status {
            200 => Ok(resp.json().await?),
            _ => {
                let body: ErrorResponse = resp.json().await?;
                Err(TestClientError::Api {
                    status,
                    detail: body.detail,
                })
            }
        }
    }

    pub async fn status(&self) -> Result<StatusResponse, TestClientError> {
        self.get_json("/").await
    }

    pub async fn models(&self) -> Result<ModelList, TestClientError> {
        self.get_json("/v1/models").await
    }

    pub async fn health(&self) -> Result<bool, TestClientError> {
        let resp = self.client.get(self.url("/healthz")).send().await?;
        Ok(resp.status().is_success())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, TestClientError> {
        let resp = self.client.get(self.url(path)).send().await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            let status = resp.status().as_u16();
            let detail = resp.text().await.unwrap_or_default();
            Err(TestClientError::Api { status, detail })
        }
    }
}

pub fn rerank_request(query: &str, documents: &[&str], top_n: Option<i64>) -> RerankRequest {
    RerankRequest {
        query: query.to_string(),
        documents: documents.iter().map(|d| d.to_string()).collect(),
        model: None,
        top_n,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error {status}: {detail}")]
    Api { status: u16, detail: String },
}

impl TestClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TestClientError::Api { status, .. } => Some(*status),
            TestClientError::RequestFailed(_) => None,
        }
    }
}
