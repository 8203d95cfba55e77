use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::hub::HubClient;
use crate::inference::{CrossEncoder, CrossEncoderConfig};
use crate::registry::ModelSpec;
use crate::scoring::RelevanceScorer;

use super::error::CacheError;

/// Where a model is materialized from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// Existing local directory.
    Local(PathBuf),
    /// Hub repository identifier.
    Remote(String),
}

impl ModelSource {
    /// Prefers the local directory when it exists and is a directory.
    pub fn for_spec(spec: &ModelSpec) -> Self {
        if spec.has_local_dir() {
            ModelSource::Local(spec.local_path.clone())
        } else {
            ModelSource::Remote(spec.remote_id.clone())
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ModelSource::Local(_) => "local",
            ModelSource::Remote(_) => "remote",
        }
    }
}

impl std::fmt::Display for ModelSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelSource::Local(path) => write!(f, "local:{}", path.display()),
            ModelSource::Remote(id) => write!(f, "remote:{}", id),
        }
    }
}

/// Materializes a scorer for a registered model.
#[async_trait]
pub trait ModelLoader: Send + Sync + 'static {
    async fn load(
        &self,
        spec: &ModelSpec,
        source: &ModelSource,
    ) -> Result<Arc<dyn RelevanceScorer>, CacheError>;
}

/// Loads [`CrossEncoder`]s, fetching remote models through a [`HubClient`] first.
#[derive(Debug, Clone)]
pub struct CrossEncoderLoader {
    hub: HubClient,
    batch_size: usize,
}

impl CrossEncoderLoader {
    pub fn new(hub: HubClient, batch_size: usize) -> Self {
        Self { hub, batch_size }
    }
}

#[async_trait]
impl ModelLoader for CrossEncoderLoader {
    async fn load(
        &self,
        spec: &ModelSpec,
        source: &ModelSource,
    ) -> Result<Arc<dyn RelevanceScorer>, CacheError> {
        let load_err = |reason: String| CacheError::ModelLoad {
            model: spec.name.clone(),
            reason,
        };

        let model_dir = match source {
            ModelSource::Local(path) => {
                info!(model = %spec.name, path = %path.display(), "Found local model");
                path.clone()
            }
            ModelSource::Remote(repo_id) => {
                warn!(
                    model = %spec.name,
                    local_path = %spec.local_path.display(),
                    "Local model not found, fetching from hub"
                );
                info!(repo_id = %repo_id, endpoint = self.hub.endpoint(), "Fetching model");
                self.hub
                    .fetch_model(repo_id)
                    .await
                    .map_err(|e| load_err(e.to_string()))?
            }
        };

        let config = CrossEncoderConfig::new(model_dir)
            .with_max_length(spec.max_length)
            .with_batch_size(self.batch_size);
        let name = spec.name.clone();

        let encoder = tokio::task::spawn_blocking(move || CrossEncoder::load(name, config))
            .await
            .map_err(|e| load_err(format!("load task failed: {e}")))?
            .map_err(|e| load_err(e.to_string()))?;

        Ok(Arc::new(encoder))
    }
}
