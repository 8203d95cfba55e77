//! Process-wide cache of loaded scoring models.
//!
//! Models are loaded on first use and never evicted or reloaded. Concurrent
//! first-time resolutions of the same name share a single load (moka's
//! `try_get_with`); a failed load is not cached, so the next request retries.

pub mod error;
pub mod loader;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(test)]
mod tests;

pub use error::CacheError;
pub use loader::{CrossEncoderLoader, ModelLoader, ModelSource};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockModelLoader;

use moka::future::Cache;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::registry::ModelRegistry;
use crate::scoring::RelevanceScorer;

/// Loaded models keyed by logical name.
pub struct ModelCache {
    registry: Arc<ModelRegistry>,
    loader: Arc<dyn ModelLoader>,
    models: Cache<String, Arc<dyn RelevanceScorer>>,
}

impl std::fmt::Debug for ModelCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelCache")
            .field("registry", &self.registry.names())
            .field("loaded", &self.loaded_models())
            .finish()
    }
}

impl ModelCache {
    /// Creates an empty, unbounded cache.
    pub fn new(registry: Arc<ModelRegistry>, loader: Arc<dyn ModelLoader>) -> Self {
        Self {
            registry,
            loader,
            models: Cache::builder().build(),
        }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Returns the cached model or loads it.
    pub async fn resolve(&self, name: &str) -> Result<Arc<dyn RelevanceScorer>, CacheError> {
        if let Some(model) = self.models.get(name).await {
            debug!(model = name, "Model cache hit");
            return Ok(model);
        }

        let spec = self.registry.require(name)?.clone();
        let source = ModelSource::for_spec(&spec);
        let loader = self.loader.clone();

        self.models
            .try_get_with(spec.name.clone(), async move {
                info!(model = %spec.name, source = %source, "Model not loaded, loading");
                let started = Instant::now();

                let model = loader.load(&spec, &source).await?;

                info!(
                    model = %spec.name,
                    source = source.kind(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Model loaded"
                );
                Ok::<_, CacheError>(model)
            })
            .await
            .map_err(|err| err.as_ref().clone())
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Names of loaded models, sorted.
    pub fn loaded_models(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .models
            .iter()
            .map(|(name, _)| name.as_ref().clone())
            .collect();
        names.sort();
        names
    }
}
