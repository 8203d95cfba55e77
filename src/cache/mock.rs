//! In-memory [`ModelLoader`] for tests (enabled with `cfg(test)` or the `mock` feature).

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::registry::ModelSpec;
use crate::scoring::{FailingScorer, LexicalScorer, RelevanceScorer};

use super::error::CacheError;
use super::loader::{ModelLoader, ModelSource};

/// Produces [`LexicalScorer`]s and records every load.
#[derive(Debug, Clone, Default)]
pub struct MockModelLoader {
    loads: Arc<AtomicUsize>,
    sources: Arc<Mutex<Vec<(String, ModelSource)>>>,
    failing_loads: Arc<HashSet<String>>,
    failing_scorers: Arc<HashSet<String>>,
    delay: Option<Duration>,
}

impl MockModelLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every load of `name` fails with [`CacheError::ModelLoad`].
    pub fn fail_load(mut self, name: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.failing_loads).insert(name.into());
        self
    }

    /// `name` loads, but its scorer fails every call.
    pub fn fail_scoring(mut self, name: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.failing_scorers).insert(name.into());
        self
    }

    /// Sleeps before completing each load (widens race windows in tests).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of load attempts so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// `(model, source)` for every load attempt, in order.
    pub fn sources(&self) -> Vec<(String, ModelSource)> {
        self.sources
            .lock()
            .map(|sources| sources.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ModelLoader for MockModelLoader {
    async fn load(
        &self,
        spec: &ModelSpec,
        source: &ModelSource,
    ) -> Result<Arc<dyn RelevanceScorer>, CacheError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut sources) = self.sources.lock() {
            sources.push((spec.name.clone(), source.clone()));
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing_loads.contains(&spec.name) {
            return Err(CacheError::ModelLoad {
                model: spec.name.clone(),
                reason: "corrupted weights".to_string(),
            });
        }

        if self.failing_scorers.contains(&spec.name) {
            return Ok(Arc::new(FailingScorer::new(spec.name.clone())));
        }

        Ok(Arc::new(LexicalScorer::new(spec.name.clone())))
    }
}
