use std::sync::Arc;

use crate::cache::ModelCache;
use crate::registry::ModelRegistry;

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<ModelCache>,

    pub default_model: String,

    pub api_key: Option<Arc<str>>,
}

impl AppState {
    pub fn new(cache: Arc<ModelCache>, default_model: impl Into<String>) -> Self {
        Self {
            cache,
            default_model: default_model.into(),
            api_key: None,
        }
    }

    /// Requires `Authorization: Bearer <key>` on rerank requests. Empty keys are ignored.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty()).map(Arc::from);
        self
    }

    pub fn registry(&self) -> &ModelRegistry {
        self.cache.registry()
    }

    pub fn auth_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Request's model if given and non-empty, else the default.
    pub fn effective_model<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .filter(|name| !name.is_empty())
            .unwrap_or(self.default_model.as_str())
    }
}
