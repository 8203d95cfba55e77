//! Test server harness.

use rerank::cache::{MockModelLoader, ModelCache};
use rerank::constants::DEFAULT_MODEL_NAME;
use rerank::gateway::{AppState, create_router_with_state};
use rerank::registry::ModelRegistry;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub api_key: Option<String>,
    pub default_model: String,
    pub loader: MockModelLoader,
    /// Loads the default model before serving, like the real binary does.
    pub preload_default: bool,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_model: DEFAULT_MODEL_NAME.to_string(),
            loader: MockModelLoader::new(),
            preload_default: true,
        }
    }
}

impl TestServerConfig {
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_loader(mut self, loader: MockModelLoader) -> Self {
        self.loader = loader;
        self
    }

    pub fn without_preload(mut self) -> Self {
        self.preload_default = false;
        self
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub cache: Arc<ModelCache>,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    _models_dir: TempDir,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

/// Spawns a server on an ephemeral port backed by [`MockModelLoader`].
///
/// The built-in catalog is rooted at a fresh temp dir, so no model has a local
/// directory and every load goes through the mock.
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let local_addr = listener.local_addr()?;

    let models_dir = TempDir::new()?;
    let registry = Arc::new(ModelRegistry::builtin(models_dir.path()));
    let cache = Arc::new(ModelCache::new(registry, Arc::new(config.loader)));

    if config.preload_default {
        cache
            .resolve(&config.default_model)
            .await
            .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;
    }

    let state = AppState::new(cache.clone(), config.default_model).with_api_key(config.api_key);
    let app = create_router_with_state(state);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        cache,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
        _models_dir: models_dir,
    })
}
