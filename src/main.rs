//! Rerank HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use rerank::cache::{CrossEncoderLoader, ModelCache};
use rerank::config::Config;
use rerank::gateway::{AppState, create_router_with_state};
use rerank::hub::HubClient;
use rerank::registry::ModelRegistry;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        default_model = %config.default_model,
        models_dir = %config.models_dir.display(),
        "Rerank server starting"
    );

    let registry = Arc::new(ModelRegistry::builtin(&config.models_dir));
    let hub = HubClient::new(config.hf_endpoint.clone(), config.cache_dir.clone());
    let loader = Arc::new(CrossEncoderLoader::new(hub, config.batch_size));
    let cache = Arc::new(ModelCache::new(registry, loader));

    tracing::info!(model = %config.default_model, "Loading default model...");
    cache
        .resolve(&config.default_model)
        .await
        .with_context(|| format!("failed to load default model '{}'", config.default_model))?;

    if config.auth_enabled() {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!("RERANK_API_KEY not set, authentication disabled");
    }

    let state =
        AppState::new(cache, config.default_model.clone()).with_api_key(config.api_key.clone());

    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Rerank server shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("RERANK_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8000);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(rt) = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    else {
        return 1;
    };

    rt.block_on(async {
        let Ok(client) = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
        else {
            return 1;
        };

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
