use super::*;
use crate::constants::MODEL_WEIGHTS_FILE;
use axum::{Router, extract::Path as UrlPath, http::StatusCode, routing::get};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Serves `/{org}/{repo}/resolve/main/{file}` for `BAAI/*` and 404s anything else.
async fn spawn_fake_hub() -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    let app = Router::new().route(
        "/{org}/{repo}/resolve/main/{file}",
        get(
            move |UrlPath((org, repo, file)): UrlPath<(String, String, String)>| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    if org == "BAAI" {
                        Ok(format!("{org}/{repo}/{file}"))
                    } else {
                        Err(StatusCode::NOT_FOUND)
                    }
                }
            },
        ),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), hits)
}

#[test]
fn test_repo_dir_layout() {
    let client = HubClient::new("https://huggingface.co/", "/cache");

    assert_eq!(
        client.repo_dir("BAAI/bge-reranker-base").unwrap(),
        PathBuf::from("/cache/BAAI--bge-reranker-base")
    );
    assert_eq!(client.endpoint(), "https://huggingface.co");
    assert_eq!(
        client.file_url("BAAI/bge-reranker-base", "config.json"),
        "https://huggingface.co/BAAI/bge-reranker-base/resolve/main/config.json"
    );
}

#[test]
fn test_invalid_repo_ids() {
    let client = HubClient::new("https://huggingface.co", "/cache");

    for repo_id in ["", "no-slash", "/name", "org/", "a/b/c", "../x"] {
        assert!(
            matches!(
                client.repo_dir(repo_id),
                Err(HubError::InvalidRepoId { .. })
            ),
            "{repo_id:?} should be rejected"
        );
    }
}

#[tokio::test]
async fn test_fetch_model_downloads_all_files() {
    let (endpoint, hits) = spawn_fake_hub().await;
    let cache = TempDir::new().unwrap();
    let client = HubClient::new(endpoint, cache.path());

    let dir = client.fetch_model("BAAI/bge-reranker-base").await.unwrap();

    assert_eq!(dir, cache.path().join("BAAI--bge-reranker-base"));
    for file in MODEL_FILES {
        let body = std::fs::read_to_string(dir.join(file)).unwrap();
        assert_eq!(body, format!("BAAI/bge-reranker-base/{file}"));
    }
    assert_eq!(hits.load(Ordering::SeqCst), MODEL_FILES.len());
}

#[tokio::test]
async fn test_fetch_model_skips_present_files() {
    let (endpoint, hits) = spawn_fake_hub().await;
    let cache = TempDir::new().unwrap();
    let client = HubClient::new(endpoint, cache.path());

    client.fetch_model("BAAI/bge-reranker-base").await.unwrap();
    client.fetch_model("BAAI/bge-reranker-base").await.unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), MODEL_FILES.len());
}

#[tokio::test]
async fn test_fetch_model_reports_http_status() {
    let (endpoint, _) = spawn_fake_hub().await;
    let cache = TempDir::new().unwrap();
    let client = HubClient::new(endpoint, cache.path());

    let err = client.fetch_model("acme/missing").await.unwrap_err();

    match err {
        HubError::Status { url, status } => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/acme/missing/resolve/main/config.json"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let dir = cache.path().join("acme--missing");
    assert!(!dir.join("config.json").exists());
}

#[tokio::test]
async fn test_download_model_to_explicit_dir() {
    let (endpoint, _) = spawn_fake_hub().await;
    let target = TempDir::new().unwrap();
    let client = HubClient::new(endpoint, "/unused");

    let paths = client
        .download_model_to("BAAI/bge-reranker-v2-m3", &target.path().join("m3"), false)
        .await
        .unwrap();

    assert_eq!(paths.len(), 3);
    assert!(paths.iter().all(|p| p.is_file()));
}

#[tokio::test]
async fn test_download_model_to_overwrite_replaces_stale_files() {
    let (endpoint, hits) = spawn_fake_hub().await;
    let target = TempDir::new().unwrap();
    let client = HubClient::new(endpoint, "/unused");
    let weights = target.path().join(MODEL_WEIGHTS_FILE);
    std::fs::write(&weights, "truncated").unwrap();

    client
        .download_model_to("BAAI/bge-reranker-base", target.path(), false)
        .await
        .unwrap();
    assert_eq!(std::fs::read_to_string(&weights).unwrap(), "truncated");
    assert_eq!(hits.load(Ordering::SeqCst), MODEL_FILES.len() - 1);

    client
        .download_model_to("BAAI/bge-reranker-base", target.path(), true)
        .await
        .unwrap();
    assert_eq!(
        std::fs::read_to_string(&weights).unwrap(),
        format!("BAAI/bge-reranker-base/{MODEL_WEIGHTS_FILE}")
    );
    assert_eq!(hits.load(Ordering::SeqCst), 2 * MODEL_FILES.len() - 1);
}
