use super::*;
use crate::registry::ModelSpec;
use std::time::Duration;
use tempfile::TempDir;

const BASE: &str = "BAAI/bge-reranker-base";
const LARGE: &str = "BAAI/bge-reranker-large";

fn cache_with(loader: MockModelLoader, models_dir: &std::path::Path) -> ModelCache {
    let registry = Arc::new(ModelRegistry::builtin(models_dir));
    ModelCache::new(registry, Arc::new(loader))
}

#[tokio::test]
async fn test_resolve_loads_once_then_hits() {
    let dir = TempDir::new().unwrap();
    let loader = MockModelLoader::new();
    let cache = cache_with(loader.clone(), dir.path());

    assert!(!cache.is_loaded(BASE));

    let first = cache.resolve(BASE).await.unwrap();
    let second = cache.resolve(BASE).await.unwrap();

    assert_eq!(first.model_name(), BASE);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(loader.load_count(), 1);
    assert!(cache.is_loaded(BASE));
}

#[tokio::test]
async fn test_resolve_unsupported_model() {
    let dir = TempDir::new().unwrap();
    let loader = MockModelLoader::new();
    let cache = cache_with(loader.clone(), dir.path());

    let err = cache.resolve("acme/unknown").await.unwrap_err();

    match err {
        CacheError::UnsupportedModel { model, supported } => {
            assert_eq!(model, "acme/unknown");
            assert!(supported.contains(&BASE.to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(loader.load_count(), 0);
    assert!(cache.loaded_models().is_empty());
}

#[tokio::test]
async fn test_concurrent_first_resolves_share_one_load() {
    let dir = TempDir::new().unwrap();
    let loader = MockModelLoader::new().with_delay(Duration::from_millis(100));
    let cache = Arc::new(cache_with(loader.clone(), dir.path()));

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let cache = cache.clone();
            tokio::spawn(async move { cache.resolve(LARGE).await })
        })
        .collect();

    let results = futures::future::join_all(tasks).await;
    let models: Vec<_> = results
        .into_iter()
        .map(|r| r.expect("task panicked").expect("resolve failed"))
        .collect();

    assert_eq!(loader.load_count(), 1);
    assert!(models.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
}

#[tokio::test]
async fn test_failed_load_is_not_cached() {
    let dir = TempDir::new().unwrap();
    let loader = MockModelLoader::new().fail_load(BASE);
    let cache = cache_with(loader.clone(), dir.path());

    for _ in 0..2 {
        let err = cache.resolve(BASE).await.unwrap_err();
        assert!(matches!(err, CacheError::ModelLoad { .. }));
        assert!(err.to_string().contains("corrupted weights"));
    }

    assert_eq!(loader.load_count(), 2);
    assert!(!cache.is_loaded(BASE));
}

#[tokio::test]
async fn test_source_prefers_local_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("bge-reranker-base")).unwrap();

    let loader = MockModelLoader::new();
    let cache = cache_with(loader.clone(), dir.path());

    cache.resolve(BASE).await.unwrap();
    cache.resolve(LARGE).await.unwrap();

    let sources = loader.sources();
    assert_eq!(
        sources,
        vec![
            (
                BASE.to_string(),
                ModelSource::Local(dir.path().join("bge-reranker-base"))
            ),
            (LARGE.to_string(), ModelSource::Remote(LARGE.to_string())),
        ]
    );
}

#[test]
fn test_local_path_that_is_a_file_falls_back_to_remote() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("bge-reranker-base"), b"not a dir").unwrap();

    let spec = ModelSpec::new(BASE, dir.path().join("bge-reranker-base"), BASE, 512);
    assert_eq!(ModelSource::for_spec(&spec), ModelSource::Remote(BASE.to_string()));
}

#[tokio::test]
async fn test_loaded_models_sorted() {
    let dir = TempDir::new().unwrap();
    let cache = cache_with(MockModelLoader::new(), dir.path());

    cache.resolve("BAAI/bge-reranker-v2-m3").await.unwrap();
    cache.resolve(BASE).await.unwrap();

    assert_eq!(
        cache.loaded_models(),
        vec![BASE.to_string(), "BAAI/bge-reranker-v2-m3".to_string()]
    );
}

#[tokio::test]
async fn test_cross_encoder_loader_reports_missing_local_files() {
    let dir = TempDir::new().unwrap();
    let model_dir = dir.path().join("bge-reranker-base");
    std::fs::create_dir(&model_dir).unwrap();

    let hub = crate::hub::HubClient::new("http://127.0.0.1:9", dir.path().join("cache"));
    let registry = Arc::new(ModelRegistry::builtin(dir.path()));
    let cache = ModelCache::new(registry, Arc::new(CrossEncoderLoader::new(hub, 4)));

    let err = cache.resolve(BASE).await.unwrap_err();

    match err {
        CacheError::ModelLoad { model, reason } => {
            assert_eq!(model, BASE);
            assert!(reason.contains("config.json"), "{reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
