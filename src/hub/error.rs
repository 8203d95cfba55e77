use std::path::PathBuf;
use thiserror::Error;

/// Errors returned while fetching model files from a hub endpoint.
#[derive(Debug, Error)]
pub enum HubError {
    #[error("invalid repository id '{repo_id}': expected 'org/name'")]
    InvalidRepoId { repo_id: String },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error(
        "'{model}' is not a built-in model; pass a target directory (built-in: {})",
        .supported.join(", ")
    )]
    TargetRequired {
        model: String,
        supported: Vec<String>,
    },

    #[error("{path} already exists and is not empty")]
    TargetNotEmpty { path: PathBuf },

    #[error("i/o error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
