//! Model file fetcher for Hugging Face compatible endpoints.
//!
//! Files are fetched from `{endpoint}/{org}/{name}/resolve/main/{file}` and written
//! through a temp file in the target directory, so a partially downloaded file is
//! never mistaken for a complete one. Files already present are skipped
//! unless the caller asks to overwrite them.

pub mod error;
pub mod target;

#[cfg(test)]
mod tests;

pub use error::HubError;
pub use target::DownloadTarget;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::constants::MODEL_FILES;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Downloads cross-encoder model files.
#[derive(Debug, Clone)]
pub struct HubClient {
    http: reqwest::Client,
    endpoint: String,
    cache_dir: PathBuf,
}

impl HubClient {
    pub fn new(endpoint: impl Into<String>, cache_dir: impl Into<PathBuf>) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            http,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            cache_dir: cache_dir.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Cache directory for `repo_id`: `BAAI/bge-reranker-base` -> `<cache_dir>/BAAI--bge-reranker-base`.
    pub fn repo_dir(&self, repo_id: &str) -> Result<PathBuf, HubError> {
        let (org, name) = split_repo_id(repo_id)?;
        Ok(self.cache_dir.join(format!("{org}--{name}")))
    }

    pub fn file_url(&self, repo_id: &str, file: &str) -> String {
        format!("{}/{}/resolve/main/{}", self.endpoint, repo_id, file)
    }

    /// Ensures every model file of `repo_id` is in the cache; returns the directory.
    pub async fn fetch_model(&self, repo_id: &str) -> Result<PathBuf, HubError> {
        let dir = self.repo_dir(repo_id)?;
        self.download_model_to(repo_id, &dir, false).await?;
        Ok(dir)
    }

    /// Downloads every model file of `repo_id` into `target_dir`.
    ///
    /// Files already present are kept unless `overwrite` is set.
    pub async fn download_model_to(
        &self,
        repo_id: &str,
        target_dir: &Path,
        overwrite: bool,
    ) -> Result<Vec<PathBuf>, HubError> {
        split_repo_id(repo_id)?;

        tokio::fs::create_dir_all(target_dir)
            .await
            .map_err(|source| HubError::Io {
                path: target_dir.to_path_buf(),
                source,
            })?;

        let mut paths = Vec::with_capacity(MODEL_FILES.len());
        for file in MODEL_FILES {
            let path = target_dir.join(file);
            if path.is_file() && !overwrite {
                debug!(path = %path.display(), "Model file already present");
            } else {
                self.download_file(repo_id, file, &path).await?;
            }
            paths.push(path);
        }

        Ok(paths)
    }

    async fn download_file(&self, repo_id: &str, file: &str, dest: &Path) -> Result<(), HubError> {
        let url = self.file_url(repo_id, file);
        info!(url = %url, dest = %dest.display(), "Downloading model file");

        let mut response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| HubError::Request {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(HubError::Status {
                url,
                status: response.status().as_u16(),
            });
        }

        let parent = dest.parent().unwrap_or_else(|| Path::new("."));
        let io_err = |source| HubError::Io {
            path: dest.to_path_buf(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(parent).map_err(io_err)?;
        let mut written: u64 = 0;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|source| HubError::Request {
                url: url.clone(),
                source,
            })?
        {
            tmp.write_all(&chunk).map_err(io_err)?;
            written += chunk.len() as u64;
        }
        tmp.flush().map_err(io_err)?;
        tmp.persist(dest).map_err(|e| io_err(e.error))?;

        debug!(url = %url, bytes = written, "Model file downloaded");
        Ok(())
    }
}

fn split_repo_id(repo_id: &str) -> Result<(&str, &str), HubError> {
    match repo_id.split_once('/') {
        Some((org, name))
            if !org.is_empty() && !name.is_empty() && !name.contains('/') && org != ".." =>
        {
            Ok((org, name))
        }
        _ => Err(HubError::InvalidRepoId {
            repo_id: repo_id.to_string(),
        }),
    }
}
