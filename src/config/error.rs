//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// Batch size was zero or not a number.
    #[error("invalid batch size '{value}': must be a positive integer")]
    InvalidBatchSize { value: String },

    /// Default model is not one of the registered models.
    #[error("default model '{model}' is not supported; supported models: {supported:?}")]
    UnknownDefaultModel {
        model: String,
        supported: Vec<String>,
    },

    /// Hub endpoint is not an http(s) URL.
    #[error("invalid hub endpoint '{value}': must start with http:// or https://")]
    InvalidHubEndpoint { value: String },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
