//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `RERANK_*` environment variables
//! (and `HF_ENDPOINT` for a hub mirror).

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::constants::{DEFAULT_BATCH_SIZE, DEFAULT_HF_ENDPOINT, DEFAULT_MODEL_NAME};
use crate::registry::BUILTIN_MODELS;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `RERANK_*` overrides on top of defaults.
#[derive(Clone)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `0.0.0.0`.
    pub bind_addr: IpAddr,

    /// API key clients must present. `None` disables authentication.
    pub api_key: Option<String>,

    /// Model loaded at startup and used when a request names none.
    pub default_model: String,

    /// Root of the per-model local directories. Default: `./models`.
    pub models_dir: PathBuf,

    /// Destination for remote model downloads. Default: `./.cache/rerank`.
    pub cache_dir: PathBuf,

    /// Hugging Face compatible endpoint. Default: `https://huggingface.co`.
    pub hf_endpoint: String,

    /// Max `(query, document)` pairs per forward pass. Default: `32`.
    pub batch_size: usize,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("bind_addr", &self.bind_addr)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("default_model", &self.default_model)
            .field("models_dir", &self.models_dir)
            .field("cache_dir", &self.cache_dir)
            .field("hf_endpoint", &self.hf_endpoint)
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED),
            api_key: None,
            default_model: DEFAULT_MODEL_NAME.to_string(),
            models_dir: PathBuf::from("models"),
            cache_dir: PathBuf::from(".cache/rerank"),
            hf_endpoint: DEFAULT_HF_ENDPOINT.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "RERANK_PORT";
    const ENV_BIND_ADDR: &'static str = "RERANK_BIND_ADDR";
    const ENV_API_KEY: &'static str = "RERANK_API_KEY";
    const ENV_DEFAULT_MODEL: &'static str = "RERANK_DEFAULT_MODEL";
    const ENV_MODELS_DIR: &'static str = "RERANK_MODELS_DIR";
    const ENV_CACHE_DIR: &'static str = "RERANK_CACHE_DIR";
    const ENV_HF_ENDPOINT: &'static str = "HF_ENDPOINT";
    const ENV_BATCH_SIZE: &'static str = "RERANK_BATCH_SIZE";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let api_key = Self::parse_optional_string_from_env(Self::ENV_API_KEY);
        let default_model = Self::parse_optional_string_from_env(Self::ENV_DEFAULT_MODEL)
            .unwrap_or(defaults.default_model);
        let models_dir = Self::parse_path_from_env(Self::ENV_MODELS_DIR, defaults.models_dir);
        let cache_dir = Self::parse_path_from_env(Self::ENV_CACHE_DIR, defaults.cache_dir);
        let hf_endpoint = Self::parse_optional_string_from_env(Self::ENV_HF_ENDPOINT)
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or(defaults.hf_endpoint);
        let batch_size = Self::parse_batch_size_from_env(defaults.batch_size)?;

        Ok(Self {
            port,
            bind_addr,
            api_key,
            default_model,
            models_dir,
            cache_dir,
            hf_endpoint,
            batch_size,
        })
    }

    /// Validates paths and basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !BUILTIN_MODELS
            .iter()
            .any(|model| model.name == self.default_model)
        {
            return Err(ConfigError::UnknownDefaultModel {
                model: self.default_model.clone(),
                supported: BUILTIN_MODELS.iter().map(|m| m.name.to_string()).collect(),
            });
        }

        for path in [&self.models_dir, &self.cache_dir] {
            if path.exists() && !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if !(self.hf_endpoint.starts_with("http://") || self.hf_endpoint.starts_with("https://"))
        {
            return Err(ConfigError::InvalidHubEndpoint {
                value: self.hf_endpoint.clone(),
            });
        }

        Ok(())
    }

    /// Returns `true` when an API key is configured.
    pub fn auth_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        match self.bind_addr {
            IpAddr::V4(addr) => format!("{}:{}", addr, self.port),
            IpAddr::V6(addr) => format!("[{}]:{}", addr, self.port),
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_batch_size_from_env(default: usize) -> Result<usize, ConfigError> {
        match env::var(Self::ENV_BATCH_SIZE) {
            Ok(value) => match value.trim().parse::<usize>() {
                Ok(size) if size > 0 => Ok(size),
                _ => Err(ConfigError::InvalidBatchSize { value }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        Self::parse_optional_string_from_env(var_name)
            .map(PathBuf::from)
            .unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}
