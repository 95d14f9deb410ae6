//! Server configuration.
//!
//! Read from the JSON file named by `COLONNADE_CONFIG` when it is set,
//! otherwise from `COLONNADE_*` environment variables with defaults.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use colonnade_storage::config::{Backend, DEFAULT_PAGE_SIZE, S3Config, StoreConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_BUCKET: &str = "colonnade";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for {var}: {value:?}")]
    InvalidVar { var: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
    #[serde(default)]
    pub store: StoreConfig,
    /// Load the demo conversations and sensor readings at startup.
    #[serde(default)]
    pub seed_demo: bool,
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

impl ServerConfig {
    /// Load from `COLONNADE_CONFIG` if set, otherwise from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os("COLONNADE_CONFIG") {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Self::from_lookup(|var| std::env::var(var).ok()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build from variables resolved by `lookup`. Unset variables take
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_raw = lookup("COLONNADE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw.parse().map_err(|_| ConfigError::InvalidVar {
            var: "COLONNADE_BIND",
            value: bind_raw.clone(),
        })?;

        let page_size = match lookup("COLONNADE_PAGE_SIZE") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                var: "COLONNADE_PAGE_SIZE",
                value: raw,
            })?,
            None => DEFAULT_PAGE_SIZE,
        };

        let backend_raw = lookup("COLONNADE_BACKEND").unwrap_or_else(|| "memory".to_string());
        let backend = match backend_raw.to_ascii_lowercase().as_str() {
            "memory" => Backend::InMemory,
            "s3" => Backend::S3(S3Config {
                bucket: lookup("COLONNADE_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
                region: lookup("AWS_REGION"),
                prefix: lookup("COLONNADE_PREFIX").unwrap_or_default(),
            }),
            _ => {
                return Err(ConfigError::InvalidVar {
                    var: "COLONNADE_BACKEND",
                    value: backend_raw,
                });
            }
        };

        let seed_demo = match lookup("COLONNADE_SEED_DEMO") {
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidVar {
                        var: "COLONNADE_SEED_DEMO",
                        value: raw,
                    });
                }
            },
            None => backend == Backend::InMemory,
        };

        Ok(Self {
            bind,
            store: StoreConfig { backend, page_size },
            seed_demo,
        })
    }
}
