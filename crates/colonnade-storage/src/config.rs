//! Engine configuration and the factory that turns it into a store.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client;
use crate::engine::WideColumnStore;
use crate::error::StorageError;
use crate::memory::MemoryStore;
use crate::s3::S3Store;

/// Rows fetched per engine round trip when no limit is smaller.
pub const DEFAULT_PAGE_SIZE: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Backend {
    #[default]
    InMemory,
    S3(S3Config),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct S3Config {
    pub bucket: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Key prefix under which all tables live, e.g. `"colonnade/"`.
    #[serde(default)]
    pub prefix: String,
}

impl StoreConfig {
    pub fn validate(&self) -> Result<(), StorageError> {
        if self.page_size == 0 {
            return Err(StorageError::Config("page_size must be >= 1".to_string()));
        }
        if let Backend::S3(s3) = &self.backend {
            if s3.bucket.is_empty() {
                return Err(StorageError::Config("S3 bucket name is empty".to_string()));
            }
            if !s3.prefix.is_empty() && !s3.prefix.ends_with('/') {
                return Err(StorageError::Config(format!(
                    "S3 prefix {:?} must end with '/'",
                    s3.prefix
                )));
            }
        }
        Ok(())
    }
}

/// Create the configured engine.
pub async fn build_store(config: &StoreConfig) -> Result<Arc<dyn WideColumnStore>, StorageError> {
    config.validate()?;
    match &config.backend {
        Backend::InMemory => {
            info!("using in-memory wide-column store");
            Ok(Arc::new(MemoryStore::new()))
        }
        Backend::S3(s3) => {
            info!(bucket = %s3.bucket, prefix = %s3.prefix, "using S3 wide-column store");
            let client = client::build_client(s3.region.as_deref()).await;
            Ok(Arc::new(S3Store::new(client, &s3.bucket, &s3.prefix)))
        }
    }
}
