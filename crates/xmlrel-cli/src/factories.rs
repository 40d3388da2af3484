//! Store construction from configuration

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::debug;
use xmlrel_config::{StorageBackend, StorageConfig};
use xmlrel_core::{MemoryStore, XmlStore};
use xmlrel_sqlite::{SqliteConfig, SqlitePool, SqliteXmlStore};

/// Open the configured store, creating the schema if needed
pub fn create_store(config: &StorageConfig) -> Result<Arc<dyn XmlStore>> {
    match config.backend {
        StorageBackend::Memory => {
            debug!("Using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Sqlite => {
            let pool = SqlitePool::new(SqliteConfig::from(config)).with_context(|| {
                format!("Failed to open database at {}", config.path.display())
            })?;
            Ok(Arc::new(SqliteXmlStore::new(pool)))
        }
    }
}
