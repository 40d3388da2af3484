//! Storage component configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which store implementation backs the service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Durable SQLite database file
    #[default]
    Sqlite,
    /// Process-local store, lost on exit
    Memory,
}

/// Storage component configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Store implementation
    pub backend: StorageBackend,
    /// Database file (ignored for the memory backend)
    pub path: PathBuf,
    /// Enable write-ahead logging
    pub wal_mode: bool,
    /// How long a writer waits on a locked database
    pub busy_timeout_ms: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            path: PathBuf::from("./xmlrel.db"),
            wal_mode: true,
            busy_timeout_ms: 5000,
        }
    }
}
