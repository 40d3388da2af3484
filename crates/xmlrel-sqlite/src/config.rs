//! SQLite connection settings

use std::path::{Path, PathBuf};
use xmlrel_config::StorageConfig;

/// Path sentinel for an in-memory database
pub const MEMORY_PATH: &str = ":memory:";

/// SQLite connection settings
#[derive(Debug, Clone, PartialEq)]
pub struct SqliteConfig {
    pub path: PathBuf,
    pub wal_mode: bool,
    pub foreign_keys: bool,
    pub busy_timeout_ms: u32,
    /// Negative values are KiB, positive values are pages
    pub cache_size: i64,
}

impl SqliteConfig {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            wal_mode: true,
            foreign_keys: true,
            busy_timeout_ms: 5000,
            cache_size: -8000,
        }
    }

    /// In-memory database, mainly for tests
    pub fn memory() -> Self {
        Self {
            wal_mode: false,
            ..Self::new(MEMORY_PATH)
        }
    }

    pub fn is_memory(&self) -> bool {
        self.path.as_os_str() == MEMORY_PATH
    }
}

impl From<&StorageConfig> for SqliteConfig {
    fn from(config: &StorageConfig) -> Self {
        Self {
            wal_mode: config.wal_mode,
            busy_timeout_ms: config.busy_timeout_ms,
            ..Self::new(&config.path)
        }
    }
}
