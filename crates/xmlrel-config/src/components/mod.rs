//! Configuration components
//!
//! Each section of the config file maps to one component struct.

mod ingest;
mod logging;
mod server;
mod storage;

pub use ingest::{CommitMode, IngestConfig};
pub use logging::LoggingConfig;
pub use server::ServerConfig;
pub use storage::{StorageBackend, StorageConfig};

use serde::{Deserialize, Serialize};

/// Top-level service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XmlrelConfig {
    /// Database settings
    pub storage: StorageConfig,
    /// HTTP server settings
    pub server: ServerConfig,
    /// Document ingestion settings
    pub ingest: IngestConfig,
    /// Log output settings
    pub logging: LoggingConfig,
}
