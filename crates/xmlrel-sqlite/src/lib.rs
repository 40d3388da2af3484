//! SQLite storage backend for xmlrel
//!
//! Implements [`XmlStore`](xmlrel_core::XmlStore) over a single SQLite
//! database holding the `files`, `tags` and `attributes` tables.
//!
//! ## Features
//!
//! - **Unique file names** enforced by the schema, not just by lookups
//! - **WAL mode** for concurrent readers alongside the single writer
//! - **Whole-document transactions** for transactional ingestion
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use xmlrel_sqlite::{SqliteConfig, SqlitePool, SqliteXmlStore};
//!
//! let pool = SqlitePool::new(SqliteConfig::new("./xmlrel.db"))?;
//! let store = Arc::new(SqliteXmlStore::new(pool));
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod schema;
pub mod store;

pub use config::SqliteConfig;
pub use connection::SqlitePool;
pub use error::{SqliteError, SqliteResult};
pub use store::SqliteXmlStore;
