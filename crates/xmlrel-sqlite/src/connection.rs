//! SQLite connection management
//!
//! A single connection behind `Arc<Mutex<..>>`. SQLite allows one writer at a
//! time anyway, and the mutex keeps `last_insert_rowid` tied to the insert
//! that produced it.

use crate::config::SqliteConfig;
use crate::error::{SqliteError, SqliteResult};
use crate::schema;
use parking_lot::Mutex;
use rusqlite::Connection;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Shared handle to the xmlrel database
#[derive(Clone)]
pub struct SqlitePool {
    conn: Arc<Mutex<Connection>>,
}

impl SqlitePool {
    /// Open the database, configure it and bring the schema up to date
    pub fn new(config: SqliteConfig) -> SqliteResult<Self> {
        info!(path = %config.path.display(), "Opening xmlrel database");

        let conn = open(&config)?;
        configure(&conn, &config)?;
        schema::apply_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Fresh in-memory database
    pub fn memory() -> SqliteResult<Self> {
        Self::new(SqliteConfig::memory())
    }

    /// Execute a closure with the connection
    pub fn with_connection<F, T>(&self, f: F) -> SqliteResult<T>
    where
        F: FnOnce(&Connection) -> SqliteResult<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    /// Execute a closure with mutable access to the connection, needed for
    /// transactions
    pub fn with_connection_mut<F, T>(&self, f: F) -> SqliteResult<T>
    where
        F: FnOnce(&mut Connection) -> SqliteResult<T>,
    {
        let mut conn = self.conn.lock();
        f(&mut conn)
    }
}

fn open(config: &SqliteConfig) -> SqliteResult<Connection> {
    if config.is_memory() {
        return Ok(Connection::open_in_memory()?);
    }

    if let Some(parent) = config.path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            SqliteError::Connection(format!(
                "Failed to create directory {}: {e}",
                parent.display()
            ))
        })?;
    }
    Ok(Connection::open(&config.path)?)
}

fn configure(conn: &Connection, config: &SqliteConfig) -> SqliteResult<()> {
    if config.wal_mode {
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        debug!(journal_mode = %mode, "Journal mode set");
    }

    // Off by default in SQLite; tags and attributes rely on it
    conn.pragma_update(None, "foreign_keys", config.foreign_keys)?;
    conn.busy_timeout(Duration::from_millis(u64::from(config.busy_timeout_ms)))?;
    conn.pragma_update(None, "cache_size", config.cache_size)?;
    conn.pragma_update(None, "temp_store", "MEMORY")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_pool() {
        let pool = SqlitePool::memory().expect("Failed to create memory pool");

        pool.with_connection(|conn| {
            let result: i64 = conn.query_row("SELECT 1 + 1", [], |row| row.get(0))?;
            assert_eq!(result, 2);
            Ok(())
        })
        .expect("Query failed");
    }

    #[test]
    fn test_file_pool_uses_wal() {
        let dir = TempDir::new().unwrap();
        let pool = SqlitePool::new(SqliteConfig::new(dir.path().join("nested/test.db")))
            .expect("Failed to create pool");

        pool.with_connection(|conn| {
            let mode: String = conn.query_row("PRAGMA journal_mode;", [], |row| row.get(0))?;
            assert_eq!(mode.to_lowercase(), "wal");
            Ok(())
        })
        .expect("Query failed");
    }

    #[test]
    fn test_foreign_keys_on() {
        let pool = SqlitePool::memory().unwrap();
        let enabled: bool = pool
            .with_connection(|conn| {
                Ok(conn.query_row("PRAGMA foreign_keys;", [], |row| row.get(0))?)
            })
            .unwrap();
        assert!(enabled);
    }

    #[test]
    fn test_schema_applied() {
        let pool = SqlitePool::memory().expect("Failed to create pool");

        pool.with_connection(|conn| {
            let tables: Vec<String> = {
                let mut stmt = conn
                    .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")?;
                let rows = stmt.query_map([], |row| row.get(0))?;
                rows.filter_map(Result::ok).collect()
            };

            for table in ["files", "tags", "attributes", "schema_migrations"] {
                assert!(tables.contains(&table.to_string()), "missing {table}");
            }
            Ok(())
        })
        .expect("Failed to verify schema");
    }

    #[test]
    fn test_reopen_keeps_schema_version() {
        let dir = TempDir::new().unwrap();
        let config = SqliteConfig::new(dir.path().join("reopen.db"));

        drop(SqlitePool::new(config.clone()).unwrap());
        let pool = SqlitePool::new(config).unwrap();

        let version = pool.with_connection(schema::current_version).unwrap();
        assert_eq!(version, 1);
    }
}
