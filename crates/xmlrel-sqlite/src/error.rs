//! Error types for SQLite storage

use thiserror::Error;
use xmlrel_core::XmlError;

/// SQLite storage error type
#[derive(Error, Debug)]
pub enum SqliteError {
    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Schema/migration error
    #[error("Schema error: {0}")]
    Schema(String),

    /// A file row with this name already exists
    #[error("Duplicate file: {0}")]
    DuplicateFile(String),

    /// Underlying rusqlite error
    #[error("SQLite error: {0}")]
    Rusqlite(#[from] rusqlite::Error),
}

/// Result type for SQLite operations
pub type SqliteResult<T> = Result<T, SqliteError>;

impl From<SqliteError> for XmlError {
    fn from(err: SqliteError) -> Self {
        match err {
            SqliteError::DuplicateFile(name) => XmlError::DuplicateFile(name),
            SqliteError::Connection(msg) | SqliteError::Schema(msg) => XmlError::Storage(msg),
            SqliteError::Rusqlite(e) => XmlError::Storage(e.to_string()),
        }
    }
}

/// True when `err` is a UNIQUE constraint failure
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
