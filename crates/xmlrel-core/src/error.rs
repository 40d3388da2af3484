//! Error taxonomy for ingestion and queries

use thiserror::Error;

/// Errors surfaced by ingestion and query operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum XmlError {
    /// A file with this name has already been ingested
    #[error("File already exists: {0}")]
    DuplicateFile(String),

    /// The uploaded bytes are not a well-formed XML document
    #[error("Malformed XML: {0}")]
    MalformedInput(String),

    /// No file with this name has been ingested
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// The file exists but has no tag with this name
    #[error("Tag '{tag}' not found in file '{file}'")]
    TagNotFound { file: String, tag: String },

    /// The candidate file name is unusable
    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    /// The backing store failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl XmlError {
    /// True for the two query-miss variants
    pub fn is_not_found(&self) -> bool {
        matches!(self, XmlError::FileNotFound(_) | XmlError::TagNotFound { .. })
    }
}

/// Result type for xmlrel operations
pub type XmlResult<T> = Result<T, XmlError>;
