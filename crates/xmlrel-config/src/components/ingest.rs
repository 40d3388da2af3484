//! Ingestion configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// When decomposed records become durable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitMode {
    /// Every tag and attribute is committed as it is emitted, before the
    /// element's children are visited. A failure part-way through leaves the
    /// already-emitted records visible.
    #[default]
    Incremental,
    /// The file row and all of its tags and attributes are committed in a
    /// single transaction once the whole tree has been decomposed.
    Transactional,
}

impl fmt::Display for CommitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitMode::Incremental => write!(f, "incremental"),
            CommitMode::Transactional => write!(f, "transactional"),
        }
    }
}

impl FromStr for CommitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "incremental" => Ok(CommitMode::Incremental),
            "transactional" => Ok(CommitMode::Transactional),
            other => Err(format!("unknown commit mode '{other}'")),
        }
    }
}

/// Ingestion configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Durability policy for decomposed records
    pub commit_mode: CommitMode,
    /// Deepest element nesting accepted from an uploaded document
    pub max_depth: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            commit_mode: CommitMode::Incremental,
            max_depth: 1024,
        }
    }
}
