//! Identifiers and persisted records

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

row_id!(
    /// Store-assigned identifier of a file row
    FileId
);
row_id!(
    /// Store-assigned identifier of a tag row
    TagId
);
row_id!(
    /// Store-assigned identifier of an attribute row
    AttributeId
);

/// One ingested document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: FileId,
    pub name: String,
}

/// One element occurrence, tied to its file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    pub id: TagId,
    pub name: String,
    pub file_id: FileId,
}

/// One attribute occurrence, tied to its tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRecord {
    pub id: AttributeId,
    pub name: String,
    pub value: String,
    pub tag_id: TagId,
}

/// A decomposed tag that has not been written yet.
///
/// Produced by [`BufferedSink`](crate::storage::BufferedSink) and committed
/// as a whole by [`XmlStore::commit_document`](crate::storage::XmlStore::commit_document).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingTag {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

/// Row counts across the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub files: u64,
    pub tags: u64,
    pub attributes: u64,
}
