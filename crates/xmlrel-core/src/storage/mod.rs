//! Storage contract
//!
//! The decomposer only needs somewhere to put tags and attributes, so that
//! half of the contract is split out as [`RecordSink`]. [`XmlStore`] adds
//! file registration, the filtered reads the query engine needs, and the
//! whole-document commit used in transactional mode.
//!
//! Stores are injected as `Arc<dyn XmlStore>`; nothing here holds a global
//! connection.

mod buffered;
mod memory;

pub use buffered::BufferedSink;
pub use memory::MemoryStore;

use crate::error::XmlResult;
use crate::types::{
    AttributeId, AttributeRecord, FileId, FileRecord, PendingTag, StoreStats, TagId, TagRecord,
};
use async_trait::async_trait;

/// Destination for decomposed records.
///
/// For an [`XmlStore`], each call is durable and visible to readers once it
/// returns. [`BufferedSink`] only holds records until they are committed.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Insert a tag belonging to `file_id`
    async fn insert_tag(&self, file_id: FileId, name: &str) -> XmlResult<TagId>;

    /// Insert one attribute of `tag_id`
    async fn insert_attribute(
        &self,
        tag_id: TagId,
        name: &str,
        value: &str,
    ) -> XmlResult<AttributeId>;
}

/// Durable file/tag/attribute relation
#[async_trait]
pub trait XmlStore: RecordSink {
    /// Insert a file row.
    ///
    /// The store's uniqueness constraint on the name is authoritative: a
    /// duplicate fails with [`XmlError::DuplicateFile`](crate::XmlError::DuplicateFile)
    /// even if an earlier lookup saw the name as free.
    async fn insert_file(&self, name: &str) -> XmlResult<FileRecord>;

    /// Look a file up by exact name
    async fn find_file(&self, name: &str) -> XmlResult<Option<FileRecord>>;

    /// All tags of `file_id` named `name`
    async fn find_tags(&self, file_id: FileId, name: &str) -> XmlResult<Vec<TagRecord>>;

    /// All attributes of one tag
    async fn find_attributes(&self, tag_id: TagId) -> XmlResult<Vec<AttributeRecord>>;

    /// Register `file_name` and write every tag and attribute in one
    /// transaction. Either everything becomes visible or nothing does.
    async fn commit_document(
        &self,
        file_name: &str,
        tags: Vec<PendingTag>,
    ) -> XmlResult<FileRecord>;

    /// Row counts
    async fn stats(&self) -> XmlResult<StoreStats>;
}
