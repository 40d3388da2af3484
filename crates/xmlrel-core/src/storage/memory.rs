//! In-memory store
//!
//! Mirrors the SQLite schema's constraints (unique file names, tags must
//! reference a file, attributes must reference a tag) so tests against it
//! behave like tests against a real database.
//!
//! Row ids are dense and start at 1, so a foreign key is valid exactly when
//! it falls inside `1..=len` of the referenced table.

use super::{RecordSink, XmlStore};
use crate::error::{XmlError, XmlResult};
use crate::types::{
    AttributeId, AttributeRecord, FileId, FileRecord, PendingTag, StoreStats, TagId, TagRecord,
};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Default)]
struct Tables {
    files: Vec<FileRecord>,
    /// File name to its index in `files`
    file_names: HashMap<String, usize>,
    tags: Vec<TagRecord>,
    attributes: Vec<AttributeRecord>,
}

/// Whether `id` names an existing row of a table holding `len` rows
fn contains_id(len: usize, id: i64) -> bool {
    usize::try_from(id).is_ok_and(|id| (1..=len).contains(&id))
}

fn next_id(len: usize) -> i64 {
    len as i64 + 1
}

impl Tables {
    fn insert_file(&mut self, name: &str) -> XmlResult<FileRecord> {
        if self.file_names.contains_key(name) {
            return Err(XmlError::DuplicateFile(name.to_string()));
        }
        let record = FileRecord {
            id: FileId(next_id(self.files.len())),
            name: name.to_string(),
        };
        self.file_names.insert(record.name.clone(), self.files.len());
        self.files.push(record.clone());
        Ok(record)
    }

    fn find_file(&self, name: &str) -> Option<&FileRecord> {
        self.file_names.get(name).map(|&index| &self.files[index])
    }

    fn insert_tag(&mut self, file_id: FileId, name: &str) -> XmlResult<TagId> {
        if !contains_id(self.files.len(), file_id.0) {
            return Err(XmlError::Storage(format!(
                "tag references missing file {file_id}"
            )));
        }
        let id = TagId(next_id(self.tags.len()));
        self.tags.push(TagRecord {
            id,
            name: name.to_string(),
            file_id,
        });
        Ok(id)
    }

    fn insert_attribute(
        &mut self,
        tag_id: TagId,
        name: &str,
        value: &str,
    ) -> XmlResult<AttributeId> {
        if !contains_id(self.tags.len(), tag_id.0) {
            return Err(XmlError::Storage(format!(
                "attribute references missing tag {tag_id}"
            )));
        }
        let id = AttributeId(next_id(self.attributes.len()));
        self.attributes.push(AttributeRecord {
            id,
            name: name.to_string(),
            value: value.to_string(),
            tag_id,
        });
        Ok(id)
    }
}

/// Process-local [`XmlStore`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordSink for MemoryStore {
    async fn insert_tag(&self, file_id: FileId, name: &str) -> XmlResult<TagId> {
        self.tables.write().insert_tag(file_id, name)
    }

    async fn insert_attribute(
        &self,
        tag_id: TagId,
        name: &str,
        value: &str,
    ) -> XmlResult<AttributeId> {
        self.tables.write().insert_attribute(tag_id, name, value)
    }
}

#[async_trait]
impl XmlStore for MemoryStore {
    async fn insert_file(&self, name: &str) -> XmlResult<FileRecord> {
        self.tables.write().insert_file(name)
    }

    async fn find_file(&self, name: &str) -> XmlResult<Option<FileRecord>> {
        Ok(self.tables.read().find_file(name).cloned())
    }

    async fn find_tags(&self, file_id: FileId, name: &str) -> XmlResult<Vec<TagRecord>> {
        Ok(self
            .tables
            .read()
            .tags
            .iter()
            .filter(|t| t.file_id == file_id && t.name == name)
            .cloned()
            .collect())
    }

    async fn find_attributes(&self, tag_id: TagId) -> XmlResult<Vec<AttributeRecord>> {
        Ok(self
            .tables
            .read()
            .attributes
            .iter()
            .filter(|a| a.tag_id == tag_id)
            .cloned()
            .collect())
    }

    async fn commit_document(
        &self,
        file_name: &str,
        tags: Vec<PendingTag>,
    ) -> XmlResult<FileRecord> {
        // One write lock for the whole document, so readers see all or nothing
        let mut tables = self.tables.write();
        let file = tables.insert_file(file_name)?;
        for tag in &tags {
            let tag_id = tables.insert_tag(file.id, &tag.name)?;
            for (name, value) in &tag.attributes {
                tables.insert_attribute(tag_id, name, value)?;
            }
        }
        debug!(file = %file_name, tags = tags.len(), "Committed document to memory store");
        Ok(file)
    }

    async fn stats(&self) -> XmlResult<StoreStats> {
        let tables = self.tables.read();
        Ok(StoreStats {
            files: tables.files.len() as u64,
            tags: tables.tags.len() as u64,
            attributes: tables.attributes.len() as u64,
        })
    }
}
