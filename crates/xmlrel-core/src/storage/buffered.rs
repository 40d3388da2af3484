//! In-memory sink for whole-document commits

use super::RecordSink;
use crate::error::{XmlError, XmlResult};
use crate::types::{AttributeId, FileId, PendingTag, TagId};
use async_trait::async_trait;
use parking_lot::Mutex;

/// Collects decomposed records without persisting them.
///
/// Tag ids handed out are positions in the buffer, valid only for
/// [`insert_attribute`](RecordSink::insert_attribute) on the same sink.
#[derive(Debug, Default)]
pub struct BufferedSink {
    tags: Mutex<Vec<PendingTag>>,
}

impl BufferedSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the buffered tags in emission order
    pub fn into_pending(self) -> Vec<PendingTag> {
        self.tags.into_inner()
    }
}

#[async_trait]
impl RecordSink for BufferedSink {
    async fn insert_tag(&self, _file_id: FileId, name: &str) -> XmlResult<TagId> {
        let mut tags = self.tags.lock();
        tags.push(PendingTag {
            name: name.to_string(),
            attributes: Vec::new(),
        });
        Ok(TagId(tags.len() as i64 - 1))
    }

    async fn insert_attribute(
        &self,
        tag_id: TagId,
        name: &str,
        value: &str,
    ) -> XmlResult<AttributeId> {
        let mut tags = self.tags.lock();
        let tag = usize::try_from(tag_id.0)
            .ok()
            .and_then(|index| tags.get_mut(index))
            .ok_or_else(|| XmlError::Storage(format!("unknown buffered tag {tag_id}")))?;

        tag.attributes.push((name.to_string(), value.to_string()));
        Ok(AttributeId(tag.attributes.len() as i64 - 1))
    }
}
