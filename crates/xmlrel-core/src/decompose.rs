//! Tree decomposition
//!
//! Walks an element tree depth-first in pre-order and emits one tag record
//! per element and one attribute record per attribute. Parent/child edges
//! are not recorded; every tag only remembers its file.

use crate::document::Element;
use crate::error::XmlResult;
use crate::storage::RecordSink;
use crate::types::FileId;
use tracing::{debug, trace};

/// Counts of records emitted by one decomposition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecomposeSummary {
    pub tags: usize,
    pub attributes: usize,
}

/// Emit tag and attribute records for `root` and everything beneath it.
///
/// For each element the tag is inserted first, then its attributes, and only
/// then are its children visited. With a sink that commits per call, an
/// element's records are durable before any of its children are emitted.
/// The walk uses an explicit stack, so depth is bounded by memory rather
/// than the call stack.
pub async fn decompose<S>(
    sink: &S,
    root: &Element,
    file_id: FileId,
) -> XmlResult<DecomposeSummary>
where
    S: RecordSink + ?Sized,
{
    let mut summary = DecomposeSummary::default();

    for element in root.pre_order() {
        let tag_id = sink.insert_tag(file_id, &element.name).await?;
        trace!(tag = %element.name, %tag_id, "Emitted tag");

        for (name, value) in &element.attributes {
            sink.insert_attribute(tag_id, name, value).await?;
        }

        summary.tags += 1;
        summary.attributes += element.attributes.len();
    }

    debug!(
        %file_id,
        tags = summary.tags,
        attributes = summary.attributes,
        "Decomposed document"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::XmlError;
    use crate::storage::{BufferedSink, MemoryStore, XmlStore};
    use crate::types::{AttributeId, TagId};
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// Records the order of sink calls
    #[derive(Default)]
    struct Journal {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl RecordSink for Journal {
        async fn insert_tag(&self, _file_id: FileId, name: &str) -> XmlResult<TagId> {
            let mut calls = self.calls.lock();
            calls.push(format!("tag:{name}"));
            Ok(TagId(calls.len() as i64))
        }

        async fn insert_attribute(
            &self,
            tag_id: TagId,
            name: &str,
            _value: &str,
        ) -> XmlResult<AttributeId> {
            let mut calls = self.calls.lock();
            calls.push(format!("attr:{tag_id}:{name}"));
            Ok(AttributeId(calls.len() as i64))
        }
    }

    #[tokio::test]
    async fn test_attributes_emitted_before_children() {
        let root = Element::new("root")
            .with_attribute("id", "r")
            .with_child(Element::new("a").with_attribute("x", "1"))
            .with_child(Element::new("b"));

        let journal = Journal::default();
        decompose(&journal, &root, FileId(1)).await.unwrap();

        assert_eq!(
            *journal.calls.lock(),
            ["tag:root", "attr:1:id", "tag:a", "attr:3:x", "tag:b"]
        );
    }

    #[tokio::test]
    async fn test_same_named_elements_are_distinct_tags() {
        let root = Element::parse(b"<a><a/><b><a/></b></a>").unwrap();
        let store = MemoryStore::new();
        let file = store.insert_file("nested.xml").await.unwrap();

        let summary = decompose(&store, &root, file.id).await.unwrap();

        assert_eq!(summary.tags, 4);
        assert_eq!(store.find_tags(file.id, "a").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_failure_stops_the_walk() {
        struct FailOnSecondTag(Mutex<usize>);

        #[async_trait]
        impl RecordSink for FailOnSecondTag {
            async fn insert_tag(&self, _: FileId, _: &str) -> XmlResult<TagId> {
                let mut seen = self.0.lock();
                *seen += 1;
                if *seen == 2 {
                    return Err(XmlError::Storage("disk full".into()));
                }
                Ok(TagId(*seen as i64))
            }

            async fn insert_attribute(&self, _: TagId, _: &str, _: &str) -> XmlResult<AttributeId> {
                Ok(AttributeId(0))
            }
        }

        let root = Element::parse(b"<r><a/><b/></r>").unwrap();
        let sink = FailOnSecondTag(Mutex::new(0));
        let err = decompose(&sink, &root, FileId(1)).await.unwrap_err();

        assert_eq!(err, XmlError::Storage("disk full".into()));
        assert_eq!(*sink.0.lock(), 2);
    }

    #[tokio::test]
    async fn test_buffered_sink_matches_tree_shape() {
        let root = Element::parse(br#"<root><a x="1" y="2"/><b/></root>"#).unwrap();
        let sink = BufferedSink::new();

        let summary = decompose(&sink, &root, FileId(0)).await.unwrap();

        assert_eq!(summary, DecomposeSummary { tags: 3, attributes: 2 });
        let names: Vec<String> = sink.into_pending().into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["root", "a", "b"]);
    }
}
