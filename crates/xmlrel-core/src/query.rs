//! Tag queries
//!
//! Both queries resolve the file by name, then filter its tags by name.
//! A missing file and a file without the tag are reported separately.

use crate::error::{XmlError, XmlResult};
use crate::storage::XmlStore;
use crate::types::TagRecord;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Read-only lookups over ingested files
#[derive(Clone)]
pub struct QueryEngine {
    store: Arc<dyn XmlStore>,
}

impl QueryEngine {
    pub fn new(store: Arc<dyn XmlStore>) -> Self {
        Self { store }
    }

    /// Number of `tag_name` elements in `file_name`, counting every occurrence
    pub async fn count_tags(&self, file_name: &str, tag_name: &str) -> XmlResult<usize> {
        Ok(self.matching_tags(file_name, tag_name).await?.len())
    }

    /// Distinct attribute names used on any `tag_name` element in `file_name`.
    ///
    /// Tags without attributes contribute nothing; if none of the matching
    /// tags has attributes the result is an empty set, not an error.
    pub async fn list_attribute_names(
        &self,
        file_name: &str,
        tag_name: &str,
    ) -> XmlResult<BTreeSet<String>> {
        let mut names = BTreeSet::new();
        for tag in self.matching_tags(file_name, tag_name).await? {
            for attribute in self.store.find_attributes(tag.id).await? {
                names.insert(attribute.name);
            }
        }
        Ok(names)
    }

    async fn matching_tags(&self, file_name: &str, tag_name: &str) -> XmlResult<Vec<TagRecord>> {
        let file = self
            .store
            .find_file(file_name)
            .await?
            .ok_or_else(|| XmlError::FileNotFound(file_name.to_string()))?;

        let tags = self.store.find_tags(file.id, tag_name).await?;
        if tags.is_empty() {
            return Err(XmlError::TagNotFound {
                file: file_name.to_string(),
                tag: tag_name.to_string(),
            });
        }
        Ok(tags)
    }
}
