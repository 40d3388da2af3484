//! Document ingestion
//!
//! Parse, register the file, decompose. The document is parsed before the
//! file is registered, so malformed input never leaves a file row behind.

use crate::decompose::{decompose, DecomposeSummary};
use crate::document::{Element, ParseOptions};
use crate::error::{XmlError, XmlResult};
use crate::registry::{validate_file_name, FileRegistry};
use crate::storage::{BufferedSink, XmlStore};
use crate::types::{FileId, FileRecord};
use std::sync::Arc;
use tracing::{info, warn};
use xmlrel_config::{CommitMode, IngestConfig};

/// Turns uploaded documents into stored records
#[derive(Clone)]
pub struct Ingestor {
    store: Arc<dyn XmlStore>,
    registry: FileRegistry,
    mode: CommitMode,
    parse_options: ParseOptions,
}

impl Ingestor {
    /// Ingestor with incremental commits and default parser limits
    pub fn new(store: Arc<dyn XmlStore>) -> Self {
        Self::with_config(store, &IngestConfig::default())
    }

    pub fn with_config(store: Arc<dyn XmlStore>, config: &IngestConfig) -> Self {
        Self {
            registry: FileRegistry::new(store.clone()),
            store,
            mode: config.commit_mode,
            parse_options: ParseOptions {
                max_depth: config.max_depth,
            },
        }
    }

    /// Ingest raw document bytes under `file_name`.
    ///
    /// Returns `true` once every tag and attribute has been stored.
    pub async fn ingest(&self, file_name: &str, bytes: &[u8]) -> XmlResult<bool> {
        validate_file_name(file_name)?;
        let root = Element::parse_with(bytes, &self.parse_options)?;
        self.ingest_element(file_name, &root).await?;
        Ok(true)
    }

    /// Ingest an already-parsed tree under `file_name`
    pub async fn ingest_element(&self, file_name: &str, root: &Element) -> XmlResult<FileRecord> {
        let (file, summary) = match self.mode {
            CommitMode::Incremental => self.ingest_incremental(file_name, root).await?,
            CommitMode::Transactional => self.ingest_transactional(file_name, root).await?,
        };

        info!(
            file = %file.name,
            mode = %self.mode,
            tags = summary.tags,
            attributes = summary.attributes,
            "Ingested document"
        );
        Ok(file)
    }

    async fn ingest_incremental(
        &self,
        file_name: &str,
        root: &Element,
    ) -> XmlResult<(FileRecord, DecomposeSummary)> {
        let file = self.registry.register(file_name).await?;
        let summary = decompose(self.store.as_ref(), root, file.id)
            .await
            .map_err(|e| {
                warn!(file = %file_name, error = %e, "Ingestion failed; partial records remain");
                e
            })?;
        Ok((file, summary))
    }

    async fn ingest_transactional(
        &self,
        file_name: &str,
        root: &Element,
    ) -> XmlResult<(FileRecord, DecomposeSummary)> {
        validate_file_name(file_name)?;
        if self.store.find_file(file_name).await?.is_some() {
            return Err(XmlError::DuplicateFile(file_name.to_string()));
        }

        // The sink ignores the file id; the real one is assigned at commit
        let sink = BufferedSink::new();
        let summary = decompose(&sink, root, FileId(0)).await?;
        let file = self
            .store
            .commit_document(file_name, sink.into_pending())
            .await?;
        Ok((file, summary))
    }
}
