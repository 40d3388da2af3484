//! # xmlrel core
//!
//! Flattens an XML element tree into a relational form (file → tags →
//! attributes) and answers lookups against it.
//!
//! ## Components
//!
//! - [`document`]: owned element tree and the XML parser front end
//! - [`encoding`]: BOM and declaration sniffing, transcoding to UTF-8
//! - [`decompose`]: pre-order walk that emits tag and attribute records
//! - [`registry`]: file-name uniqueness at ingestion time
//! - [`query`]: tag counts and distinct attribute names
//! - [`ingest`]: parse → register → decompose, under a [`CommitMode`]
//! - [`storage`]: the store contract plus an in-memory implementation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use xmlrel_core::{Ingestor, MemoryStore, QueryEngine};
//!
//! let store = Arc::new(MemoryStore::new());
//! Ingestor::new(store.clone()).ingest("f.xml", br#"<root><a x="1"/></root>"#).await?;
//! assert_eq!(QueryEngine::new(store).count_tags("f.xml", "a").await?, 1);
//! ```

pub mod decompose;
pub mod document;
pub mod encoding;
pub mod error;
pub mod ingest;
pub mod query;
pub mod registry;
pub mod storage;
pub mod types;

pub use decompose::decompose;
pub use document::{Element, ParseOptions};
pub use error::{XmlError, XmlResult};
pub use ingest::Ingestor;
pub use query::QueryEngine;
pub use registry::FileRegistry;
pub use storage::{BufferedSink, MemoryStore, RecordSink, XmlStore};
pub use types::{
    AttributeId, AttributeRecord, FileId, FileRecord, PendingTag, StoreStats, TagId, TagRecord,
};
pub use xmlrel_config::CommitMode;
