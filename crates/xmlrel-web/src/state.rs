use std::sync::Arc;
use xmlrel_config::IngestConfig;
use xmlrel_core::{Ingestor, QueryEngine, XmlStore};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub ingestor: Ingestor,
    pub queries: QueryEngine,
}

impl AppState {
    pub fn new(store: Arc<dyn XmlStore>, ingest: &IngestConfig) -> Self {
        Self {
            ingestor: Ingestor::with_config(store.clone(), ingest),
            queries: QueryEngine::new(store),
        }
    }
}
