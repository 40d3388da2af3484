use anyhow::{Context, Result};
use std::sync::Arc;
use xmlrel_config::XmlrelConfig;
use xmlrel_core::XmlStore;
use xmlrel_web::{start_server, AppState};

pub async fn execute(store: Arc<dyn XmlStore>, config: &XmlrelConfig) -> Result<()> {
    let state = AppState::new(store, &config.ingest);
    start_server(&config.server, state)
        .await
        .context("HTTP server failed")
}
