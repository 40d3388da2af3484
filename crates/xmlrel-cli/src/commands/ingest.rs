use crate::cli::OutputFormat;
use anyhow::{anyhow, Context, Result};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use xmlrel_config::IngestConfig;
use xmlrel_core::{Ingestor, XmlStore};

/// Name a file is registered under when `--name` is not given
pub fn default_file_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow!("Cannot derive a file name from {}", path.display()))
}

pub async fn execute(
    store: Arc<dyn XmlStore>,
    config: &IngestConfig,
    path: &Path,
    name: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let file_name = match name {
        Some(name) => name.to_string(),
        None => default_file_name(path)?,
    };
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let ingested = Ingestor::with_config(store, config)
        .ingest(&file_name, &bytes)
        .await?;

    match format {
        OutputFormat::Json => println!("{}", json!(ingested)),
        OutputFormat::Plain => println!("Ingested {file_name}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_name() {
        assert_eq!(
            default_file_name(Path::new("/data/in/catalog.xml")).unwrap(),
            "catalog.xml"
        );
        assert!(default_file_name(Path::new("/")).is_err());
    }
}
