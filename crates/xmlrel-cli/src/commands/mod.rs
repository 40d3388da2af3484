pub mod ingest;
pub mod query;
pub mod serve;
pub mod stats;

use crate::cli::{Commands, OutputFormat};
use crate::factories::create_store;
use anyhow::Result;
use xmlrel_config::XmlrelConfig;

/// Run one subcommand against the configured store
pub async fn execute(command: Commands, config: XmlrelConfig, format: OutputFormat) -> Result<()> {
    let store = create_store(&config.storage)?;

    match command {
        Commands::Serve { .. } => serve::execute(store, &config).await,
        Commands::Ingest { path, name } => {
            ingest::execute(store, &config.ingest, &path, name.as_deref(), format).await
        }
        Commands::Count {
            file_name,
            tag_name,
        } => query::count(store, &file_name, &tag_name, format).await,
        Commands::Attributes {
            file_name,
            tag_name,
        } => query::attributes(store, &file_name, &tag_name, format).await,
        Commands::Stats => stats::execute(store, format).await,
    }
}
