use crate::cli::OutputFormat;
use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};
use std::sync::Arc;
use xmlrel_core::XmlStore;

pub async fn execute(store: Arc<dyn XmlStore>, format: OutputFormat) -> Result<()> {
    let stats = store.stats().await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&stats)?),
        OutputFormat::Plain => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_header(vec!["Table", "Rows"])
                .add_row(vec!["files".to_string(), stats.files.to_string()])
                .add_row(vec!["tags".to_string(), stats.tags.to_string()])
                .add_row(vec!["attributes".to_string(), stats.attributes.to_string()]);
            println!("{table}");
        }
    }
    Ok(())
}
