use crate::cli::OutputFormat;
use anyhow::Result;
use std::sync::Arc;
use xmlrel_core::{QueryEngine, XmlStore};
use xmlrel_web::{TagAttributesResponse, TagCountResponse};

pub async fn count(
    store: Arc<dyn XmlStore>,
    file_name: &str,
    tag_name: &str,
    format: OutputFormat,
) -> Result<()> {
    let count = QueryEngine::new(store).count_tags(file_name, tag_name).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&TagCountResponse { count })?)
        }
        OutputFormat::Plain => println!("{count}"),
    }
    Ok(())
}

pub async fn attributes(
    store: Arc<dyn XmlStore>,
    file_name: &str,
    tag_name: &str,
    format: OutputFormat,
) -> Result<()> {
    let names = QueryEngine::new(store)
        .list_attribute_names(file_name, tag_name)
        .await?;

    match format {
        OutputFormat::Json => {
            let body = TagAttributesResponse {
                attributes: names.into_iter().collect(),
            };
            println!("{}", serde_json::to_string(&body)?);
        }
        OutputFormat::Plain => {
            for name in names {
                println!("{name}");
            }
        }
    }
    Ok(())
}
