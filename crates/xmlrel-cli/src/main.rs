use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use xmlrel_cli::{cli::Cli, commands, logging};
use xmlrel_config::XmlrelConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config =
        XmlrelConfig::load(cli.config.clone()).context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);

    logging::init(&cli, &config.logging);
    debug!(?config, "Resolved configuration");

    commands::execute(cli.command, config, cli.format).await
}
