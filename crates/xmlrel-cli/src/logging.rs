use crate::cli::Cli;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use xmlrel_config::LoggingConfig;

/// Pick the filter directive: `RUST_LOG`, then flags, then config
pub fn filter_directive(cli: &Cli, config: &LoggingConfig, rust_log: Option<String>) -> String {
    if let Some(directive) = rust_log {
        return directive;
    }
    if let Some(level) = cli.log_level {
        return LevelFilter::from(level).to_string().to_lowercase();
    }
    if cli.verbose {
        return "debug".to_string();
    }
    config.level.clone()
}

/// Install the global subscriber. Logs go to stderr so stdout stays parseable.
pub fn init(cli: &Cli, config: &LoggingConfig) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = EnvFilter::try_new(filter_directive(cli, config, rust_log))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
