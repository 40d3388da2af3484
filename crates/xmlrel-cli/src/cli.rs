use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use xmlrel_config::{CommitMode, StorageBackend, XmlrelConfig};

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Output format for query results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Plain,
    /// JSON matching the HTTP response bodies
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "xmlrel")]
#[command(about = "xmlrel - store XML documents as tags and attributes, then query them")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (defaults to ~/.config/xmlrel/config.toml)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Database path (overrides config file)
    #[arg(long, global = true)]
    pub db_path: Option<PathBuf>,

    /// Keep everything in memory instead of SQLite
    #[arg(long, global = true)]
    pub memory: bool,

    /// When ingested records become durable (overrides config file)
    #[arg(long, global = true)]
    pub commit_mode: Option<CommitMode>,

    /// Output format
    #[arg(short = 'f', long, global = true, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Bind address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides config file)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ingest an XML document from disk
    Ingest {
        /// Document to read
        path: PathBuf,

        /// Name to register the file under (defaults to the path's file name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Count the tags with a given name in a file
    Count {
        file_name: String,
        tag_name: String,
    },

    /// List the distinct attribute names used on a tag in a file
    Attributes {
        file_name: String,
        tag_name: String,
    },

    /// Show row counts
    Stats,
}

impl Cli {
    /// Apply flags that override file and environment configuration
    pub fn apply_overrides(&self, config: &mut XmlrelConfig) {
        if let Some(path) = &self.db_path {
            config.storage.path = path.clone();
        }
        if self.memory {
            config.storage.backend = StorageBackend::Memory;
        }
        if let Some(mode) = self.commit_mode {
            config.ingest.commit_mode = mode;
        }
        if let Commands::Serve { host, port } = &self.command {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
        }
    }
}
