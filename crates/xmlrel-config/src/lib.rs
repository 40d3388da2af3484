//! # xmlrel Configuration
//!
//! Typed configuration for the xmlrel ingestion service.
//!
//! Values are resolved in layers: built-in defaults, then a TOML file, then
//! `XMLREL_*` environment variables. Command-line flags are applied last by
//! the binary.
//!
//! ```rust,no_run
//! use xmlrel_config::XmlrelConfig;
//!
//! let config = XmlrelConfig::load(None).expect("config");
//! println!("database at {}", config.storage.path.display());
//! ```

#![warn(missing_docs)]

mod components;
mod error;
mod loader;

pub use components::*;
pub use error::{ConfigError, ConfigResult};
pub use loader::*;
