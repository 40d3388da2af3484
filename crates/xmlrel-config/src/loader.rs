//! Layered configuration loading

use crate::components::XmlrelConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding `storage.path`
pub const ENV_DB_PATH: &str = "XMLREL_DB_PATH";
/// Environment variable overriding `server.host`
pub const ENV_HOST: &str = "XMLREL_HOST";
/// Environment variable overriding `server.port`
pub const ENV_PORT: &str = "XMLREL_PORT";
/// Environment variable overriding `ingest.commit_mode`
pub const ENV_COMMIT_MODE: &str = "XMLREL_COMMIT_MODE";

/// Default config file location (`<config dir>/xmlrel/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("xmlrel").join("config.toml"))
}

impl XmlrelConfig {
    /// Load configuration: defaults, then file, then environment.
    ///
    /// An explicitly named file must exist. The default location is optional.
    pub fn load(config_file: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::from_file_or_default(config_file)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    fn from_file_or_default(config_file: Option<PathBuf>) -> ConfigResult<Self> {
        match config_file {
            Some(path) => {
                debug!(path = %path.display(), "Loading config file");
                Self::from_file(&path)
            }
            None => match default_config_path() {
                Some(path) if path.exists() => {
                    debug!(path = %path.display(), "Loading default config file");
                    Self::from_file(&path)
                }
                _ => Ok(Self::default()),
            },
        }
    }

    /// Apply `XMLREL_*` overrides read through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DB_PATH) {
            self.storage.path = PathBuf::from(path);
        }
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_PORT.to_string(),
                value: port.clone(),
            })?;
        }
        if let Some(mode) = lookup(ENV_COMMIT_MODE) {
            self.ingest.commit_mode = mode.parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_COMMIT_MODE.to_string(),
                value: mode.clone(),
            })?;
        }
        Ok(())
    }
}
