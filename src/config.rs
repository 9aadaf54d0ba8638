//! Configuration for the rsaio command line tool.
//!
//! Settings are layered, later sources overriding earlier ones:
//! - Built-in defaults
//! - Config file (`--config <path>`, or `rsaio.toml` in the working directory)
//! - Environment variables (`RSAIO_STORAGE__WRITE_MODE=atomic`, etc.)

use crate::error::{RsaIoError, Result};
use crate::storage::options::{StoreOptions, WriteMode, DEFAULT_READ_BUFFER_SIZE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Key directory configuration
    pub storage: StorageConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Key directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `public.key` and `private.key`
    pub key_directory: PathBuf,

    /// How key files are replaced on save (direct, atomic)
    pub write_mode: WriteMode,

    /// Buffer size used when reading key files
    pub read_buffer_size: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key_directory: PathBuf::from("."),
            write_mode: WriteMode::Direct,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from defaults, an optional file and the environment.
    ///
    /// An explicitly named file must exist; the default `rsaio.toml` is optional.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        Self::load_with_environment(config_path, environment())
    }

    /// Load configuration with `env` as the highest-priority source.
    pub fn load_with_environment(
        config_path: Option<&Path>,
        env: ::config::Environment,
    ) -> Result<Self> {
        let defaults = ::config::Config::try_from(&Config::default())
            .map_err(|e| RsaIoError::ConfigError(e.to_string()))?;

        let mut builder = ::config::Config::builder().add_source(defaults);

        builder = match config_path {
            Some(path) => builder.add_source(::config::File::from(path).required(true)),
            None => builder.add_source(::config::File::with_name("rsaio").required(false)),
        };

        let config: Config = builder
            .add_source(env)
            .build()
            .map_err(|e| RsaIoError::ConfigError(e.to_string()))?
            .try_deserialize()
            .map_err(|e| RsaIoError::ConfigError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage.read_buffer_size == 0 {
            return Err(RsaIoError::ConfigError(
                "storage.read_buffer_size must be greater than zero".to_string(),
            ));
        }

        if self.storage.key_directory.as_os_str().is_empty() {
            return Err(RsaIoError::ConfigError(
                "storage.key_directory must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Store options derived from the storage section.
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions::default()
            .with_write_mode(self.storage.write_mode)
            .with_read_buffer_size(self.storage.read_buffer_size)
    }
}

/// The `RSAIO_SECTION__KEY` environment source.
pub fn environment() -> ::config::Environment {
    ::config::Environment::with_prefix("RSAIO")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
