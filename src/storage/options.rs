//! Store options.
//!
//! Controls how key files are written and how they are read back.

use crate::error::{RsaIoError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default size of the buffer key files are read through.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 16384;

/// How each key file is replaced on save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Truncate the existing file and write in place.
    #[default]
    Direct,

    /// Write to a temporary file in the same directory, then rename it over
    /// the target. Readers see either the old or the new file, never a
    /// partial one. The two files of a pair are still replaced one at a time.
    ///
    /// A replaced file keeps its permissions. A file that did not exist is
    /// created owner-only (0600 on Unix), unlike `Direct`, which follows the
    /// process umask.
    Atomic,
}

impl FromStr for WriteMode {
    type Err = RsaIoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "direct" => Ok(WriteMode::Direct),
            "atomic" => Ok(WriteMode::Atomic),
            _ => Err(RsaIoError::ParseError(format!(
                "Unsupported write mode: '{}'. Use 'direct' or 'atomic'",
                s
            ))),
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteMode::Direct => write!(f, "direct"),
            WriteMode::Atomic => write!(f, "atomic"),
        }
    }
}

/// Options for a [`KeyPairStore`](crate::storage::keypair_store::KeyPairStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// How key files are replaced.
    pub write_mode: WriteMode,

    /// Bytes requested per read while loading a key file.
    pub read_buffer_size: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            write_mode: WriteMode::Direct,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}

impl StoreOptions {
    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    /// Set the read buffer size. Zero is bumped to one byte.
    pub fn with_read_buffer_size(mut self, read_buffer_size: usize) -> Self {
        self.read_buffer_size = read_buffer_size.max(1);
        self
    }
}
