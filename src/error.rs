//! Error types for the rsaio library.
//!
//! Every failure carries enough context (the file involved and the
//! underlying cause) to diagnose it without re-running the operation.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// The main error type for rsaio operations.
#[derive(Error, Debug)]
pub enum RsaIoError {
    /// An expected key file does not exist
    #[error("Key file not found: {}", path.display())]
    NotFoundError { path: PathBuf },

    /// Opening, reading or writing a file failed
    #[error("Storage I/O error on {}: {source}", path.display())]
    StorageError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A key file does not hold base64-encoded key interchange data
    #[error("Invalid key file {}: {reason}", path.display())]
    FormatError { path: PathBuf, reason: String },

    /// Key bytes or text could not be decoded as an RSA key
    #[error("Invalid key: {0}")]
    InvalidKeyError(String),

    /// A key could not be exported to its interchange encoding
    #[error("Key encoding error: {0}")]
    EncodingError(String),

    /// PEM encoding/decoding error
    #[error("PEM error: {0}")]
    PemError(String),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid input data
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl RsaIoError {
    /// Wrap an I/O failure together with the path it happened on.
    pub fn storage(path: &Path, source: std::io::Error) -> Self {
        RsaIoError::StorageError {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Attach a file path to a decoding failure.
    pub(crate) fn format(path: &Path, cause: RsaIoError) -> Self {
        let reason = match cause {
            RsaIoError::InvalidKeyError(reason) => reason,
            other => other.to_string(),
        };
        RsaIoError::FormatError {
            path: path.to_path_buf(),
            reason,
        }
    }
}

/// A specialized Result type for rsaio operations.
pub type Result<T> = std::result::Result<T, RsaIoError>;
