//! rsaio: RSA key pair persistence
//!
//! This library saves an RSA key pair to a directory and loads it back.
//! The directory holds two files:
//!
//! - `public.key`: base64 of the X.509 SubjectPublicKeyInfo encoding
//! - `private.key`: base64 of the PKCS#8 PrivateKeyInfo encoding
//!
//! The files use RFC 4648 base64 with padding and no line breaks, so they
//! can be exchanged byte-for-byte with other implementations of the same
//! layout.
//!
//! Key generation is not part of this crate. Keys come from the `rsa` crate,
//! from PEM documents (see [`crypto::pem`]), or from an existing key
//! directory.
//!
//! # Example
//!
//! ```rust,no_run
//! use rsaio::storage::keypair_store::{load_keypair, save_keypair};
//! use rsaio::error::Result;
//! use std::path::Path;
//!
//! fn example() -> Result<()> {
//!     let keypair = load_keypair(Path::new("keys"))?;
//!     save_keypair(Path::new("backup"), &keypair)?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod crypto;
pub mod error;
pub mod storage;

// Re-export commonly used types
pub use crypto::keypair::RsaKeyPair;
pub use error::{Result, RsaIoError};
pub use storage::{load_keypair, save_keypair, KeyPairStore, StoreOptions, WriteMode};
