//! Cryptographic encodings module.
//!
//! This module binds key handling to RSA and provides the encodings a key
//! pair passes through on its way to disk:
//!
//! - SubjectPublicKeyInfo / PKCS#8 DER interchange encodings
//! - Base64 text encoding for key files
//! - PEM import and export
//!
//! No cryptographic algorithm is implemented here; everything delegates to
//! the `rsa` and `base64` crates.
//!
//! # Example
//!
//! ```rust,no_run
//! use rsaio::crypto::encoding::{decode_base64, encode_base64};
//! use rsaio::crypto::keypair::{decode_public_key, encode_public_key};
//!
//! # fn example(text: &str) -> rsaio::Result<()> {
//! let der = decode_base64(text.as_bytes())?;
//! let public = decode_public_key(&der)?;
//! assert_eq!(encode_base64(&encode_public_key(&public)?), text.trim());
//! # Ok(())
//! # }
//! ```

pub mod encoding;
pub mod keypair;
pub mod pem;
