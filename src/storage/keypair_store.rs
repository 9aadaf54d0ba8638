//! Key pair store backed by a directory holding two key files.
//!
//! A key directory holds exactly one key pair:
//!
//! - `public.key`: base64 of the X.509 SubjectPublicKeyInfo DER
//! - `private.key`: base64 of the PKCS#8 PrivateKeyInfo DER
//!
//! Saving rewrites both files in full, public key first. The two writes are
//! not atomic as a unit: a failure after the first write leaves the
//! directory with one new file and one stale or absent file. Concurrent
//! saves to the same directory are not serialized.

use crate::crypto::encoding::{decode_base64, encode_base64};
use crate::crypto::keypair::{decode_private_key, decode_public_key, RsaKeyPair};
use crate::error::{RsaIoError, Result};
use crate::storage::files::{read_file, write_file};
use crate::storage::options::StoreOptions;
use std::path::{Path, PathBuf};
use tracing::debug;
use zeroize::Zeroizing;

/// File name of the public key inside a key directory.
pub const PUBLIC_KEY_FILENAME: &str = "public.key";

/// File name of the private key inside a key directory.
pub const PRIVATE_KEY_FILENAME: &str = "private.key";

/// A key directory plus the options used to read and write it.
#[derive(Debug, Clone)]
pub struct KeyPairStore {
    directory: PathBuf,
    options: StoreOptions,
}

impl KeyPairStore {
    /// Create a store for `directory` with default options.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self::with_options(directory, StoreOptions::default())
    }

    pub fn with_options(directory: impl Into<PathBuf>, options: StoreOptions) -> Self {
        Self {
            directory: directory.into(),
            options,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Location of `public.key`.
    pub fn public_key_path(&self) -> PathBuf {
        self.directory.join(PUBLIC_KEY_FILENAME)
    }

    /// Location of `private.key`.
    pub fn private_key_path(&self) -> PathBuf {
        self.directory.join(PRIVATE_KEY_FILENAME)
    }

    /// Whether both key files are present.
    pub fn exists(&self) -> bool {
        self.public_key_path().is_file() && self.private_key_path().is_file()
    }

    /// Save a key pair, replacing both key files.
    ///
    /// The directory must already exist. Both keys are encoded before
    /// anything is written, so an encoding failure leaves the directory
    /// untouched.
    pub fn save(&self, keypair: &RsaKeyPair) -> Result<()> {
        let public_text = encode_base64(&keypair.public_der()?);
        let private_text = Zeroizing::new(encode_base64(&keypair.private_der()?));

        let public_path = self.public_key_path();
        write_file(&public_path, public_text.as_bytes(), self.options.write_mode)?;
        debug!("Wrote public key to {}", public_path.display());

        let private_path = self.private_key_path();
        write_file(&private_path, private_text.as_bytes(), self.options.write_mode)?;
        debug!("Wrote private key to {}", private_path.display());

        Ok(())
    }

    /// Load the key pair stored in the directory.
    ///
    /// Either both keys load or an error is returned; a partially loaded
    /// pair is never produced.
    pub fn load(&self) -> Result<RsaKeyPair> {
        let public_path = self.public_key_path();
        let public_text = read_file(&public_path, self.options.read_buffer_size)?;
        let public_der =
            decode_base64(&public_text).map_err(|e| RsaIoError::format(&public_path, e))?;

        let private_path = self.private_key_path();
        let private_text = read_file(&private_path, self.options.read_buffer_size)?;
        let private_der =
            decode_base64(&private_text).map_err(|e| RsaIoError::format(&private_path, e))?;

        let public =
            decode_public_key(&public_der).map_err(|e| RsaIoError::format(&public_path, e))?;
        let private =
            decode_private_key(&private_der).map_err(|e| RsaIoError::format(&private_path, e))?;

        debug!("Loaded key pair from {}", self.directory.display());
        Ok(RsaKeyPair::new(public, private))
    }

    /// Load the key pair and check that `public.key` belongs to `private.key`.
    pub fn verify(&self) -> Result<RsaKeyPair> {
        let keypair = self.load()?;

        if !keypair.is_consistent() {
            return Err(RsaIoError::InvalidKeyError(format!(
                "{} does not match {}",
                self.public_key_path().display(),
                self.private_key_path().display()
            )));
        }

        Ok(keypair)
    }
}

/// Save a key pair into `directory` as `public.key` and `private.key`.
///
/// # Example
///
/// ```rust,no_run
/// use rsaio::crypto::pem::keypair_from_private_pem;
/// use rsaio::storage::keypair_store::save_keypair;
/// use std::path::Path;
///
/// # fn example(pem: &str) -> rsaio::Result<()> {
/// let keypair = keypair_from_private_pem(pem)?;
/// save_keypair(Path::new("keys"), &keypair)?;
/// # Ok(())
/// # }
/// ```
pub fn save_keypair(directory: &Path, keypair: &RsaKeyPair) -> Result<()> {
    KeyPairStore::new(directory).save(keypair)
}

/// Load the key pair stored as `public.key` and `private.key` in `directory`.
///
/// # Example
///
/// ```rust,no_run
/// use rsaio::storage::keypair_store::load_keypair;
/// use std::path::Path;
///
/// # fn example() -> rsaio::Result<()> {
/// let keypair = load_keypair(Path::new("keys"))?;
/// println!("{}-bit key", keypair.modulus_bits());
/// # Ok(())
/// # }
/// ```
pub fn load_keypair(directory: &Path) -> Result<RsaKeyPair> {
    KeyPairStore::new(directory).load()
}
