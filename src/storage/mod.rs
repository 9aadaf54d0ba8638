//! Key storage module.
//!
//! This module persists an RSA key pair as two base64 key files in a
//! directory and loads it back.

mod files;
pub mod keypair_store;
pub mod options;

pub use keypair_store::{
    load_keypair, save_keypair, KeyPairStore, PRIVATE_KEY_FILENAME, PUBLIC_KEY_FILENAME,
};
pub use options::{StoreOptions, WriteMode, DEFAULT_READ_BUFFER_SIZE};
