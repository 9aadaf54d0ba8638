//! Text-safe transport encoding for key files.
//!
//! Key files hold RFC 4648 base64 (standard alphabet, with padding) on a
//! single line with no framing.

use crate::error::{RsaIoError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use zeroize::Zeroizing;

/// Encode bytes as standard padded base64.
///
/// # Example
///
/// ```
/// use rsaio::crypto::encoding::encode_base64;
///
/// assert_eq!(encode_base64(b"foobar"), "Zm9vYmFy");
/// ```
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode standard padded base64.
///
/// Surrounding ASCII whitespace is ignored, anything else outside the
/// alphabet is rejected. The decoded bytes are wiped when dropped.
///
/// # Example
///
/// ```
/// use rsaio::crypto::encoding::decode_base64;
///
/// let bytes = decode_base64(b"Zm9vYmFy\n").unwrap();
/// assert_eq!(bytes.as_slice(), b"foobar");
/// ```
pub fn decode_base64(text: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let trimmed = trim_ascii_whitespace(text);
    if trimmed.is_empty() {
        return Err(RsaIoError::InvalidKeyError("Key data is empty".to_string()));
    }

    STANDARD
        .decode(trimmed)
        .map(Zeroizing::new)
        .map_err(|e| RsaIoError::InvalidKeyError(format!("Invalid base64: {}", e)))
}

fn trim_ascii_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}
