//! RSA key pair type and interchange encodings.
//!
//! Public keys are exchanged as X.509 SubjectPublicKeyInfo DER and private
//! keys as PKCS#8 PrivateKeyInfo DER. The algorithm is always RSA; a file
//! holding any other algorithm fails to decode.

use crate::error::{RsaIoError, Result};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fmt;
use zeroize::Zeroizing;

/// An RSA key pair consisting of a public key and its private key.
#[derive(Clone)]
pub struct RsaKeyPair {
    pub public: RsaPublicKey,
    pub private: RsaPrivateKey,
}

impl RsaKeyPair {
    /// Pair up a public and a private key as given.
    ///
    /// No check is made that the two belong together; see
    /// [`RsaKeyPair::is_consistent`].
    pub fn new(public: RsaPublicKey, private: RsaPrivateKey) -> Self {
        Self { public, private }
    }

    /// Create a key pair from a private key, deriving the public half.
    pub fn from_private(private: RsaPrivateKey) -> Self {
        let public = RsaPublicKey::from(&private);
        Self { public, private }
    }

    /// Size of the public modulus in bits.
    pub fn modulus_bits(&self) -> usize {
        self.public.n().bits()
    }

    /// The public exponent in decimal.
    pub fn public_exponent(&self) -> String {
        self.public.e().to_string()
    }

    /// Whether the public key is the public half of the private key.
    pub fn is_consistent(&self) -> bool {
        RsaPublicKey::from(&self.private) == self.public
    }

    /// The public key as SubjectPublicKeyInfo DER.
    pub fn public_der(&self) -> Result<Vec<u8>> {
        encode_public_key(&self.public)
    }

    /// The private key as PKCS#8 PrivateKeyInfo DER.
    pub fn private_der(&self) -> Result<Zeroizing<Vec<u8>>> {
        encode_private_key(&self.private)
    }
}

impl fmt::Debug for RsaKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaKeyPair")
            .field("modulus_bits", &self.modulus_bits())
            .field("public_exponent", &self.public_exponent())
            .finish_non_exhaustive()
    }
}

/// Encode a public key as X.509 SubjectPublicKeyInfo DER.
pub fn encode_public_key(key: &RsaPublicKey) -> Result<Vec<u8>> {
    key.to_public_key_der()
        .map(|doc| doc.as_bytes().to_vec())
        .map_err(|e| RsaIoError::EncodingError(format!("Failed to encode public key: {}", e)))
}

/// Decode an RSA public key from SubjectPublicKeyInfo DER.
///
/// # Example
///
/// ```rust,no_run
/// use rsaio::crypto::keypair::decode_public_key;
///
/// # fn example(der: &[u8]) -> rsaio::Result<()> {
/// let key = decode_public_key(der)?;
/// # Ok(())
/// # }
/// ```
pub fn decode_public_key(der: &[u8]) -> Result<RsaPublicKey> {
    RsaPublicKey::from_public_key_der(der).map_err(|e| {
        RsaIoError::InvalidKeyError(format!("Not an RSA SubjectPublicKeyInfo structure: {}", e))
    })
}

/// Encode a private key as PKCS#8 PrivateKeyInfo DER.
///
/// The returned buffer is wiped when dropped.
pub fn encode_private_key(key: &RsaPrivateKey) -> Result<Zeroizing<Vec<u8>>> {
    key.to_pkcs8_der()
        .map(|doc| doc.to_bytes())
        .map_err(|e| RsaIoError::EncodingError(format!("Failed to encode private key: {}", e)))
}

/// Decode an RSA private key from PKCS#8 PrivateKeyInfo DER.
///
/// The key components are validated while decoding.
pub fn decode_private_key(der: &[u8]) -> Result<RsaPrivateKey> {
    RsaPrivateKey::from_pkcs8_der(der).map_err(|e| {
        RsaIoError::InvalidKeyError(format!("Not an RSA PKCS#8 PrivateKeyInfo structure: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::encoding::decode_base64;

    const ALPHA_PUBLIC: &str = include_str!("../../tests/fixtures/alpha/public.key");
    const ALPHA_PRIVATE: &str = include_str!("../../tests/fixtures/alpha/private.key");
    const BRAVO_PRIVATE: &str = include_str!("../../tests/fixtures/bravo/private.key");

    fn fixture_keypair(private_b64: &str) -> RsaKeyPair {
        let der = decode_base64(private_b64.as_bytes()).unwrap();
        RsaKeyPair::from_private(decode_private_key(&der).unwrap())
    }

    #[test]
    fn test_decode_fixture_keys() {
        let public_der = decode_base64(ALPHA_PUBLIC.as_bytes()).unwrap();
        let public = decode_public_key(&public_der).unwrap();

        let keypair = fixture_keypair(ALPHA_PRIVATE);

        assert_eq!(keypair.public, public);
        assert_eq!(keypair.modulus_bits(), 2048);
        assert_eq!(keypair.public_exponent(), "65537");
    }

    #[test]
    fn test_public_key_der_roundtrip() {
        let public_der = decode_base64(ALPHA_PUBLIC.as_bytes()).unwrap();
        let public = decode_public_key(&public_der).unwrap();

        let encoded = encode_public_key(&public).unwrap();
        assert_eq!(encoded, public_der.to_vec());
    }

    #[test]
    fn test_private_key_der_roundtrip() {
        let keypair = fixture_keypair(ALPHA_PRIVATE);

        let der = keypair.private_der().unwrap();
        let decoded = decode_private_key(&der).unwrap();

        assert_eq!(decoded, keypair.private);
    }

    #[test]
    fn test_decode_public_key_rejects_garbage() {
        let result = decode_public_key(b"definitely not DER");

        match result {
            Err(RsaIoError::InvalidKeyError(msg)) => {
                assert!(msg.contains("SubjectPublicKeyInfo"));
            }
            _ => panic!("Expected InvalidKeyError"),
        }
    }

    #[test]
    fn test_decode_private_key_rejects_public_key_bytes() {
        let public_der = decode_base64(ALPHA_PUBLIC.as_bytes()).unwrap();
        let result = decode_private_key(&public_der);

        assert!(matches!(result, Err(RsaIoError::InvalidKeyError(_))));
    }

    #[test]
    fn test_is_consistent() {
        let alpha = fixture_keypair(ALPHA_PRIVATE);
        let bravo = fixture_keypair(BRAVO_PRIVATE);

        assert!(alpha.is_consistent());

        let mixed = RsaKeyPair::new(alpha.public.clone(), bravo.private.clone());
        assert!(!mixed.is_consistent());
    }

    #[test]
    fn test_debug_does_not_print_key_material() {
        let keypair = fixture_keypair(ALPHA_PRIVATE);
        let debug = format!("{:?}", keypair);

        assert!(debug.contains("modulus_bits: 2048"));
        assert!(!debug.contains("primes"));
    }
}
