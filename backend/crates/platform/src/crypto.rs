//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};

/// Generate a random 32-byte key (signing secrets)
pub fn random_key() -> [u8; 32] {
    let mut key = [0u8; 32];
    OsRng.fill_bytes(&mut key);
    key
}

/// Encode bytes as standard base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decode standard base64 to bytes
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

/// Encode bytes as URL-safe base64 without padding (token segments)
pub fn to_base64url(bytes: &[u8]) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode URL-safe base64 without padding
pub fn from_base64url(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::URL_SAFE_NO_PAD.decode(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_key_differs() {
        assert_ne!(random_key(), random_key());
    }

    #[test]
    fn test_base64_roundtrip() {
        let data = b"hello world";
        assert_eq!(from_base64(&to_base64(data)).unwrap(), data);
    }

    #[test]
    fn test_base64url_has_no_padding_or_plus() {
        let encoded = to_base64url(&[0xfb, 0xff, 0xfe, 0x01]);
        assert!(!encoded.contains('='));
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
        assert_eq!(from_base64url(&encoded).unwrap(), vec![0xfb, 0xff, 0xfe, 0x01]);
    }
}
