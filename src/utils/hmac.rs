//! HMAC signature generation and comparison utilities.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::models::SignatureError;

type HmacSha256 = Hmac<Sha256>;

/// Length in bytes of an HMAC-SHA256 digest.
pub const DIGEST_LEN: usize = 32;

/// Length of a hex-encoded digest as it appears in the `v1` field.
pub const DIGEST_HEX_LEN: usize = DIGEST_LEN * 2;

/// Compute HMAC-SHA256 of `message` keyed with `key`.
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> Result<[u8; DIGEST_LEN], SignatureError> {
    if key.is_empty() {
        return Err(SignatureError::EmptySecret);
    }

    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take a key of any size");
    mac.update(message);

    let mut digest = [0u8; DIGEST_LEN];
    digest.copy_from_slice(&mac.finalize().into_bytes());
    Ok(digest)
}

/// Build the exact bytes that get signed: `"{timestamp}."` followed by the raw payload.
///
/// The payload is appended untouched, so non-UTF-8 bodies sign the same way they travel.
pub fn signing_string(timestamp: u64, payload: &[u8]) -> Vec<u8> {
    let prefix = format!("{timestamp}.");
    let mut message = Vec::with_capacity(prefix.len() + payload.len());
    message.extend_from_slice(prefix.as_bytes());
    message.extend_from_slice(payload);
    message
}

/// Generate the lowercase hex signature for the given payload and timestamp
pub fn compute_signature(
    secret: &[u8],
    timestamp: u64,
    payload: &[u8],
) -> Result<String, SignatureError> {
    let digest = hmac_sha256(secret, &signing_string(timestamp, payload))?;
    Ok(hex::encode(digest))
}

/// Compare two byte strings in constant time.
///
/// Length is checked first and is the only thing a mismatch can leak; equal-length inputs
/// are compared without an early exit.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hmac_sha256_known_vector() {
        let digest = hmac_sha256(b"key", b"The quick brown fox jumps over the lazy dog").unwrap();
        assert_eq!(
            hex::encode(digest),
            "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8"
        );
    }

    #[test]
    fn test_hmac_sha256_rejects_empty_key() {
        assert!(matches!(
            hmac_sha256(b"", b"message"),
            Err(SignatureError::EmptySecret)
        ));
    }

    #[test]
    fn test_hmac_sha256_accepts_any_key_length() {
        for len in [1, 32, 64, 65, 1024] {
            let key = vec![0x5a; len];
            assert!(hmac_sha256(&key, b"message").is_ok(), "key of {len} bytes");
        }
    }

    #[test]
    fn test_signing_string_layout() {
        assert_eq!(signing_string(1700000000, b"{}"), b"1700000000.{}".to_vec());
        assert_eq!(signing_string(0, b""), b"0.".to_vec());
    }

    #[test]
    fn test_signing_string_keeps_raw_bytes() {
        let payload = [0xff, 0x00, 0xfe];
        let message = signing_string(7, &payload);
        assert_eq!(message, vec![b'7', b'.', 0xff, 0x00, 0xfe]);
    }

    #[test]
    fn test_compute_signature_example_scenario() {
        let signature =
            compute_signature(b"whsec_test", 1700000000, br#"{"event":"ping"}"#).unwrap();
        assert_eq!(
            signature,
            "aa8efe37b751e71157c508c5ac4acb1e9fe5225db98355dfc00f4b680afbc447"
        );
        assert_eq!(signature.len(), DIGEST_HEX_LEN);
    }

    #[test]
    fn test_compute_signature_empty_payload() {
        let signature = compute_signature(b"whsec_test", 1700000000, b"").unwrap();
        assert_eq!(
            signature,
            "5967f3c560522fa40cf2876ebc3c3a08551dd6959aaade3b413460591895bdcc"
        );
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
        assert!(!constant_time_eq(b"", b"a"));
        assert!(constant_time_eq(b"", b""));
    }
}
