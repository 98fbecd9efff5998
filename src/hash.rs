//! Low-level cryptographic utilities: hashing, secure randomness, intent IDs.

use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::error;

use crate::error::{SipError, SipResult};
use crate::types::HexString;

/// Compute the SHA-256 hash of UTF-8 string or raw byte input.
pub fn hash_sha256(data: impl AsRef<[u8]>) -> HexString {
    let digest = Sha256::digest(data.as_ref());
    HexString::from_bytes(&digest)
}

/// Generate `length` cryptographically secure random bytes from the OS RNG.
pub fn generate_random_bytes(length: usize) -> SipResult<HexString> {
    let mut buf = vec![0u8; length];
    rand::rngs::OsRng.try_fill_bytes(&mut buf).map_err(|e| {
        error!("OS RNG failed to fill {length} bytes: {e}");
        SipError::RngFailure(e.to_string())
    })?;
    Ok(HexString::from_bytes(&buf))
}

/// Generate a unique intent identifier: `sip-` followed by 32 lowercase hex
/// characters (16 random bytes, 128 bits of collision resistance).
pub fn generate_intent_id() -> SipResult<String> {
    let mut buf = [0u8; 16];
    rand::rngs::OsRng.try_fill_bytes(&mut buf).map_err(|e| {
        error!("OS RNG failed to fill intent id bytes: {e}");
        SipError::RngFailure(e.to_string())
    })?;
    Ok(format!("sip-{}", hex::encode(buf)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_sha256_is_prefixed_and_fixed_length() {
        let h = hash_sha256("hello");
        assert!(h.as_str().starts_with("0x"));
        assert_eq!(h.as_str().len(), 66);
    }

    #[test]
    fn generate_random_bytes_is_unique() {
        let a = generate_random_bytes(32).unwrap();
        let b = generate_random_bytes(32).unwrap();
        assert_eq!(a.as_str().len(), 66);
        assert_ne!(a, b);
    }

    #[test]
    fn generate_intent_id_has_expected_shape() {
        let id = generate_intent_id().unwrap();
        assert!(id.starts_with("sip-"));
        assert_eq!(id.len(), 36);
    }
}
