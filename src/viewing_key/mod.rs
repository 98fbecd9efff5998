//! Viewing keys: symmetric keys that let a holder selectively decrypt
//! transactions it was given visibility into, without granting spending
//! authority.

use std::time::{SystemTime, UNIX_EPOCH};

use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::error;
use zeroize::Zeroize;

use crate::error::{SipError, SipResult};
use crate::hash::generate_random_bytes;
use crate::types::HexString;

const NONCE_LEN: usize = 24;
const TAG_LEN: usize = 16;

/// A symmetric viewing key: 32 random bytes, plus a label and its
/// derivation hash for indexing without revealing the key itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize)]
#[zeroize(drop)]
pub struct ViewingKey {
    pub key: [u8; 32],
    #[zeroize(skip)]
    pub key_hash: HexString,
    #[zeroize(skip)]
    pub label: Option<String>,
    #[zeroize(skip)]
    pub created_at_ms: u64,
}

/// Ciphertext produced by [`encrypt_for_viewing_key`]: nonce plus
/// ciphertext-with-appended-tag, each hex-encoded for transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedPayload {
    pub nonce: HexString,
    pub ciphertext: HexString,
}

/// Disclosure tier a transfer is encrypted and tagged under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrivacyLevel {
    Transparent,
    Shielded,
    Compliant,
}

/// Draw a fresh 32-byte viewing key.
pub fn generate_viewing_key(label: Option<String>) -> SipResult<ViewingKey> {
    let random = generate_random_bytes(32)?;
    let key: [u8; 32] = random
        .to_bytes()
        .map_err(|e| SipError::RngFailure(format!("drew malformed viewing key: {e}")))?
        .try_into()
        .map_err(|_| SipError::RngFailure("random viewing key was not 32 bytes".into()))?;

    let key_hash = derive_viewing_key_hash(&key);
    let created_at_ms = now_millis();

    Ok(ViewingKey {
        key,
        key_hash,
        label,
        created_at_ms,
    })
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Pure `SHA-256(k)`, for indexing a viewing key without revealing it.
pub fn derive_viewing_key_hash(key: &[u8; 32]) -> HexString {
    HexString::from_bytes(&Sha256::digest(key))
}

/// Encrypt `plaintext` under XChaCha20-Poly1305 with key `k` and a fresh
/// random 24-byte nonce. Associated data is always empty.
pub fn encrypt_for_viewing_key(k: &[u8; 32], plaintext: &[u8]) -> SipResult<EncryptedPayload> {
    let nonce_hex = generate_random_bytes(NONCE_LEN)?;
    let nonce_bytes = nonce_hex
        .to_bytes()
        .map_err(|e| SipError::RngFailure(format!("drew malformed nonce: {e}")))?;

    let cipher = XChaCha20Poly1305::new(Key::from_slice(k));
    let nonce = XNonce::from_slice(&nonce_bytes);

    let ciphertext = cipher.encrypt(nonce, plaintext).map_err(|e| {
        error!("XChaCha20-Poly1305 encryption failed: {e}");
        SipError::InvalidInput(format!("encryption failed: {e}"))
    })?;

    Ok(EncryptedPayload {
        nonce: HexString::from_bytes(&nonce_bytes),
        ciphertext: HexString::from_bytes(&ciphertext),
    })
}

/// Decrypt and verify `payload` under key `k`.
///
/// Any authentication failure collapses to [`SipError::DecryptionFailed`];
/// callers must not attempt to distinguish a wrong key from a tampered
/// ciphertext from a truncated payload.
pub fn decrypt_with_viewing_key(k: &[u8; 32], payload: &EncryptedPayload) -> SipResult<Vec<u8>> {
    let nonce_bytes = payload
        .nonce
        .to_bytes()
        .map_err(|_| SipError::DecryptionFailed)?;
    let ciphertext_bytes = payload
        .ciphertext
        .to_bytes()
        .map_err(|_| SipError::DecryptionFailed)?;

    if nonce_bytes.len() != NONCE_LEN || ciphertext_bytes.len() < TAG_LEN {
        return Err(SipError::DecryptionFailed);
    }

    let cipher = XChaCha20Poly1305::new(Key::from_slice(k));
    let nonce = XNonce::from_slice(&nonce_bytes);

    cipher
        .decrypt(nonce, ciphertext_bytes.as_slice())
        .map_err(|_| SipError::DecryptionFailed)
}

/// `true` for privacy levels that require encrypting transfer contents.
pub fn should_encrypt(level: PrivacyLevel) -> bool {
    matches!(level, PrivacyLevel::Shielded | PrivacyLevel::Compliant)
}

/// `true` for privacy levels that require bundling a viewing key for
/// after-the-fact disclosure.
pub fn should_include_viewing_key(level: PrivacyLevel) -> bool {
    matches!(level, PrivacyLevel::Compliant)
}

/// Normalize and validate a privacy-level string against the closed set
/// `{"transparent", "shielded", "compliant"}`.
pub fn validate_privacy_level(s: &str) -> SipResult<PrivacyLevel> {
    match s.to_lowercase().as_str() {
        "transparent" => Ok(PrivacyLevel::Transparent),
        "shielded" => Ok(PrivacyLevel::Shielded),
        "compliant" => Ok(PrivacyLevel::Compliant),
        other => Err(SipError::InvalidInput(format!(
            "unknown privacy level {other:?}"
        ))),
    }
}
