//! Shared value types used across the SDK's public API.

use serde::{Deserialize, Serialize};

/// A lowercase `0x`-prefixed hex string.
///
/// Wrapping `String` rather than passing bare strings around lets every
/// constructor enforce the `0x` prefix and even-length hex body once, at the
/// boundary, instead of re-checking it at every call site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexString(String);

impl HexString {
    /// Encode raw bytes as a `0x`-prefixed lowercase hex string.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut s = String::with_capacity(2 + data.len() * 2);
        s.push_str("0x");
        for byte in data {
            s.push_str(&format!("{:02x}", byte));
        }
        Self(s)
    }

    /// Decode to raw bytes, accepting an optional `0x` prefix.
    pub fn to_bytes(&self) -> Result<Vec<u8>, hex::FromHexError> {
        let stripped = self.0.strip_prefix("0x").unwrap_or(&self.0);
        hex::decode(stripped)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for HexString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for HexString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for HexString {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Chain identifier (e.g. `"ethereum"`, `"solana"`, `"near"`).
///
/// Free-form: the closed lookup table of chain cost characteristics is out
/// of scope for this crate (see the crate-level docs).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainId(String);

impl ChainId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ChainId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ChainId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
