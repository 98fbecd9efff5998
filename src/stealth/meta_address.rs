//! Stealth meta-address: the reusable public identity a recipient publishes,
//! and its textual encoding.

use serde::{Deserialize, Serialize};

use crate::error::{SipError, SipResult};
use crate::types::ChainId;

/// A recipient's long-lived, reusable public identity: two curve points
/// (spending and viewing), plus a chain tag and optional human label.
///
/// Publishing this does not let anyone link the recipient's transactions to
/// each other or to this meta-address; only the recipient (holding both
/// private scalars) can recognize and spend from stealth addresses derived
/// from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StealthMetaAddress {
    pub spending_public_key: [u8; 33],
    pub viewing_public_key: [u8; 33],
    pub chain: ChainId,
    pub label: Option<String>,
}

/// Encode as `sip:<chain>:<spending_hex>:<viewing_hex>`.
pub fn encode_stealth_meta_address(meta: &StealthMetaAddress) -> String {
    format!(
        "sip:{}:{}:{}",
        meta.chain,
        hex::encode(meta.spending_public_key),
        hex::encode(meta.viewing_public_key)
    )
}

/// Decode a `sip:<chain>:<spending_hex>:<viewing_hex>` string.
///
/// Performs no curve-point validation: that's the caller's job the first
/// time the meta-address is actually used (e.g. in
/// [`crate::stealth::generate_stealth_address`]).
pub fn decode_stealth_meta_address(encoded: &str) -> SipResult<StealthMetaAddress> {
    let tokens: Vec<&str> = encoded.split(':').collect();
    if tokens.len() != 4 {
        return Err(SipError::InvalidInput(format!(
            "expected 4 colon-separated tokens, got {}",
            tokens.len()
        )));
    }
    if tokens[0] != "sip" {
        return Err(SipError::InvalidInput(format!(
            "expected \"sip\" prefix token, got {:?}",
            tokens[0]
        )));
    }

    let spending_public_key = parse_compressed_point_hex(tokens[2])?;
    let viewing_public_key = parse_compressed_point_hex(tokens[3])?;

    Ok(StealthMetaAddress {
        spending_public_key,
        viewing_public_key,
        chain: ChainId::from(tokens[1]),
        label: None,
    })
}

fn parse_compressed_point_hex(s: &str) -> SipResult<[u8; 33]> {
    let bytes = hex::decode(s)
        .map_err(|e| SipError::InvalidInput(format!("malformed hex token {s:?}: {e}")))?;
    bytes
        .try_into()
        .map_err(|v: Vec<u8>| SipError::InvalidInput(format!("expected 33 bytes, got {}", v.len())))
}
