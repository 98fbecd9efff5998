//! Chain-specific projection of a stealth public key onto an EIP-55
//! checksummed Ethereum address. The only chain-family code this crate
//! carries; everything else about address formats is out of scope.

use sha3::{Digest, Keccak256};

use crate::curve::Point;
use crate::error::SipResult;

/// Derive the EIP-55 checksummed Ethereum address for a compressed
/// secp256k1 public key.
pub fn public_key_to_eth_address(public_key: &[u8; 33]) -> SipResult<String> {
    let point = Point::from_compressed(public_key)?;
    let uncompressed = point.to_uncompressed();
    let payload = &uncompressed[1..]; // drop the 0x04 prefix, keep x || y

    let digest = Keccak256::digest(payload);
    let addr_bytes = &digest[12..32];

    Ok(checksum_address(addr_bytes))
}

fn checksum_address(addr_bytes: &[u8]) -> String {
    let lowercase_hex = hex::encode(addr_bytes);
    let checksum_digest = Keccak256::digest(lowercase_hex.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, ch) in lowercase_hex.chars().enumerate() {
        if ch.is_ascii_alphabetic() {
            let checksum_nibble = if i % 2 == 0 {
                checksum_digest[i / 2] >> 4
            } else {
                checksum_digest[i / 2] & 0x0f
            };
            if checksum_nibble >= 8 {
                out.push(ch.to_ascii_uppercase());
                continue;
            }
        }
        out.push(ch);
    }
    out
}
