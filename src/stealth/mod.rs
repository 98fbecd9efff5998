//! EIP-5564-style stealth addresses: one-time addresses derived from a
//! recipient's reusable meta-address, with a view tag for fast recipient-side
//! filtering.

pub mod eth;
pub mod meta_address;

pub use eth::public_key_to_eth_address;
pub use meta_address::{decode_stealth_meta_address, encode_stealth_meta_address, StealthMetaAddress};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::curve::{self, point_add, point_mul, Point, Scalar};
use crate::error::{SipError, SipResult};
use crate::hash::generate_random_bytes;
use crate::types::ChainId;

/// A one-time stealth address derived for a single transfer: the stealth
/// public key, the ephemeral public key the recipient needs to recompute the
/// shared secret, and a one-byte view tag for fast filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StealthAddress {
    pub address: [u8; 33],
    pub ephemeral_public_key: [u8; 33],
    pub view_tag: u8,
}

/// The private key recovered for a stealth address, once the recipient has
/// confirmed ownership via [`check_stealth_address`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize)]
#[zeroize(drop)]
pub struct StealthAddressRecovery {
    pub private_key: [u8; 32],
}

/// Draw a fresh spending/viewing keypair for a recipient's reusable
/// meta-address.
///
/// Returns the public meta-address alongside the two private scalars; the
/// caller is responsible for storing the private keys securely (key
/// management and storage are out of scope for this crate).
pub fn generate_stealth_meta_address(
    chain: impl Into<ChainId>,
    label: Option<String>,
) -> SipResult<(StealthMetaAddress, [u8; 32], [u8; 32])> {
    let p_spend = random_nonzero_scalar()?;
    let p_view = random_nonzero_scalar()?;

    let spending_public_key = point_mul(&Point::GENERATOR, &p_spend).to_compressed();
    let viewing_public_key = point_mul(&Point::GENERATOR, &p_view).to_compressed();

    let meta = StealthMetaAddress {
        spending_public_key,
        viewing_public_key,
        chain: chain.into(),
        label,
    };

    Ok((meta, p_spend.to_bytes(), p_view.to_bytes()))
}

/// Sender-side: derive a fresh one-time stealth address for `meta`.
///
/// Returns the stealth address alongside the 32-byte shared-secret hash
/// `h = SHA-256(compressed(S))`, which some callers (e.g. balance proof
/// construction) need in addition to the address itself.
pub fn generate_stealth_address(meta: &StealthMetaAddress) -> SipResult<(StealthAddress, [u8; 32])> {
    let spending_public_key = Point::from_compressed(&meta.spending_public_key)?;
    let viewing_public_key = Point::from_compressed(&meta.viewing_public_key)?;

    loop {
        let r = random_nonzero_scalar()?;
        let ephemeral_public_key = point_mul(&Point::GENERATOR, &r);
        let shared_secret = point_mul(&spending_public_key, &r);

        let h_bytes: [u8; 32] = Sha256::digest(shared_secret.to_compressed()).into();
        let h = curve::scalar_from_hash(&h_bytes);
        if h.is_zero() {
            // h ≡ 0 mod n collapses the stealth key to the bare viewing key;
            // redraw the ephemeral scalar rather than leak that degenerate case.
            continue;
        }

        let stealth_public_key = point_add(&viewing_public_key, &point_mul(&Point::GENERATOR, &h));

        let address = StealthAddress {
            address: stealth_public_key.to_compressed(),
            ephemeral_public_key: ephemeral_public_key.to_compressed(),
            view_tag: h_bytes[0],
        };
        return Ok((address, h_bytes));
    }
}

/// Recipient-side filter: does `stealth` belong to the holder of
/// `(p_spend, p_view)`?
///
/// Checks the view tag first (~1/256 false-positive rate) before doing the
/// full scalar recomputation, so a recipient scanning many addresses spends
/// most of its time on the cheap path. Any parsing failure collapses to
/// `false`: this runs over untrusted data during scanning.
pub fn check_stealth_address(stealth: &StealthAddress, p_spend: &[u8; 32], p_view: &[u8; 32]) -> bool {
    match check_stealth_address_inner(stealth, p_spend, p_view) {
        Ok(matches) => matches,
        Err(_) => false,
    }
}

fn check_stealth_address_inner(
    stealth: &StealthAddress,
    p_spend: &[u8; 32],
    p_view: &[u8; 32],
) -> SipResult<bool> {
    let (h_bytes, q) = recompute_shared_secret(stealth, p_spend, p_view)?;
    if h_bytes[0] != stealth.view_tag {
        return Ok(false);
    }

    let candidate = point_mul(&Point::GENERATOR, &q);
    let claimed = Point::from_compressed(&stealth.address)?;
    Ok(candidate.to_compressed() == claimed.to_compressed())
}

/// Recover the spending private key for a stealth address the caller has
/// already confirmed ownership of via [`check_stealth_address`].
///
/// Does not re-verify the address: a caller that skips the check and feeds
/// this the wrong keypair gets back a scalar that simply doesn't spend the
/// address.
pub fn derive_stealth_private_key(
    stealth: &StealthAddress,
    p_spend: &[u8; 32],
    p_view: &[u8; 32],
) -> SipResult<StealthAddressRecovery> {
    let (_, q) = recompute_shared_secret(stealth, p_spend, p_view)?;
    Ok(StealthAddressRecovery {
        private_key: q.to_bytes(),
    })
}

fn recompute_shared_secret(
    stealth: &StealthAddress,
    p_spend: &[u8; 32],
    p_view: &[u8; 32],
) -> SipResult<([u8; 32], Scalar)> {
    let p_spend_scalar = Scalar::from_canonical_bytes(p_spend)?;
    let p_view_scalar = Scalar::from_canonical_bytes(p_view)?;
    let ephemeral_public_key = Point::from_compressed(&stealth.ephemeral_public_key)?;

    let shared_secret = point_mul(&ephemeral_public_key, &p_spend_scalar);
    let h_bytes: [u8; 32] = Sha256::digest(shared_secret.to_compressed()).into();
    let h = curve::scalar_from_hash(&h_bytes);

    let q = curve::scalar_add_mod_n(&p_view_scalar, &h);
    Ok((h_bytes, q))
}

fn random_nonzero_scalar() -> SipResult<Scalar> {
    loop {
        let random = generate_random_bytes(32)?;
        let bytes: [u8; 32] = random
            .to_bytes()
            .map_err(|e| SipError::RngFailure(format!("drew malformed random scalar: {e}")))?
            .try_into()
            .map_err(|_| SipError::RngFailure("random scalar was not 32 bytes".into()))?;

        let scalar = curve::scalar_from_hash(&bytes);
        if !scalar.is_zero() {
            return Ok(scalar);
        }
    }
}
