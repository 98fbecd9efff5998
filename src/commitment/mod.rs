//! Pedersen commitments over secp256k1: `C = value·G + blinding·H`.
//!
//! `H` is a nothing-up-my-sleeve point with no known discrete-log relation
//! to `G`, derived once via try-and-increment and cached for the life of the
//! process.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::error;
use zeroize::Zeroize;

use crate::curve::{
    self, point_add, point_mul, point_neg, scalar_add_mod_n, scalar_sub_mod_n, Point, Scalar,
};
use crate::error::{SipError, SipResult};
use crate::hash::generate_random_bytes;

const GENERATOR_H_DOMAIN_TAG: &str = "SIP-PEDERSEN-GENERATOR-H-v1";
const GENERATOR_H_MAX_ATTEMPTS: u32 = 256;

fn generator_h() -> &'static Point {
    static H: OnceLock<Point> = OnceLock::new();
    H.get_or_init(|| derive_generator_h().expect("NUMS generator H derivation must succeed"))
}

fn derive_generator_h() -> SipResult<Point> {
    for counter in 0..GENERATOR_H_MAX_ATTEMPTS {
        let preimage = format!("{GENERATOR_H_DOMAIN_TAG}:{counter}");
        let digest = Sha256::digest(preimage.as_bytes());

        let mut candidate = [0u8; 33];
        candidate[0] = 0x02;
        candidate[1..].copy_from_slice(&digest);

        if let Ok(point) = Point::from_compressed(&candidate) {
            return Ok(point);
        }
    }
    error!(
        attempts = GENERATOR_H_MAX_ATTEMPTS,
        "exhausted try-and-increment search for NUMS generator H"
    );
    Err(SipError::GeneratorInitFailure(format!(
        "no valid curve point found in {GENERATOR_H_MAX_ATTEMPTS} attempts"
    )))
}

/// A Pedersen commitment to a hidden value, plus the blinding factor that
/// opens it.
///
/// `blinding` is zeroized on drop; `commitment` is public by construction
/// (it is meant to be published) and is not secret material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize)]
#[zeroize(drop)]
pub struct PedersenCommitment {
    #[zeroize(skip)]
    pub commitment: [u8; 33],
    pub blinding: [u8; 32],
}

/// Uncompressed affine coordinates of a curve generator, for consumption by
/// external ZK circuits that need raw (x, y) rather than a compressed point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffineCoordinates {
    pub x: [u8; 32],
    pub y: [u8; 32],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generators {
    pub g: AffineCoordinates,
    pub h: AffineCoordinates,
}

fn affine_coordinates_of(p: &Point) -> AffineCoordinates {
    let bytes = p.to_uncompressed();
    let mut x = [0u8; 32];
    let mut y = [0u8; 32];
    x.copy_from_slice(&bytes[1..33]);
    y.copy_from_slice(&bytes[33..65]);
    AffineCoordinates { x, y }
}

fn scalar_from_blinding(blinding: &[u8; 32]) -> Scalar {
    curve::scalar_from_hash(blinding)
}

/// Commit to `value` (strictly less than the curve order) with an optional
/// caller-supplied 32-byte blinding. If omitted, draws one from the OS RNG.
///
/// A blinding that reduces to zero mod n is a fatal RNG-failure signal: the
/// caller chose (or was handed) a value that throws away the commitment's
/// hiding property, so this returns an error rather than silently redrawing
/// a caller-supplied blinding.
pub fn commit(value: u128, blinding: Option<[u8; 32]>) -> SipResult<PedersenCommitment> {
    let blinding_bytes = match blinding {
        Some(b) => b,
        None => {
            let random = generate_random_bytes(32)?;
            let bytes = random.to_bytes().map_err(|e| {
                SipError::RngFailure(format!("drew malformed random blinding: {e}"))
            })?;
            bytes
                .try_into()
                .map_err(|_| SipError::RngFailure("random blinding was not 32 bytes".into()))?
        }
    };

    let r = scalar_from_blinding(&blinding_bytes);
    if r.is_zero() {
        error!("blinding factor reduced to zero mod curve order");
        return Err(SipError::RngFailure(
            "blinding factor is zero mod curve order".into(),
        ));
    }

    let commitment_point = commitment_point(value, &r);
    Ok(PedersenCommitment {
        commitment: commitment_point.to_compressed(),
        blinding: blinding_bytes,
    })
}

fn commitment_point(value: u128, r: &Scalar) -> Point {
    let value_bytes = value_to_scalar_bytes(value);
    let v = Scalar::from_bytes_mod_order(&value_bytes);
    let value_term = point_mul(&Point::GENERATOR, &v);
    let blinding_term = point_mul(generator_h(), r);
    point_add(&value_term, &blinding_term)
}

fn value_to_scalar_bytes(value: u128) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    bytes[16..].copy_from_slice(&value.to_be_bytes());
    bytes
}

/// Recompute `C' = value·G + blinding·H` and compare it to `commitment`.
///
/// Any malformed input collapses to `false`: this runs over untrusted data
/// during scanning and must never raise.
pub fn verify_opening(commitment: &[u8; 33], value: u128, blinding: &[u8; 32]) -> bool {
    let Ok(claimed) = Point::from_compressed(commitment) else {
        return false;
    };
    let r = scalar_from_blinding(blinding);
    let recomputed = commitment_point(value, &r);
    claimed.to_compressed() == recomputed.to_compressed()
}

/// `commit_zero(blinding) = (blinding·H, blinding)`, a convenience for
/// balance proofs where the committed value is known to be zero.
pub fn commit_zero(blinding: [u8; 32]) -> SipResult<PedersenCommitment> {
    commit(0, Some(blinding))
}

/// `C1 + C2`.
pub fn add_commitments(c1: &[u8; 33], c2: &[u8; 33]) -> SipResult<[u8; 33]> {
    let p1 = Point::from_compressed(c1)?;
    let p2 = Point::from_compressed(c2)?;
    Ok(point_add(&p1, &p2).to_compressed())
}

/// `C1 + (-C2)`, using parity-flip negation.
pub fn subtract_commitments(c1: &[u8; 33], c2: &[u8; 33]) -> SipResult<[u8; 33]> {
    let p1 = Point::from_compressed(c1)?;
    let p2 = Point::from_compressed(c2)?;
    Ok(point_add(&p1, &point_neg(&p2)).to_compressed())
}

/// `(r1 + r2) mod n`.
pub fn add_blindings(r1: &[u8; 32], r2: &[u8; 32]) -> [u8; 32] {
    let sum = scalar_add_mod_n(&scalar_from_blinding(r1), &scalar_from_blinding(r2));
    sum.to_bytes()
}

/// `(r1 - r2) mod n`.
pub fn subtract_blindings(r1: &[u8; 32], r2: &[u8; 32]) -> [u8; 32] {
    let diff = scalar_sub_mod_n(&scalar_from_blinding(r1), &scalar_from_blinding(r2));
    diff.to_bytes()
}

/// Uncompressed affine coordinates of `G` and `H`, for external ZK circuits.
pub fn get_generators() -> Generators {
    Generators {
        g: affine_coordinates_of(&Point::GENERATOR),
        h: affine_coordinates_of(generator_h()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_then_verify_round_trips() {
        let c = commit(1000, None).unwrap();
        assert_eq!(c.commitment.len(), 33);
        assert_eq!(c.blinding.len(), 32);
        assert!(verify_opening(&c.commitment, 1000, &c.blinding));
        assert!(!verify_opening(&c.commitment, 1001, &c.blinding));
    }

    #[test]
    fn homomorphic_sum_matches_direct_commitment() {
        let c1 = commit(100, None).unwrap();
        let c2 = commit(50, None).unwrap();
        let summed = add_commitments(&c1.commitment, &c2.commitment).unwrap();
        let summed_blinding = add_blindings(&c1.blinding, &c2.blinding);
        assert!(verify_opening(&summed, 150, &summed_blinding));
    }

    #[test]
    fn homomorphic_difference_matches_direct_commitment() {
        let c1 = commit(150, None).unwrap();
        let c2 = commit(50, None).unwrap();
        let diff = subtract_commitments(&c1.commitment, &c2.commitment).unwrap();
        let diff_blinding = subtract_blindings(&c1.blinding, &c2.blinding);
        assert!(verify_opening(&diff, 100, &diff_blinding));
    }

    #[test]
    fn commit_zero_opens_to_zero() {
        let c = commit_zero([9u8; 32]).unwrap();
        assert!(verify_opening(&c.commitment, 0, &c.blinding));
    }

    #[test]
    fn generators_are_byte_stable() {
        let first = get_generators();
        let second = get_generators();
        assert_eq!(first, second);
    }

    #[test]
    fn verify_opening_rejects_malformed_commitment() {
        assert!(!verify_opening(&[0u8; 33], 1000, &[1u8; 32]));
    }
}
