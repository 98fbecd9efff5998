//! secp256k1 curve arithmetic: scalars, points, and the encodings the rest of
//! the crate builds on.
//!
//! Scalars are elements of Z_n (n the curve order); points are elements of
//! the secp256k1 group. Everything above this module (commitments, stealth
//! addresses) talks to the curve only through the free functions here, never
//! through `k256` directly.

use crypto_bigint::ArrayEncoding;
use k256::elliptic_curve::group::Group;
use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::elliptic_curve::Field;
use k256::U256;
use rand::{CryptoRng, RngCore};
use serde::{de, de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

use crate::error::{SipError, SipResult};

/// A scalar in Z_n, the secp256k1 base field's companion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Zeroize)]
pub struct Scalar(k256::Scalar);

impl Scalar {
    pub fn random(rng: impl CryptoRng + RngCore) -> Self {
        Self(k256::Scalar::random(rng))
    }

    /// Reduce a 32-byte big-endian digest mod n, per SEC1 section 4.1.3.
    pub fn from_bytes_mod_order(bytes: &[u8; 32]) -> Self {
        Self(k256::Scalar::reduce(U256::from_be_byte_array((*bytes).into())))
    }

    /// Parse a scalar that must already be canonical (`< n`).
    pub fn from_canonical_bytes(bytes: &[u8; 32]) -> SipResult<Self> {
        let reduced = Self::from_bytes_mod_order(bytes);
        if &reduced.to_bytes() != bytes {
            return Err(SipError::InvalidInput(
                "scalar bytes are not canonical: value >= curve order".into(),
            ));
        }
        Ok(reduced)
    }

    pub fn to_bytes(self) -> [u8; 32] {
        self.0.to_bytes().into()
    }

    pub fn is_zero(&self) -> bool {
        bool::from(Field::is_zero(&self.0))
    }

    pub(crate) fn inner(&self) -> &k256::Scalar {
        &self.0
    }
}

impl From<k256::Scalar> for Scalar {
    fn from(s: k256::Scalar) -> Self {
        Self(s)
    }
}

/// A point on the secp256k1 curve, represented internally in projective
/// coordinates for cheap addition and scalar multiplication.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point(k256::ProjectivePoint);

impl Point {
    pub const GENERATOR: Point = Point(k256::ProjectivePoint::GENERATOR);

    pub(crate) fn from_projective(p: k256::ProjectivePoint) -> Self {
        Self(p)
    }

    pub(crate) fn inner(&self) -> &k256::ProjectivePoint {
        &self.0
    }

    /// SEC1 compressed encoding: a one-byte parity prefix (`0x02`/`0x03`)
    /// followed by the 32-byte big-endian x-coordinate.
    pub fn to_compressed(&self) -> [u8; 33] {
        let encoded = self.0.to_affine().to_encoded_point(true);
        let bytes = encoded.as_bytes();
        let mut out = [0u8; 33];
        out.copy_from_slice(bytes);
        out
    }

    /// SEC1 uncompressed encoding: `0x04` followed by the 32-byte x and
    /// 32-byte y coordinates.
    pub fn to_uncompressed(&self) -> [u8; 65] {
        let encoded = self.0.to_affine().to_encoded_point(false);
        let bytes = encoded.as_bytes();
        let mut out = [0u8; 65];
        out.copy_from_slice(bytes);
        out
    }

    /// Decode a SEC1 compressed point, rejecting the identity element,
    /// malformed lengths, bad parity prefixes, and x-coordinates with no
    /// corresponding curve point.
    pub fn from_compressed(bytes: &[u8]) -> SipResult<Self> {
        if bytes.len() != 33 {
            return Err(SipError::InvalidPoint(format!(
                "expected 33-byte compressed point, got {} bytes",
                bytes.len()
            )));
        }
        if bytes[0] != 0x02 && bytes[0] != 0x03 {
            return Err(SipError::InvalidPoint(format!(
                "invalid compressed point parity prefix: 0x{:02x}",
                bytes[0]
            )));
        }
        let encoded = k256::EncodedPoint::from_bytes(bytes)
            .map_err(|e| SipError::InvalidPoint(format!("malformed SEC1 encoding: {e}")))?;
        let affine: Option<k256::AffinePoint> =
            k256::AffinePoint::from_encoded_point(&encoded).into();
        let affine = affine.ok_or_else(|| {
            SipError::InvalidPoint("x-coordinate has no point on secp256k1".into())
        })?;
        let point = k256::ProjectivePoint::from(affine);
        if bool::from(point.is_identity()) {
            return Err(SipError::InvalidPoint(
                "point is the identity element".into(),
            ));
        }
        Ok(Self(point))
    }
}

/// Scalar multiplication: `k * P`.
pub fn point_mul(p: &Point, k: &Scalar) -> Point {
    Point(p.0 * k.0)
}

/// Point addition: `P + Q`.
pub fn point_add(p: &Point, q: &Point) -> Point {
    Point(p.0 + q.0)
}

/// Point negation, by flipping the compressed form's parity byte rather
/// than round-tripping through uncompressed coordinates and negating the
/// field element: cheaper, and it keeps the identity-rejection path in
/// `from_compressed` as the single place that validates point encodings.
pub fn point_neg(p: &Point) -> Point {
    let mut bytes = p.to_compressed();
    bytes[0] ^= 0x01;
    Point::from_compressed(&bytes).expect("negating a valid point yields a valid point")
}

/// `a + b (mod n)`.
pub fn scalar_add_mod_n(a: &Scalar, b: &Scalar) -> Scalar {
    Scalar(a.0 + b.0)
}

/// `a - b (mod n)`.
pub fn scalar_sub_mod_n(a: &Scalar, b: &Scalar) -> Scalar {
    Scalar(a.0 - b.0)
}

impl Serialize for Scalar {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_bytes().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes: [u8; 32] = Deserialize::deserialize(deserializer)?;
        Scalar::from_canonical_bytes(&bytes).map_err(de::Error::custom)
    }
}

impl Serialize for Point {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&self.to_compressed())
    }
}

impl<'de> Deserialize<'de> for Point {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PointVisitor;

        impl<'de> de::Visitor<'de> for PointVisitor {
            type Value = Point;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a 33-byte SEC1-compressed secp256k1 point")
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<Point, E>
            where
                E: de::Error,
            {
                Point::from_compressed(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_bytes(PointVisitor)
    }
}

/// `x mod n`, reducing an arbitrary 32-byte big-endian integer into Z_n.
/// Used to turn hash digests (shared secrets, challenge hashes) into
/// scalars per SEC1 section 4.1.3.
pub fn scalar_from_hash(digest: &[u8; 32]) -> Scalar {
    Scalar::from_bytes_mod_order(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_round_trips_through_compressed_encoding() {
        let g = Point::GENERATOR;
        let bytes = g.to_compressed();
        let decoded = Point::from_compressed(&bytes).unwrap();
        assert_eq!(g, decoded);
    }

    #[test]
    fn identity_point_is_rejected() {
        // 0x00 is not a valid parity prefix and the all-zero x-coordinate is
        // not on the curve either way; both paths must reject it.
        let identity_like = [0u8; 33];
        assert!(Point::from_compressed(&identity_like).is_err());
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(Point::from_compressed(&[0x02; 32]).is_err());
        assert!(Point::from_compressed(&[0x02; 34]).is_err());
    }

    #[test]
    fn bad_parity_prefix_is_rejected() {
        let mut bytes = Point::GENERATOR.to_compressed();
        bytes[0] = 0x04;
        assert!(Point::from_compressed(&bytes).is_err());
    }

    #[test]
    fn negation_is_additive_inverse() {
        let g = Point::GENERATOR;
        let neg_g = point_neg(&g);
        let sum = point_add(&g, &neg_g);
        assert!(bool::from(sum.0.is_identity()));
    }

    #[test]
    fn scalar_mul_distributes_over_addition() {
        let a = Scalar::random(rand::thread_rng());
        let b = Scalar::random(rand::thread_rng());
        let g = Point::GENERATOR;

        let lhs = point_mul(&g, &scalar_add_mod_n(&a, &b));
        let rhs = point_add(&point_mul(&g, &a), &point_mul(&g, &b));
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn scalar_from_hash_is_deterministic() {
        let digest = [7u8; 32];
        assert_eq!(scalar_from_hash(&digest), scalar_from_hash(&digest));
    }
}
