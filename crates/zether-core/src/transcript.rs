//! Fiat-Shamir challenge derivation
//!
//! Challenges are `SHA-256` over the raw concatenation of transcript items:
//! points as their 64-byte encoding, scalars as minimal big-endian bytes.
//! The 256-bit digest is shifted right by two (the bit length of N is 254)
//! and reduced mod N.

use crate::{scalar_to_min_bytes, Point, Scalar};
use ark_ff::PrimeField;
use num_bigint::BigUint;
use sha2::{Digest, Sha256};

/// Reduce a digest to a scalar: leading 254 bits, then mod N
pub fn hash_to_scalar(digest: &[u8]) -> Scalar {
    let shifted = BigUint::from_bytes_be(digest) >> 2u32;
    Scalar::from_be_bytes_mod_order(&shifted.to_bytes_be())
}

/// `challenge(msg) = hash_to_scalar(SHA-256(msg))`
pub fn challenge(msg: &[u8]) -> Scalar {
    hash_to_scalar(&Sha256::digest(msg))
}

/// Running SHA-256 transcript
#[derive(Clone, Default)]
pub struct Transcript {
    hasher: Sha256,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    pub fn append_point(&mut self, point: &Point) {
        self.hasher.update(point.to_bytes());
    }

    /// Append points back to back, without a length prefix
    pub fn append_points(&mut self, points: &[Point]) {
        for point in points {
            self.append_point(point);
        }
    }

    /// Append a scalar in minimal big-endian form
    pub fn append_scalar(&mut self, scalar: &Scalar) {
        self.hasher.update(scalar_to_min_bytes(scalar));
    }

    /// Challenge over everything appended so far; the transcript stays usable
    pub fn challenge_scalar(&self) -> Scalar {
        hash_to_scalar(&self.hasher.clone().finalize())
    }

    /// Raw digest of everything appended so far
    pub fn digest(&self) -> [u8; 32] {
        self.hasher.clone().finalize().into()
    }
}

impl std::fmt::Debug for Transcript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transcript").finish_non_exhaustive()
    }
}

/// Challenge chained from a previous one: `challenge(minbytes(prev))`
pub fn chained_challenge(prev: &Scalar) -> Scalar {
    challenge(&scalar_to_min_bytes(prev))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::Zero;
    use std::str::FromStr;

    #[test]
    fn test_known_challenges() {
        // Digest of the empty string exceeds N after the shift, so it is reduced
        let empty = Scalar::from_str(
            "3858591190549249035137397335388055608901610761633474404646645063703107776020",
        )
        .unwrap();
        assert_eq!(challenge(b""), empty);

        let abc = Scalar::from_str(
            "21085592121772700091630958732035565915026220923754128594365746457429204272491",
        )
        .unwrap();
        assert_eq!(challenge(b"abc"), abc);
    }

    #[test]
    fn test_transcript_matches_concatenation() {
        let point = Point::identity();
        let scalar = Scalar::from(258u64);

        let mut transcript = Transcript::new();
        transcript.append_point(&point);
        transcript.append_scalar(&scalar);

        let mut msg = point.to_bytes().to_vec();
        msg.extend_from_slice(&[1, 2]);
        assert_eq!(transcript.challenge_scalar(), challenge(&msg));
    }

    #[test]
    fn test_transcript_continues_after_challenge() {
        let mut transcript = Transcript::new();
        transcript.append_bytes(b"a");
        let first = transcript.challenge_scalar();
        transcript.append_scalar(&first);
        let second = transcript.challenge_scalar();
        assert_ne!(first, second);

        let mut msg = b"a".to_vec();
        msg.extend(scalar_to_min_bytes(&first));
        assert_eq!(second, challenge(&msg));
    }

    #[test]
    fn test_zero_scalar_appends_nothing() {
        let mut transcript = Transcript::new();
        transcript.append_scalar(&Scalar::zero());
        assert_eq!(transcript.challenge_scalar(), challenge(b""));
        assert_eq!(chained_challenge(&Scalar::zero()), challenge(b""));
    }
}
