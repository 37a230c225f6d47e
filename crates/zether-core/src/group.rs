//! BN254 G1 points and scalar encodings

use crate::{ensure_length, ZetherError, ZetherResult};
use ark_bn254::{Fq, Fr, G1Affine, G1Projective};
use ark_ec::{AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::{BigInteger, PrimeField, UniformRand, Zero};
use num_bigint::BigUint;
use rand_core::{CryptoRng, RngCore};

/// Integer modulo the group order N
pub type Scalar = Fr;

/// Encoded size of a point: big-endian X‖Y
pub const POINT_BYTES: usize = 64;

/// Encoded size of a scalar or base field element
pub const SCALAR_BYTES: usize = 32;

/// A point on BN254 G1 with the 64-byte wire encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point(pub G1Projective);

impl Point {
    /// Identity element
    pub fn identity() -> Self {
        Self(G1Projective::zero())
    }

    pub fn is_identity(&self) -> bool {
        self.0.is_zero()
    }

    /// Build a point from affine coordinates, checking the curve equation
    pub fn from_coordinates(x: Fq, y: Fq) -> ZetherResult<Self> {
        let affine = G1Affine::new_unchecked(x, y);
        if !affine.is_on_curve() {
            return Err(ZetherError::DecodeError("point not on curve".to_string()));
        }
        // G1 has cofactor 1, so every curve point is in the prime-order group
        Ok(Self(affine.into_group()))
    }

    /// Uncompressed affine encoding, identity as 64 zero bytes
    pub fn to_bytes(&self) -> [u8; POINT_BYTES] {
        let mut out = [0u8; POINT_BYTES];
        let affine = self.0.into_affine();
        if affine.infinity {
            return out;
        }
        out[..SCALAR_BYTES].copy_from_slice(&field_to_bytes(&affine.x));
        out[SCALAR_BYTES..].copy_from_slice(&field_to_bytes(&affine.y));
        out
    }

    /// Decode a 64-byte point, rejecting non-canonical and off-curve input
    pub fn from_bytes(bytes: &[u8]) -> ZetherResult<Self> {
        if bytes.len() != POINT_BYTES {
            return Err(ZetherError::DecodeError(format!(
                "point must be {} bytes, got {}",
                POINT_BYTES,
                bytes.len()
            )));
        }
        if bytes.iter().all(|b| *b == 0) {
            return Ok(Self::identity());
        }

        let x = canonical_field::<Fq>(&bytes[..SCALAR_BYTES], "point x")?;
        let y = canonical_field::<Fq>(&bytes[SCALAR_BYTES..], "point y")?;
        Self::from_coordinates(x, y)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn from_hex(s: &str) -> ZetherResult<Self> {
        let bytes = hex::decode(s).map_err(|e| ZetherError::DecodeError(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Perform multi-scalar multiplication `Σ sᵢ·Pᵢ`
    pub fn multiscalar_mul(scalars: &[Scalar], points: &[Point]) -> ZetherResult<Self> {
        ensure_length(scalars.len(), points.len())?;
        if scalars.is_empty() {
            return Ok(Self::identity());
        }

        let projective: Vec<G1Projective> = points.iter().map(|p| p.0).collect();
        let bases = G1Projective::normalize_batch(&projective);
        Ok(Self(G1Projective::msm_unchecked(&bases, scalars)))
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl std::ops::AddAssign for Point {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl std::ops::SubAssign for Point {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl std::ops::Mul<Scalar> for Point {
    type Output = Self;

    fn mul(self, scalar: Scalar) -> Self {
        Self(self.0 * scalar)
    }
}

impl std::ops::Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Point {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::identity(), |acc, p| acc + p)
    }
}

impl From<G1Projective> for Point {
    fn from(point: G1Projective) -> Self {
        Self(point)
    }
}

impl From<G1Affine> for Point {
    fn from(point: G1Affine) -> Self {
        Self(point.into_group())
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

crate::impl_hex_serde!(Point);

fn field_to_bytes<F: PrimeField>(value: &F) -> [u8; SCALAR_BYTES] {
    let bytes = value.into_bigint().to_bytes_be();
    let mut out = [0u8; SCALAR_BYTES];
    let start = SCALAR_BYTES.saturating_sub(bytes.len());
    out[start..].copy_from_slice(&bytes[bytes.len().saturating_sub(SCALAR_BYTES)..]);
    out
}

fn canonical_field<F: PrimeField>(bytes: &[u8], what: &str) -> ZetherResult<F> {
    let value = F::from_be_bytes_mod_order(bytes);
    if field_to_bytes(&value)[..] != bytes[..] {
        return Err(ZetherError::DecodeError(format!("{} is not canonical", what)));
    }
    Ok(value)
}

/// 32-byte big-endian scalar encoding
pub fn scalar_to_bytes(scalar: &Scalar) -> [u8; SCALAR_BYTES] {
    field_to_bytes(scalar)
}

/// Decode a 32-byte big-endian scalar, rejecting values ≥ N
pub fn scalar_from_bytes(bytes: &[u8]) -> ZetherResult<Scalar> {
    if bytes.len() != SCALAR_BYTES {
        return Err(ZetherError::DecodeError(format!(
            "scalar must be {} bytes, got {}",
            SCALAR_BYTES,
            bytes.len()
        )));
    }
    canonical_field::<Scalar>(bytes, "scalar")
}

/// Big-endian bytes without leading zeros; zero encodes as the empty string
pub fn scalar_to_min_bytes(scalar: &Scalar) -> Vec<u8> {
    let bytes = scalar_to_bytes(scalar);
    let first = bytes.iter().position(|b| *b != 0).unwrap_or(SCALAR_BYTES);
    bytes[first..].to_vec()
}

/// Minimal big-endian bytes of an unsigned integer
pub fn u64_to_min_bytes(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    bytes[first..].to_vec()
}

/// Base-10 rendering of the canonical integer
pub fn scalar_to_decimal(scalar: &Scalar) -> String {
    BigUint::from(scalar.into_bigint()).to_string()
}

/// Uniformly random scalar
pub fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Scalar {
    Scalar::rand(rng)
}

/// Vector of uniformly random scalars
pub fn random_scalars<R: RngCore + CryptoRng>(rng: &mut R, n: usize) -> Vec<Scalar> {
    (0..n).map(|_| Scalar::rand(rng)).collect()
}
