//! Additive ElGamal over the value generator `G`
//!
//! A ciphertext `(C, D) = (b·G + r·pk, r·G)` decrypts to the group element
//! `b·G`. Recovering `b` itself needs a bounded discrete-log search, see
//! [`crate::balance`].

use crate::keys::nonzero_scalar;
use ark_ff::{BigInteger, PrimeField};
use rand_core::{CryptoRng, RngCore};
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use zether_core::{Point, PublicParams, Scalar, ZetherError, ZetherResult, POINT_BYTES};

/// Encoded ciphertext length, `C ‖ D`
pub const CIPHERTEXT_BYTES: usize = 2 * POINT_BYTES;

/// ElGamal ciphertext `(C, D)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Ciphertext {
    pub c: Point,
    pub d: Point,
}

impl Ciphertext {
    pub fn new(c: Point, d: Point) -> Self {
        Self { c, d }
    }

    /// The all-identity ciphertext of a never-funded account
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn is_identity(&self) -> bool {
        self.c.is_identity() && self.d.is_identity()
    }

    /// Encrypt `value` under `pk` with fresh randomness
    pub fn encrypt<R: RngCore + CryptoRng>(params: &PublicParams, pk: &Point, value: u64, rng: &mut R) -> Self {
        Self::encrypt_with_randomness(params, pk, Scalar::from(value), nonzero_scalar(rng))
    }

    /// Encrypt `value` under `pk` with caller-chosen randomness `r`
    pub fn encrypt_with_randomness(params: &PublicParams, pk: &Point, value: Scalar, r: Scalar) -> Self {
        Self {
            c: params.g() * value + *pk * r,
            d: params.g() * r,
        }
    }

    /// Encrypt a big-endian plaintext; values `≥ N` are `OutOfRange`
    pub fn encrypt_bytes<R: RngCore + CryptoRng>(
        params: &PublicParams,
        pk: &Point,
        plaintext: &[u8],
        rng: &mut R,
    ) -> ZetherResult<Self> {
        let value = plaintext_from_be_bytes(plaintext)?;
        Ok(Self::encrypt_with_randomness(params, pk, value, nonzero_scalar(rng)))
    }

    /// `C - sk·D`, the plaintext as a group element
    pub fn decrypt(&self, sk: &Scalar) -> Point {
        self.c - self.d * *sk
    }

    pub fn to_bytes(&self) -> [u8; CIPHERTEXT_BYTES] {
        let mut out = [0u8; CIPHERTEXT_BYTES];
        out[..POINT_BYTES].copy_from_slice(&self.c.to_bytes());
        out[POINT_BYTES..].copy_from_slice(&self.d.to_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> ZetherResult<Self> {
        if bytes.len() != CIPHERTEXT_BYTES {
            return Err(ZetherError::DecodeError(format!(
                "ciphertext must be {} bytes, got {}",
                CIPHERTEXT_BYTES,
                bytes.len()
            )));
        }
        Ok(Self {
            c: Point::from_bytes(&bytes[..POINT_BYTES])?,
            d: Point::from_bytes(&bytes[POINT_BYTES..])?,
        })
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn from_hex(s: &str) -> ZetherResult<Self> {
        Self::from_bytes(&zether_core::decode_hex(s)?)
    }
}

zether_core::impl_hex_serde!(Ciphertext);

impl Add for Ciphertext {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            c: self.c + rhs.c,
            d: self.d + rhs.d,
        }
    }
}

impl AddAssign for Ciphertext {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Ciphertext {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            c: self.c - rhs.c,
            d: self.d - rhs.d,
        }
    }
}

impl SubAssign for Ciphertext {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Ciphertext {
    type Output = Self;

    fn neg(self) -> Self {
        Self { c: -self.c, d: -self.d }
    }
}

/// Interpret big-endian bytes as a plaintext scalar, rejecting values `≥ N`
pub fn plaintext_from_be_bytes(bytes: &[u8]) -> ZetherResult<Scalar> {
    let significant: Vec<u8> = bytes.iter().copied().skip_while(|b| *b == 0).collect();
    let order = Scalar::MODULUS.to_bytes_be();
    let too_large = significant.len() > order.len()
        || (significant.len() == order.len() && significant.as_slice() >= order.as_slice());
    if too_large {
        return Err(ZetherError::OutOfRange("plaintext is not below the group order".to_string()));
    }
    Ok(Scalar::from_be_bytes_mod_order(&significant))
}
