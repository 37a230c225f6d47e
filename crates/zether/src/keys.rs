//! Account key pairs

use ark_ff::Zero;
use rand_core::{CryptoRng, RngCore};
use zether_core::{random_scalar, Point, PublicParams, Scalar, ZetherError, ZetherResult};

/// Secret scalar `sk` with public point `pk = sk·G`
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    sk: Scalar,
    pk: Point,
}

impl KeyPair {
    /// Fresh key pair with a non-zero secret
    pub fn generate<R: RngCore + CryptoRng>(params: &PublicParams, rng: &mut R) -> Self {
        let sk = nonzero_scalar(rng);
        Self {
            sk,
            pk: params.g() * sk,
        }
    }

    pub fn from_secret(params: &PublicParams, sk: Scalar) -> ZetherResult<Self> {
        if sk.is_zero() {
            return Err(ZetherError::InvalidParameters("secret key is zero".to_string()));
        }
        Ok(Self {
            sk,
            pk: params.g() * sk,
        })
    }

    pub fn public(&self) -> Point {
        self.pk
    }

    pub fn secret(&self) -> &Scalar {
        &self.sk
    }

    pub fn public_hex(&self) -> String {
        self.pk.to_hex()
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("pk", &self.pk)
            .finish_non_exhaustive()
    }
}

/// Parse a hex-encoded public key, accepting an optional `0x` prefix
pub fn public_key_from_hex(s: &str) -> ZetherResult<Point> {
    let point = Point::from_bytes(&zether_core::decode_hex(s)?)?;
    if point.is_identity() {
        return Err(ZetherError::DecodeError("public key is the identity".to_string()));
    }
    Ok(point)
}

pub(crate) fn nonzero_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Scalar {
    loop {
        let k = random_scalar(rng);
        if !k.is_zero() {
            return k;
        }
    }
}
