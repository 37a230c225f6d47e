//! Schnorr signatures over `G`, used to register accounts

use crate::keys::{nonzero_scalar, KeyPair};
use ark_ff::Zero;
use rand_core::{CryptoRng, RngCore};
use tracing::warn;
use zether_core::{
    scalar_from_bytes, scalar_to_bytes, Point, PublicParams, Scalar, Transcript, ZetherError,
    ZetherResult, SCALAR_BYTES,
};

/// Encoded signature length, `R ‖ S`
pub const SIGNATURE_BYTES: usize = 2 * SCALAR_BYTES;

/// Signature `(r, s)` with `r = H(msg ‖ K ‖ pk)` and `s = k + r·sk`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub r: Scalar,
    pub s: Scalar,
}

impl Signature {
    pub fn to_bytes(&self) -> [u8; SIGNATURE_BYTES] {
        let mut out = [0u8; SIGNATURE_BYTES];
        out[..SCALAR_BYTES].copy_from_slice(&scalar_to_bytes(&self.r));
        out[SCALAR_BYTES..].copy_from_slice(&scalar_to_bytes(&self.s));
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> ZetherResult<Self> {
        if bytes.len() != SIGNATURE_BYTES {
            return Err(ZetherError::DecodeError(format!(
                "signature must be {} bytes, got {}",
                SIGNATURE_BYTES,
                bytes.len()
            )));
        }
        Ok(Self {
            r: scalar_from_bytes(&bytes[..SCALAR_BYTES])?,
            s: scalar_from_bytes(&bytes[SCALAR_BYTES..])?,
        })
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn from_hex(s: &str) -> ZetherResult<Self> {
        Self::from_bytes(&zether_core::decode_hex(s)?)
    }
}

zether_core::impl_hex_serde!(Signature);

fn signature_challenge(msg: &[u8], k: &Point, pk: &Point) -> Scalar {
    let mut transcript = Transcript::new();
    transcript.append_bytes(msg);
    transcript.append_point(k);
    transcript.append_point(pk);
    transcript.challenge_scalar()
}

/// Sign `msg` with `key`
pub fn sign<R: RngCore + CryptoRng>(params: &PublicParams, key: &KeyPair, msg: &[u8], rng: &mut R) -> Signature {
    let k = nonzero_scalar(rng);
    let r = signature_challenge(msg, &(params.g() * k), &key.public());
    Signature {
        r,
        s: k + r * key.secret(),
    }
}

/// Check `sig` over `msg` against `pk`
pub fn verify(params: &PublicParams, pk: &Point, msg: &[u8], sig: &Signature) -> ZetherResult<()> {
    if sig.r.is_zero() || sig.s.is_zero() {
        return Err(ZetherError::ProofInvalid("zero signature component".to_string()));
    }
    let k = params.g() * sig.s - *pk * sig.r;
    if signature_challenge(msg, &k, pk) != sig.r {
        warn!("schnorr signature rejected");
        return Err(ZetherError::ChallengeMismatch("schnorr"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::thread_rng;
    use zether_core::ParamsConfig;

    fn params() -> PublicParams {
        PublicParams::new(ParamsConfig::default()).unwrap()
    }

    #[test]
    fn test_sign_verify() {
        let params = params();
        let mut rng = thread_rng();
        let key = KeyPair::generate(&params, &mut rng);
        let msg = b"register 0x7760fafcd09cf06b627673a9b0ea77867b6e0427";

        let sig = sign(&params, &key, msg, &mut rng);
        verify(&params, &key.public(), msg, &sig).unwrap();

        assert!(verify(&params, &key.public(), b"another message", &sig).is_err());
        let other = KeyPair::generate(&params, &mut rng);
        assert!(verify(&params, &other.public(), msg, &sig).is_err());
    }

    #[test]
    fn test_rejects_zero_components() {
        let params = params();
        let key = KeyPair::generate(&params, &mut thread_rng());
        let sig = Signature {
            r: Scalar::zero(),
            s: Scalar::from(1u64),
        };
        assert!(matches!(
            verify(&params, &key.public(), b"m", &sig),
            Err(ZetherError::ProofInvalid(_))
        ));
    }

    #[test]
    fn test_signature_encoding() {
        let params = params();
        let mut rng = thread_rng();
        let key = KeyPair::generate(&params, &mut rng);
        let sig = sign(&params, &key, b"encode me", &mut rng);

        let bytes = sig.to_bytes();
        assert_eq!(Signature::from_bytes(&bytes).unwrap(), sig);
        assert_eq!(Signature::from_hex(&sig.to_hex()).unwrap(), sig);
        assert!(Signature::from_bytes(&bytes[1..]).is_err());

        let json = serde_json::to_string(&sig).unwrap();
        assert_eq!(serde_json::from_str::<Signature>(&json).unwrap(), sig);

        // Components at or above the group order do not decode
        assert!(Signature::from_bytes(&[0xff; SIGNATURE_BYTES]).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_byte_flip_rejected(msg in prop::collection::vec(any::<u8>(), 0..64), index in 0usize..SIGNATURE_BYTES, bit in 0u8..8) {
            let params = params();
            let mut rng = thread_rng();
            let key = KeyPair::generate(&params, &mut rng);
            let sig = sign(&params, &key, &msg, &mut rng);
            prop_assert!(verify(&params, &key.public(), &msg, &sig).is_ok());

            let mut bytes = sig.to_bytes();
            bytes[index] ^= 1 << bit;
            if let Ok(tampered) = Signature::from_bytes(&bytes) {
                prop_assert!(verify(&params, &key.public(), &msg, &tampered).is_err());
            }
        }
    }
}
