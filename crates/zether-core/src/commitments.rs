//! Prover-side Pedersen and vector commitments
//!
//! Only the committed point ever leaves the prover; values and blindings stay
//! inside these structs.

use crate::{random_scalar, GeneratorSet, Point, Scalar, ZetherResult};
use rand_core::{CryptoRng, RngCore};

/// `value·g + γ·h`
#[derive(Clone)]
pub struct PedersenCommitment {
    blinding: Scalar,
    point: Point,
}

impl PedersenCommitment {
    pub fn new<R: RngCore + CryptoRng>(gens: &GeneratorSet, value: Scalar, rng: &mut R) -> Self {
        Self::with_blinding(gens, value, random_scalar(rng))
    }

    pub fn with_blinding(gens: &GeneratorSet, value: Scalar, blinding: Scalar) -> Self {
        let point = gens.g * value + gens.h * blinding;
        Self { blinding, point }
    }

    pub fn commit(&self) -> Point {
        self.point
    }

    pub fn blinding(&self) -> Scalar {
        self.blinding
    }
}

/// `α·h + <aL, gVec> + <aR, hVec>`
#[derive(Clone)]
pub struct VectorCommitment {
    a_l: Vec<Scalar>,
    a_r: Vec<Scalar>,
    blinding: Scalar,
    point: Point,
}

impl VectorCommitment {
    pub fn new<R: RngCore + CryptoRng>(
        gens: &GeneratorSet,
        a_l: Vec<Scalar>,
        a_r: Vec<Scalar>,
        rng: &mut R,
    ) -> ZetherResult<Self> {
        Self::with_blinding(gens, a_l, a_r, random_scalar(rng))
    }

    pub fn with_blinding(
        gens: &GeneratorSet,
        a_l: Vec<Scalar>,
        a_r: Vec<Scalar>,
        blinding: Scalar,
    ) -> ZetherResult<Self> {
        let point = gens.vector_commit(&a_l, &a_r)? + gens.h * blinding;
        Ok(Self {
            a_l,
            a_r,
            blinding,
            point,
        })
    }

    pub fn commit(&self) -> Point {
        self.point
    }

    pub fn left(&self) -> &[Scalar] {
        &self.a_l
    }

    pub fn right(&self) -> &[Scalar] {
        &self.a_r
    }

    pub fn blinding(&self) -> Scalar {
        self.blinding
    }
}

impl std::fmt::Debug for PedersenCommitment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PedersenCommitment")
            .field("point", &self.point)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for VectorCommitment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorCommitment")
            .field("len", &self.a_l.len())
            .field("point", &self.point)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    #[test]
    fn test_pedersen_homomorphic() {
        let gens = GeneratorSet::new(0).unwrap();
        let mut rng = thread_rng();
        let c1 = PedersenCommitment::new(&gens, Scalar::from(5u64), &mut rng);
        let c2 = PedersenCommitment::new(&gens, Scalar::from(7u64), &mut rng);
        let sum = PedersenCommitment::with_blinding(
            &gens,
            Scalar::from(12u64),
            c1.blinding() + c2.blinding(),
        );
        assert_eq!(c1.commit() + c2.commit(), sum.commit());
    }

    #[test]
    fn test_vector_commitment() {
        let gens = GeneratorSet::new(2).unwrap();
        let a_l = vec![Scalar::from(1u64), Scalar::from(0u64)];
        let a_r = vec![Scalar::from(0u64), -Scalar::from(1u64)];
        let blinding = Scalar::from(9u64);
        let vc = VectorCommitment::with_blinding(&gens, a_l, a_r, blinding).unwrap();
        let expected = gens.h * blinding + gens.g_vec()[0] - gens.h_vec()[1];
        assert_eq!(vc.commit(), expected);

        let mut rng = thread_rng();
        assert!(VectorCommitment::new(&gens, vec![Scalar::from(1u64); 3], vec![Scalar::from(1u64); 3], &mut rng).is_err());
        assert!(!format!("{:?}", vc).contains("blinding"));
    }
}
