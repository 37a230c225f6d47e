//! Range proof verifier implementation

use crate::{
    challenge_x, challenge_yz, hprime, verify_inner_product, AggBulletProof, BulletProof,
    RangeChallenges, RangeShape,
};
use tracing::warn;
use zether_core::{Point, PublicParams, Transcript, ZetherError, ZetherResult};

/// Range proof verifier
#[derive(Debug, Clone, Copy)]
pub struct RangeVerifier<'a> {
    params: &'a PublicParams,
}

impl<'a> RangeVerifier<'a> {
    pub fn new(params: &'a PublicParams) -> Self {
        Self { params }
    }

    /// Verify a single-value proof for `[0, 2^range_bits)`
    pub fn verify_range(&self, proof: &BulletProof) -> ZetherResult<()> {
        let shape = RangeShape::new(self.params.config().range_bits, 1)?;
        self.verify_aggregate(shape, &AggBulletProof::from(proof.clone()))
    }

    /// Verify an aggregated proof against the expected shape
    pub fn verify_aggregate(&self, shape: RangeShape, proof: &AggBulletProof) -> ZetherResult<()> {
        if proof.v.len() != shape.values() {
            return Err(ZetherError::length(shape.values(), proof.v.len()));
        }

        let gens = self.params.generators();
        let (_, h_vec) = gens.vectors(shape.len())?;

        let mut transcript = Transcript::new();
        transcript.append_points(&proof.v);
        transcript.append_point(&proof.a);
        transcript.append_point(&proof.s);
        let (y, z) = challenge_yz(transcript);
        let x = challenge_x(&proof.t1, &proof.t2, &z);
        let challenges = RangeChallenges { y, z, x };

        // t̂·g + τx·h == Σ z^(1+j)·V_j + δ·g + x·T1 + x²·T2
        let lhs = gens.g * proof.t_hat + gens.h * proof.taux;
        let mut scalars = challenges.value_weights(shape);
        let mut points = proof.v.clone();
        scalars.extend([challenges.delta(shape), x, x * x]);
        points.extend([gens.g, proof.t1, proof.t2]);
        let rhs = Point::multiscalar_mul(&scalars, &points)?;
        if lhs != rhs {
            warn!(bits = shape.bits(), values = shape.values(), "range polynomial check failed");
            return Err(ZetherError::ProofInvalid("polynomial commitment".to_string()));
        }

        let hp = hprime(h_vec, &y)?;
        let p = challenges.ipa_commitment(shape, gens, &hp, proof.a, proof.s, proof.mu)?;
        verify_inner_product(gens, &hp, &p, &proof.t_hat, &x, &proof.ipp).map_err(|e| {
            warn!(error = %e, "range inner product rejected");
            e
        })
    }

    pub fn params(&self) -> &PublicParams {
        self.params
    }
}
