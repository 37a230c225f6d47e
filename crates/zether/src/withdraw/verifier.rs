//! Withdraw proof verifier

use super::{challenge_c, challenge_yz_for, range_shape, WithdrawProof, WithdrawStatement};
use tracing::warn;
use zether_core::{epoch_base, PublicParams, ZetherError, ZetherResult};
use zether_range::{challenge_x, hprime, verify_inner_product, RangeChallenges};

/// Withdraw proof verifier
#[derive(Debug, Clone, Copy)]
pub struct WithdrawVerifier<'a> {
    params: &'a PublicParams,
}

impl<'a> WithdrawVerifier<'a> {
    pub fn new(params: &'a PublicParams) -> Self {
        Self { params }
    }

    pub fn verify(&self, statement: &WithdrawStatement, proof: &WithdrawProof) -> ZetherResult<()> {
        proof.ipp.validate_structure()?;
        let g = self.params.g();
        let h = self.params.h();
        let gens = self.params.generators();
        let shape = range_shape(self.params)?;
        let (_, h_vec) = gens.vectors(shape.len())?;

        let (y, z) = challenge_yz_for(statement, &proof.a, &proof.s);
        let x = challenge_x(&proof.t1, &proof.t2, &z);
        let challenges = RangeChallenges { y, z, x };
        let delta = challenges.delta(shape);

        let c = proof.c;
        let z2 = z * z;
        let commitments = [
            g * proof.s_sk - statement.pk * c,
            g * proof.s_b + (statement.crn * proof.s_sk - statement.cln * c) * z2,
            g * (c * (proof.t_hat - delta) - proof.s_b) + h * proof.s_tau
                - (proof.t1 * x + proof.t2 * (x * x)) * c,
            epoch_base(statement.epoch) * proof.s_sk - statement.nonce_u * c,
        ];
        if challenge_c(&x, &commitments) != c {
            warn!(epoch = statement.epoch, "withdraw sigma challenge mismatch");
            return Err(ZetherError::ChallengeMismatch("withdraw"));
        }

        let hp = hprime(h_vec, &y)?;
        let p = challenges.ipa_commitment(shape, gens, &hp, proof.a, proof.s, proof.mu)?;
        verify_inner_product(gens, &hp, &p, &proof.t_hat, &c, &proof.ipp).map_err(|e| {
            warn!(error = %e, "withdraw inner product rejected");
            e
        })
    }

    pub fn params(&self) -> &PublicParams {
        self.params
    }
}
