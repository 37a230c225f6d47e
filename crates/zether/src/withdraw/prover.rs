//! Withdraw proof prover

use super::{challenge_c, challenge_yz_for, range_shape, WithdrawProof, WithdrawStatement, WithdrawWitness};
use rand_core::{CryptoRng, RngCore};
use tracing::debug;
use zether_core::{epoch_base, random_scalar, PublicParams, Scalar, ZetherError, ZetherResult};
use zether_range::{challenge_x, hprime, prove_inner_product, BitCommitments, PolyCommitments, RangePolynomials};

/// Withdraw proof prover
#[derive(Debug, Clone, Copy)]
pub struct WithdrawProver<'a> {
    params: &'a PublicParams,
}

impl<'a> WithdrawProver<'a> {
    pub fn new(params: &'a PublicParams) -> Self {
        Self { params }
    }

    pub fn prove<R: RngCore + CryptoRng>(
        &self,
        statement: &WithdrawStatement,
        witness: &WithdrawWitness,
        rng: &mut R,
    ) -> ZetherResult<WithdrawProof> {
        let g = self.params.g();
        let h = self.params.h();
        if g * witness.sk != statement.pk {
            return Err(ZetherError::InvalidWitness(
                "secret key does not match the withdrawing account".to_string(),
            ));
        }

        let gens = self.params.generators();
        let shape = range_shape(self.params)?;
        let (_, h_vec) = gens.vectors(shape.len())?;

        let bits = BitCommitments::commit(gens, shape, &[witness.remaining], rng)?;
        let (a, s) = (bits.a(), bits.s());
        let (y, z) = challenge_yz_for(statement, &a, &s);

        let polys = RangePolynomials::new(shape, &bits, &y, &z)?;
        let poly_commitments = PolyCommitments::commit(gens, &polys, rng)?;
        let (t1, t2) = (poly_commitments.t1(), poly_commitments.t2());
        let x = challenge_x(&t1, &t2, &z);
        let (l, r, t_hat) = polys.evaluate(&x)?;
        let tau_x = poly_commitments.tau_x(&x);

        let k_sk = random_scalar(rng);
        let k_b = random_scalar(rng);
        let k_tau = random_scalar(rng);
        let z2 = z * z;
        let commitments = [
            g * k_sk,
            g * k_b + statement.crn * (z2 * k_sk),
            h * k_tau - g * k_b,
            epoch_base(statement.epoch) * k_sk,
        ];
        let c = challenge_c(&x, &commitments);

        let hp = hprime(h_vec, &y)?;
        let ipp = prove_inner_product(gens, &hp, &l, &r, &c)?;
        debug!(epoch = statement.epoch, "withdraw proof generated");

        Ok(WithdrawProof {
            a,
            s,
            t1,
            t2,
            t_hat,
            mu: bits.mu(&x),
            c,
            s_sk: k_sk + c * witness.sk,
            s_b: k_b + c * z2 * Scalar::from(witness.remaining),
            s_tau: k_tau + c * tau_x,
            ipp,
        })
    }

    pub fn params(&self) -> &PublicParams {
        self.params
    }
}
