//! Range proof prover implementation

use crate::{
    challenge_x, challenge_yz, hprime, prove_inner_product, AggBulletProof, BitCommitments,
    BulletProof, PolyCommitments, RangeChallenges, RangePolynomials, RangeShape,
};
use rand_core::{CryptoRng, RngCore};
use tracing::debug;
use zether_core::{
    PedersenCommitment, Point, PublicParams, Scalar, Transcript, ZetherError, ZetherResult,
};

/// Range proof prover
#[derive(Debug, Clone, Copy)]
pub struct RangeProver<'a> {
    params: &'a PublicParams,
}

impl<'a> RangeProver<'a> {
    pub fn new(params: &'a PublicParams) -> Self {
        Self { params }
    }

    /// Prove `value ∈ [0, 2^range_bits)` under a fresh commitment
    pub fn prove_range<R: RngCore + CryptoRng>(&self, value: u64, rng: &mut R) -> ZetherResult<BulletProof> {
        let shape = RangeShape::new(self.params.config().range_bits, 1)?;
        self.prove_aggregate(shape, &[value], rng)?.try_into()
    }

    /// Prove every value of `values` lies in `[0, 2^bits)` with one proof
    pub fn prove_aggregate<R: RngCore + CryptoRng>(
        &self,
        shape: RangeShape,
        values: &[u64],
        rng: &mut R,
    ) -> ZetherResult<AggBulletProof> {
        if values.len() != shape.values() {
            return Err(ZetherError::InvalidWitness(format!(
                "{} values for an aggregation of {}",
                values.len(),
                shape.values()
            )));
        }

        let gens = self.params.generators();
        let (_, h_vec) = gens.vectors(shape.len())?;

        let bits = BitCommitments::commit(gens, shape, values, rng)?;
        let commitments: Vec<PedersenCommitment> = values
            .iter()
            .map(|value| PedersenCommitment::new(gens, Scalar::from(*value), rng))
            .collect();
        let v: Vec<Point> = commitments.iter().map(|c| c.commit()).collect();

        let mut transcript = Transcript::new();
        transcript.append_points(&v);
        transcript.append_point(&bits.a());
        transcript.append_point(&bits.s());
        let (y, z) = challenge_yz(transcript);

        let polys = RangePolynomials::new(shape, &bits, &y, &z)?;
        let poly_commitments = PolyCommitments::commit(gens, &polys, rng)?;
        let x = challenge_x(&poly_commitments.t1(), &poly_commitments.t2(), &z);
        let challenges = RangeChallenges { y, z, x };
        debug!(bits = shape.bits(), values = shape.values(), "range polynomials committed");

        let (l, r, t_hat) = polys.evaluate(&x)?;
        let taux = poly_commitments.tau_x(&x)
            + challenges
                .value_weights(shape)
                .iter()
                .zip(commitments.iter())
                .map(|(w, c)| *w * c.blinding())
                .sum::<Scalar>();
        let mu = bits.mu(&x);

        let hp = hprime(h_vec, &y)?;
        let ipp = prove_inner_product(gens, &hp, &l, &r, &x)?;
        debug!(rounds = ipp.num_rounds(), "range proof generated");

        Ok(AggBulletProof {
            v,
            a: bits.a(),
            s: bits.s(),
            t1: poly_commitments.t1(),
            t2: poly_commitments.t2(),
            taux,
            mu,
            t_hat,
            ipp,
        })
    }

    pub fn params(&self) -> &PublicParams {
        self.params
    }
}
