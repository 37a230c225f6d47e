//! Transfer proof verifier

use super::poly::{evaluate_from_reveal, fold_tilde, shifted_weights, xi_powers};
use super::{bit_commitment_len, challenge_c, challenge_omega, challenge_v, range_shape, TransferProof, TransferStatement};
use ark_ff::Field;
use tracing::warn;
use zether_core::{chained_challenge, epoch_base, Point, PublicParams, Scalar, ZetherError, ZetherResult};
use zether_range::{challenge_x, hprime, verify_inner_product, RangeChallenges};

/// Transfer proof verifier
#[derive(Debug, Clone, Copy)]
pub struct TransferVerifier<'a> {
    params: &'a PublicParams,
}

impl<'a> TransferVerifier<'a> {
    pub fn new(params: &'a PublicParams) -> Self {
        Self { params }
    }

    pub fn verify(&self, statement: &TransferStatement, proof: &TransferProof) -> ZetherResult<()> {
        let m = statement.validate(self.params.config().max_ring_size)?;
        let n = statement.ring_size();
        proof.validate_structure(m)?;

        let g = self.params.g();
        let h = self.params.h();
        let gens = self.params.generators();
        let shape = range_shape(self.params)?;
        let (_, h_vec) = gens.vectors(shape.len())?;
        let (bit_gens, _) = gens.vectors(bit_commitment_len(m))?;

        let v = challenge_v(statement, &proof.bp_a, &proof.bp_s, &proof.a, &proof.b);
        let w = challenge_omega(&v, proof.tilde_vectors());

        // A + ω·B == Com(f ‖ f∘(ω - f) ‖ f_0·f_m ‖ (ω - f_0)(ω - f_m), z_A)
        let f = &proof.f;
        let f_bar: Vec<Scalar> = f.iter().map(|fk| w - fk).collect();
        let mut scalars = f.clone();
        scalars.extend(f.iter().zip(f_bar.iter()).map(|(fk, bk)| *fk * bk));
        scalars.extend([f[0] * f[m], f_bar[0] * f_bar[m]]);
        let opened = Point::multiscalar_mul(&scalars, bit_gens)? + h * proof.z_a;
        if proof.a + proof.b * w != opened {
            warn!(ring = n, "transfer index commitments rejected");
            return Err(ZetherError::ProofInvalid("index bit commitments".to_string()));
        }

        let p0 = evaluate_from_reveal(&f[..m], &w, n);
        let p1 = evaluate_from_reveal(&f[m..], &w, n);
        let line = |points: &[Point], tilde: &[Point]| -> ZetherResult<Point> {
            Ok(Point::multiscalar_mul(&p0, points)? + fold_tilde(tilde, &w)?)
        };
        let cln_line = line(&statement.cln_new, &proof.cln_tilde)?;
        let crn_line = line(&statement.crn_new, &proof.crn_tilde)?;
        let c0_line = line(&statement.c_vector, &proof.c0_tilde)?;
        let y0_line = line(&statement.anon_pk, &proof.y0_tilde)?;

        let w_m = w.pow([m as u64]);
        let d_line = statement.d * w_m + fold_tilde(&proof.d_tilde, &w)?;
        let g_line = g * w_m + fold_tilde(&proof.g_tilde, &w)?;

        let weights = shifted_weights(&p0, &p1, &xi_powers(&v, n));
        let cx_line = Point::multiscalar_mul(&weights, &statement.c_vector)? + fold_tilde(&proof.cx_tilde, &w)?;
        let yx_line = Point::multiscalar_mul(&weights, &statement.anon_pk)? + fold_tilde(&proof.yx_tilde, &w)?;

        let y = chained_challenge(&w);
        let z = chained_challenge(&y);
        let x = challenge_x(&proof.t1, &proof.t2, &z);
        let challenges = RangeChallenges { y, z, x };
        let delta = challenges.delta(shape);

        let c = proof.c;
        let cw = c * w_m;
        let z2 = z * z;
        let z3 = z2 * z;
        let commitments = [
            g_line * proof.s_sk - y0_line * c,
            g * proof.s_r - statement.d * c,
            g * proof.s_b + (crn_line * z3 - d_line * z2) * proof.s_sk - (cln_line * z3 - c0_line * z2) * c,
            yx_line * proof.s_r - cx_line * c,
            g * (cw * (proof.t_hat - delta) - proof.s_b) + h * proof.s_tau - (proof.t1 * x + proof.t2 * (x * x)) * cw,
            epoch_base(statement.epoch) * proof.s_sk - statement.nonce_u * c,
        ];
        if challenge_c(&x, &commitments) != c {
            warn!(ring = n, epoch = statement.epoch, "transfer sigma challenge mismatch");
            return Err(ZetherError::ChallengeMismatch("transfer"));
        }

        let hp = hprime(h_vec, &y)?;
        let p = challenges.ipa_commitment(shape, gens, &hp, proof.bp_a, proof.bp_s, proof.mu)?;
        verify_inner_product(gens, &hp, &p, &proof.t_hat, &c, &proof.ipp).map_err(|e| {
            warn!(error = %e, "transfer inner product rejected");
            e
        })
    }

    pub fn params(&self) -> &PublicParams {
        self.params
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::transfer_fixture;
    use super::super::TransferProver;
    use super::*;
    use ark_ff::One;
    use rand::thread_rng;
    use zether_core::ParamsConfig;

    fn params() -> PublicParams {
        PublicParams::new(ParamsConfig::default()).unwrap()
    }

    #[test]
    fn test_transfer_round_trip_small_rings() {
        let params = params();
        let mut rng = thread_rng();
        for (n, l0, l1) in [(4, 0, 1), (4, 3, 2), (8, 5, 2), (16, 6, 11)] {
            let (statement, witness) = transfer_fixture(&params, n, l0, l1, 100, 30, &mut rng);
            let proof = TransferProver::new(&params).prove(&statement, &witness, &mut rng).unwrap();
            TransferVerifier::new(&params).verify(&statement, &proof).unwrap();
        }
    }

    #[test]
    fn test_transfer_round_trip_ring_512() {
        let params = params();
        let mut rng = thread_rng();
        let (statement, witness) = transfer_fixture(&params, 512, 100, 77, 1_000, 250, &mut rng);
        let proof = TransferProver::new(&params).prove(&statement, &witness, &mut rng).unwrap();
        assert_eq!(proof.f.len(), 18);
        TransferVerifier::new(&params).verify(&statement, &proof).unwrap();
    }

    #[test]
    fn test_transfer_whole_balance() {
        let params = params();
        let mut rng = thread_rng();
        let (statement, witness) = transfer_fixture(&params, 8, 1, 4, 42, 42, &mut rng);
        let proof = TransferProver::new(&params).prove(&statement, &witness, &mut rng).unwrap();
        TransferVerifier::new(&params).verify(&statement, &proof).unwrap();
    }

    #[test]
    fn test_tampered_proof_rejected() {
        let params = params();
        let mut rng = thread_rng();
        let (statement, witness) = transfer_fixture(&params, 8, 2, 7, 100, 30, &mut rng);
        let proof = TransferProver::new(&params).prove(&statement, &witness, &mut rng).unwrap();
        let verifier = TransferVerifier::new(&params);
        verifier.verify(&statement, &proof).unwrap();

        let mut bad = proof.clone();
        bad.c += Scalar::one();
        assert!(verifier.verify(&statement, &bad).is_err());

        let mut bad = proof.clone();
        bad.ipp.a += Scalar::one();
        assert!(verifier.verify(&statement, &bad).is_err());

        let mut bad = proof.clone();
        bad.ipp.b += Scalar::one();
        assert!(verifier.verify(&statement, &bad).is_err());

        let mut bad = proof.clone();
        bad.ipp.l_vec[0] = bad.ipp.l_vec[0] + params.g();
        assert!(verifier.verify(&statement, &bad).is_err());

        let mut bad = proof.clone();
        bad.ipp.r_vec[1] = bad.ipp.r_vec[1] + params.h();
        assert!(verifier.verify(&statement, &bad).is_err());

        let mut bad = proof.clone();
        bad.f[1] += Scalar::one();
        assert!(matches!(verifier.verify(&statement, &bad), Err(ZetherError::ProofInvalid(_))));

        let mut bad = proof.clone();
        bad.s_b += Scalar::one();
        assert!(matches!(verifier.verify(&statement, &bad), Err(ZetherError::ChallengeMismatch(_))));

        let mut bad = proof.clone();
        bad.cx_tilde[0] = bad.cx_tilde[0] + params.g();
        assert!(verifier.verify(&statement, &bad).is_err());

        let mut bad = proof.clone();
        bad.t_hat += Scalar::one();
        assert!(verifier.verify(&statement, &bad).is_err());

        let mut bad = proof;
        bad.d_tilde.pop();
        assert!(matches!(verifier.verify(&statement, &bad), Err(ZetherError::VectorLengthMismatch { .. })));
    }

    #[test]
    fn test_statement_changes_rejected() {
        let params = params();
        let mut rng = thread_rng();
        let (statement, witness) = transfer_fixture(&params, 8, 0, 3, 100, 30, &mut rng);
        let proof = TransferProver::new(&params).prove(&statement, &witness, &mut rng).unwrap();
        let verifier = TransferVerifier::new(&params);

        let mut other = statement.clone();
        other.epoch += 1;
        assert!(verifier.verify(&other, &proof).is_err());

        let mut other = statement.clone();
        other.nonce_u = other.nonce_u + params.g();
        assert!(verifier.verify(&other, &proof).is_err());

        let mut other = statement.clone();
        other.c_vector.swap(0, 3);
        assert!(verifier.verify(&other, &proof).is_err());

        let mut other = statement;
        other.anon_pk.truncate(4);
        assert!(verifier.verify(&other, &proof).is_err());
    }

    #[test]
    fn test_inconsistent_remaining_rejected() {
        let params = params();
        let mut rng = thread_rng();
        let (statement, mut witness) = transfer_fixture(&params, 4, 1, 2, 100, 30, &mut rng);
        witness.remaining = 71;
        let proof = TransferProver::new(&params).prove(&statement, &witness, &mut rng).unwrap();
        assert!(TransferVerifier::new(&params).verify(&statement, &proof).is_err());
    }

    #[test]
    fn test_transfer_proof_serialization() {
        let params = params();
        let mut rng = thread_rng();
        let (statement, witness) = transfer_fixture(&params, 8, 4, 1, 100, 30, &mut rng);
        let proof = TransferProver::new(&params).prove(&statement, &witness, &mut rng).unwrap();

        let decoded = TransferProof::from_bytes(&proof.to_bytes()).unwrap();
        assert_eq!(decoded, proof);
        let decoded = TransferProof::from_hex(&proof.to_hex()).unwrap();
        TransferVerifier::new(&params).verify(&statement, &decoded).unwrap();

        let json = serde_json::to_string(&proof).unwrap();
        assert_eq!(serde_json::from_str::<TransferProof>(&json).unwrap(), proof);

        let bytes = proof.to_bytes();
        assert!(TransferProof::from_bytes(&bytes[..bytes.len() - 1]).is_err());
        let mut extended = bytes;
        extended.push(0);
        assert!(TransferProof::from_bytes(&extended).is_err());
    }
}
