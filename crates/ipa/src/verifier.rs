//! Inner Product Argument verifier implementation

use crate::{bind_u, prover::check_generators, round_challenge, InnerProductProof};
use ark_ff::{batch_inversion, One, Zero};
use tracing::warn;
use zether_core::{Point, Scalar, ZetherError, ZetherResult};

/// Inner Product Argument verifier over borrowed generator vectors
#[derive(Debug, Clone)]
pub struct InnerProductVerifier<'a> {
    g_vec: &'a [Point],
    h_vec: &'a [Point],
    u: Point,
}

impl<'a> InnerProductVerifier<'a> {
    pub fn new(g_vec: &'a [Point], h_vec: &'a [Point], u: Point) -> ZetherResult<Self> {
        check_generators(g_vec, h_vec)?;
        Ok(Self { g_vec, h_vec, u })
    }

    /// Verify that `proof` opens `p` to inner product `c`.
    ///
    /// `prev` must be the same previous challenge the prover used.
    pub fn verify(&self, proof: &InnerProductProof, p: &Point, c: &Scalar, prev: &Scalar) -> ZetherResult<()> {
        proof.validate_structure()?;

        let n = self.g_vec.len();
        let expected_rounds = n.trailing_zeros() as usize;
        if proof.num_rounds() != expected_rounds {
            return Err(ZetherError::ProofInvalid(format!(
                "expected {} rounds for vector length {}, got {}",
                expected_rounds,
                n,
                proof.num_rounds()
            )));
        }

        let (u, mut challenge) = bind_u(&self.u, prev);

        let mut challenges = Vec::with_capacity(expected_rounds);
        for (l, r) in proof.l_vec.iter().zip(proof.r_vec.iter()) {
            challenge = round_challenge(l, r, &challenge);
            if challenge.is_zero() {
                return Err(ZetherError::ProofInvalid("zero folding challenge".to_string()));
            }
            challenges.push(challenge);
        }
        let mut challenges_inv = challenges.clone();
        batch_inversion(&mut challenges_inv);

        let s = compute_s_scalars(&challenges, &challenges_inv, n);
        let mut s_inv = s.clone();
        batch_inversion(&mut s_inv);

        // P + c·U' + Σ (x_j²·L_j + x_j⁻²·R_j)
        let mut fold_scalars = Vec::with_capacity(2 * expected_rounds);
        let mut fold_points = Vec::with_capacity(2 * expected_rounds);
        for (j, (l, r)) in proof.l_vec.iter().zip(proof.r_vec.iter()).enumerate() {
            fold_scalars.push(challenges[j] * challenges[j]);
            fold_points.push(*l);
            fold_scalars.push(challenges_inv[j] * challenges_inv[j]);
            fold_points.push(*r);
        }
        let right_side = *p + u * *c + Point::multiscalar_mul(&fold_scalars, &fold_points)?;

        // a·<s, G> + b·<s⁻¹, H> + ab·U'
        let scalars: Vec<Scalar> = s
            .iter()
            .map(|si| *si * proof.a)
            .chain(s_inv.iter().map(|si| *si * proof.b))
            .collect();
        let points: Vec<Point> = self.g_vec.iter().chain(self.h_vec.iter()).copied().collect();
        let left_side = Point::multiscalar_mul(&scalars, &points)? + u * (proof.a * proof.b);

        if left_side != right_side {
            warn!(n, "inner product equation failed");
            return Err(ZetherError::ProofInvalid("inner product equation".to_string()));
        }
        Ok(())
    }
}

/// Coefficient of each initial generator in the fully folded `G`.
///
/// Round `j` halves on bit `rounds - 1 - j` of the index: the right half
/// picks up `x_j`, the left half `x_j⁻¹`.
fn compute_s_scalars(challenges: &[Scalar], challenges_inv: &[Scalar], n: usize) -> Vec<Scalar> {
    let rounds = challenges.len();
    let mut s = vec![Scalar::one(); n];

    for (round, (x, x_inv)) in challenges.iter().zip(challenges_inv.iter()).enumerate() {
        let bit_position = rounds - 1 - round;
        for (i, si) in s.iter_mut().enumerate() {
            if (i >> bit_position) & 1 == 1 {
                *si *= x;
            } else {
                *si *= x_inv;
            }
        }
    }

    s
}
