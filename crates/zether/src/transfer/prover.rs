//! Transfer proof prover

use super::poly::{coefficient_column, evaluate_all, shifted_weights, weighted_sum, xi_powers, IndexPolynomials};
use super::{
    bit_commitment_len, challenge_c, challenge_omega, challenge_v, range_shape, TransferProof,
    TransferStatement, TransferWitness,
};
use ark_ff::{Field, One, Zero};
use rand_core::{CryptoRng, RngCore};
use tracing::debug;
use zether_core::{
    chained_challenge, decompose, epoch_base, random_scalar, random_scalars, Point, PublicParams,
    Scalar, ZetherError, ZetherResult,
};
use zether_range::{
    challenge_x, hprime, prove_inner_product, BitCommitments, PolyCommitments, RangePolynomials,
};

/// Transfer proof prover
#[derive(Debug, Clone, Copy)]
pub struct TransferProver<'a> {
    params: &'a PublicParams,
}

impl<'a> TransferProver<'a> {
    pub fn new(params: &'a PublicParams) -> Self {
        Self { params }
    }

    pub fn prove<R: RngCore + CryptoRng>(
        &self,
        statement: &TransferStatement,
        witness: &TransferWitness,
        rng: &mut R,
    ) -> ZetherResult<TransferProof> {
        let m = statement.validate(self.params.config().max_ring_size)?;
        let n = statement.ring_size();
        witness.validate(n)?;
        let (l0, l1) = (witness.l0, witness.l1);

        let g = self.params.g();
        let h = self.params.h();
        let sender_pk = statement.anon_pk[l0];
        if sender_pk == statement.anon_pk[l1] {
            return Err(ZetherError::SelfTransferDisallowed);
        }
        if g * witness.sk != sender_pk {
            return Err(ZetherError::InvalidWitness(
                "secret key does not open the sender's ring entry".to_string(),
            ));
        }

        let gens = self.params.generators();
        let shape = range_shape(self.params)?;
        let (_, h_vec) = gens.vectors(shape.len())?;
        let (bit_gens, _) = gens.vectors(bit_commitment_len(m))?;

        // Range commitments first: an out-of-range amount fails before any ring work
        let bits = BitCommitments::commit(gens, shape, &[witness.amount, witness.remaining], rng)?;
        let (bp_a, bp_s) = (bits.a(), bits.s());

        let blinders = random_scalars(rng, 2 * m);
        let mut index_bits = decompose(l0 as u64, 2, m)?;
        index_bits.extend(decompose(l1 as u64, 2, m)?);
        let r_a = random_scalar(rng);
        let r_b = random_scalar(rng);
        let (a, b) = commit_index_bits(bit_gens, h, &blinders, &index_bits, m, r_a, r_b)?;

        let v = challenge_v(statement, &bp_a, &bp_s, &a, &b);
        let sender_poly = IndexPolynomials::new(&blinders[..m], &index_bits[..m]);
        let receiver_poly = IndexPolynomials::new(&blinders[m..], &index_bits[m..]);
        let p0 = sender_poly.expand(n);
        let p1 = receiver_poly.expand(n);
        let xi = xi_powers(&v, n);
        debug!(ring = n, "index polynomials expanded");

        let phi = random_scalars(rng, m);
        let chi = random_scalars(rng, m);
        let psi = random_scalars(rng, m);
        let varpi = random_scalars(rng, m);

        let columns: Vec<Vec<Scalar>> = (0..m).map(|k| coefficient_column(&p0, k)).collect();
        let tilde = |points: &[Point], base: Point, blinds: &[Scalar]| -> ZetherResult<Vec<Point>> {
            columns
                .iter()
                .zip(blinds.iter())
                .map(|(column, blind)| Ok(Point::multiscalar_mul(column, points)? + base * *blind))
                .collect()
        };
        let scaled = |blinds: &[Scalar]| -> Vec<Point> { blinds.iter().map(|s| g * *s).collect() };

        let cln_tilde = tilde(&statement.cln_new, sender_pk, &phi)?;
        let crn_tilde = tilde(&statement.crn_new, g, &phi)?;
        let c0_tilde = tilde(&statement.c_vector, sender_pk, &chi)?;
        let d_tilde = scaled(&chi);
        let y0_tilde = tilde(&statement.anon_pk, sender_pk, &psi)?;
        let g_tilde = scaled(&psi);
        let amount = Scalar::from(witness.amount);
        let cx_tilde: Vec<Point> = (0..m)
            .map(|k| {
                let mut sum = Scalar::zero();
                for j in 0..n / 2 {
                    let from_sender = (l0 + n - 2 * j) % n;
                    let from_receiver = (l1 + n - 2 * j) % n;
                    sum += xi[2 * j] * (p0[from_receiver][k] - p0[from_sender][k])
                        + xi[2 * j + 1] * (p1[from_receiver][k] - p1[from_sender][k]);
                }
                g * (sum * amount) + statement.d * varpi[k]
            })
            .collect();
        let yx_tilde = scaled(&varpi);

        let w = challenge_omega(
            &v,
            [&cln_tilde, &crn_tilde, &c0_tilde, &d_tilde, &y0_tilde, &g_tilde, &cx_tilde, &yx_tilde],
        );
        let mut f = sender_poly.reveal(&w);
        f.extend(receiver_poly.reveal(&w));
        let z_a = r_a + r_b * w;

        let y = chained_challenge(&w);
        let z = chained_challenge(&y);
        let polys = RangePolynomials::new(shape, &bits, &y, &z)?;
        let poly_commitments = PolyCommitments::commit(gens, &polys, rng)?;
        let (t1, t2) = (poly_commitments.t1(), poly_commitments.t2());
        let x = challenge_x(&t1, &t2, &z);
        let (l, r, t_hat) = polys.evaluate(&x)?;
        let tau_x = poly_commitments.tau_x(&x);
        let mu = bits.mu(&x);

        let w_m = w.pow([m as u64]);
        let crn_line = statement.crn_new[l0] * w_m - g * weighted_sum(&phi, &w);
        let d_line = statement.d * w_m - g * weighted_sum(&chi, &w);
        let g_line = g * (w_m - weighted_sum(&psi, &w));
        let weights = shifted_weights(&evaluate_all(&p0, &w), &evaluate_all(&p1, &w), &xi);
        let yx_line = Point::multiscalar_mul(&weights, &statement.anon_pk)? - g * weighted_sum(&varpi, &w);

        let k_sk = random_scalar(rng);
        let k_r = random_scalar(rng);
        let k_b = random_scalar(rng);
        let k_tau = random_scalar(rng);
        let z2 = z * z;
        let z3 = z2 * z;
        let commitments = [
            g_line * k_sk,
            g * k_r,
            g * k_b + (crn_line * z3 - d_line * z2) * k_sk,
            yx_line * k_r,
            h * k_tau - g * k_b,
            epoch_base(statement.epoch) * k_sk,
        ];
        let c = challenge_c(&x, &commitments);
        let cw = c * w_m;
        debug!("transfer sigma commitments bound");

        let hp = hprime(h_vec, &y)?;
        let ipp = prove_inner_product(gens, &hp, &l, &r, &c)?;
        debug!(ring = n, rounds = ipp.num_rounds(), "transfer proof generated");

        Ok(TransferProof {
            bp_a,
            bp_s,
            a,
            b,
            cln_tilde,
            crn_tilde,
            c0_tilde,
            d_tilde,
            y0_tilde,
            g_tilde,
            cx_tilde,
            yx_tilde,
            f,
            z_a,
            t1,
            t2,
            t_hat,
            mu,
            c,
            s_sk: k_sk + c * witness.sk,
            s_r: k_r + c * witness.r,
            s_b: k_b + cw * (z2 * amount + z3 * Scalar::from(witness.remaining)),
            s_tau: k_tau + cw * tau_x,
            ipp,
        })
    }

    pub fn params(&self) -> &PublicParams {
        self.params
    }
}

/// `A = Com(a ‖ d ‖ e, r_A)`, `B = Com(b ‖ c ‖ f, r_B)` over the bit generators
///
/// Per bit `c = a·(1 - 2b)` and `d = -a²`; `e`, `f` link the low bits of the
/// two indices, which only works when those bits differ.
fn commit_index_bits(
    gens: &[Point],
    h: Point,
    blinders: &[Scalar],
    bits: &[Scalar],
    m: usize,
    r_a: Scalar,
    r_b: Scalar,
) -> ZetherResult<(Point, Point)> {
    let cross = blinders[0] * blinders[m];
    let sender_low = if bits[0].is_one() { blinders[m] } else { blinders[0] };
    let receiver_low = if bits[m].is_one() { blinders[m] } else { blinders[0] };

    let mut a_vec: Vec<Scalar> = blinders.to_vec();
    a_vec.extend(blinders.iter().map(|a| -(*a * a)));
    a_vec.extend([cross, cross]);

    let mut b_vec: Vec<Scalar> = bits.to_vec();
    b_vec.extend(blinders.iter().zip(bits.iter()).map(|(a, b)| *a * (Scalar::one() - b.double())));
    b_vec.extend([sender_low, -receiver_low]);

    let a = Point::multiscalar_mul(&a_vec, gens)? + h * r_a;
    let b = Point::multiscalar_mul(&b_vec, gens)? + h * r_b;
    Ok((a, b))
}
