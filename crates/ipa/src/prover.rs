//! Inner Product Argument prover implementation

use crate::{bind_u, round_challenge, InnerProductProof};
use rayon::prelude::*;
use tracing::{debug, trace};
use zether_core::{
    ensure_length, inner_product, invert, is_power_of_two, Point, Scalar, ZetherError,
    ZetherResult,
};

/// Inner Product Argument prover over borrowed generator vectors
#[derive(Debug, Clone)]
pub struct InnerProductProver<'a> {
    g_vec: &'a [Point],
    h_vec: &'a [Point],
    u: Point,
}

impl<'a> InnerProductProver<'a> {
    /// Create a prover for `P = <a, g_vec> + <b, h_vec> + <a, b>·u`
    pub fn new(g_vec: &'a [Point], h_vec: &'a [Point], u: Point) -> ZetherResult<Self> {
        check_generators(g_vec, h_vec)?;
        Ok(Self { g_vec, h_vec, u })
    }

    /// Vector length `n`
    pub fn len(&self) -> usize {
        self.g_vec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.g_vec.is_empty()
    }

    /// Create an inner product proof for witness `(a, b)`.
    ///
    /// `prev` is the last challenge of the enclosing protocol; the binding
    /// challenge is derived from it.
    pub fn prove(&self, a: &[Scalar], b: &[Scalar], prev: &Scalar) -> ZetherResult<InnerProductProof> {
        let n = self.len();
        ensure_length(n, a.len())?;
        ensure_length(n, b.len())?;

        let (u, mut challenge) = bind_u(&self.u, prev);

        let mut current_a = a.to_vec();
        let mut current_b = b.to_vec();
        let mut current_g = self.g_vec.to_vec();
        let mut current_h = self.h_vec.to_vec();

        let mut l_vec = Vec::new();
        let mut r_vec = Vec::new();

        while current_a.len() > 1 {
            let m = current_a.len() / 2;

            let (a_l, a_r) = current_a.split_at(m);
            let (b_l, b_r) = current_b.split_at(m);
            let (g_l, g_r) = current_g.split_at(m);
            let (h_l, h_r) = current_h.split_at(m);

            let c_l = inner_product(a_l, b_r)?;
            let c_r = inner_product(a_r, b_l)?;

            // L = <a_L, G_R> + <b_R, H_L> + c_L·U'
            let l = Point::multiscalar_mul(&[a_l, b_r].concat(), &[g_r, h_l].concat())? + u * c_l;
            // R = <a_R, G_L> + <b_L, H_R> + c_R·U'
            let r = Point::multiscalar_mul(&[a_r, b_l].concat(), &[g_l, h_r].concat())? + u * c_r;

            let x = round_challenge(&l, &r, &challenge);
            let x_inv = invert(&x)?;
            trace!(round = l_vec.len(), half = m, "ipa fold");

            let folded_a = a_l
                .iter()
                .zip(a_r.iter())
                .map(|(al, ar)| *al * x + *ar * x_inv)
                .collect();
            let folded_b = b_l
                .iter()
                .zip(b_r.iter())
                .map(|(bl, br)| *bl * x_inv + *br * x)
                .collect();
            let folded_g = g_l
                .par_iter()
                .zip(g_r.par_iter())
                .map(|(gl, gr)| *gl * x_inv + *gr * x)
                .collect();
            let folded_h = h_l
                .par_iter()
                .zip(h_r.par_iter())
                .map(|(hl, hr)| *hl * x + *hr * x_inv)
                .collect();

            l_vec.push(l);
            r_vec.push(r);

            current_a = folded_a;
            current_b = folded_b;
            current_g = folded_g;
            current_h = folded_h;
            challenge = x;
        }

        debug!(n, rounds = l_vec.len(), "inner product proof generated");
        Ok(InnerProductProof::new(l_vec, r_vec, current_a[0], current_b[0]))
    }
}

pub(crate) fn check_generators(g_vec: &[Point], h_vec: &[Point]) -> ZetherResult<()> {
    ensure_length(g_vec.len(), h_vec.len())?;
    if !is_power_of_two(g_vec.len()) {
        return Err(ZetherError::InvalidParameters(format!(
            "inner product length {} is not a power of two",
            g_vec.len()
        )));
    }
    Ok(())
}
