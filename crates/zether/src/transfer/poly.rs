//! Many-out-of-many index polynomials
//!
//! For a secret index `l` with bits `b_k` and blinders `a_k`, each bit gets
//! two degree-1 polynomials in `W`:
//!
//! ```text
//! F_k,1(W) = a_k + b_k·W
//! F_k,0(W) = -a_k + (1 - b_k)·W
//! ```
//!
//! `P_i(W) = Π_k F_k,bit_k(i)(W)` has leading coefficient `[i == l]`, so at a
//! challenge `ω` it is `ω^m·[i == l]` plus lower-order noise the prover
//! cancels through the tilde commitments.

use ark_ff::{One, Zero};
use rayon::prelude::*;
use zether_core::{poly_evaluate, poly_mul, scalar_powers, Point, Scalar, ZetherResult};

/// Bit `k` of `i`
fn bit(i: usize, k: usize) -> bool {
    (i >> k) & 1 == 1
}

/// Per-bit linear polynomials of one secret index
#[derive(Debug, Clone)]
pub(crate) struct IndexPolynomials {
    /// `F_k,0` as `[constant, W]`
    zero: Vec<[Scalar; 2]>,
    /// `F_k,1` as `[constant, W]`
    one: Vec<[Scalar; 2]>,
}

impl IndexPolynomials {
    pub(crate) fn new(blinders: &[Scalar], bits: &[Scalar]) -> Self {
        let zero = blinders
            .iter()
            .zip(bits.iter())
            .map(|(a, b)| [-*a, Scalar::one() - b])
            .collect();
        let one = blinders.iter().zip(bits.iter()).map(|(a, b)| [*a, *b]).collect();
        Self { zero, one }
    }

    /// Revealed evaluations `f_k = F_k,1(ω)`
    pub(crate) fn reveal(&self, w: &Scalar) -> Vec<Scalar> {
        self.one.iter().map(|[c0, c1]| *c0 + *c1 * w).collect()
    }

    /// Coefficients of `P_i(W)` for every `i < n`, `m + 1` each
    pub(crate) fn expand(&self, n: usize) -> Vec<Vec<Scalar>> {
        let m = self.one.len();
        (0..n)
            .into_par_iter()
            .map(|i| {
                (0..m).fold(vec![Scalar::one()], |acc, k| {
                    let factor = if bit(i, k) { &self.one[k] } else { &self.zero[k] };
                    poly_mul(&acc, factor)
                })
            })
            .collect()
    }
}

/// `P_i(ω)` for every `i < n` from the revealed `f` and the implied `ω - f`
pub(crate) fn evaluate_from_reveal(f: &[Scalar], w: &Scalar, n: usize) -> Vec<Scalar> {
    (0..n)
        .into_par_iter()
        .map(|i| {
            f.iter().enumerate().fold(Scalar::one(), |acc, (k, fk)| {
                if bit(i, k) {
                    acc * fk
                } else {
                    acc * (*w - fk)
                }
            })
        })
        .collect()
}

/// `P_i(ω)` for every `i` from full coefficient vectors
pub(crate) fn evaluate_all(polys: &[Vec<Scalar>], w: &Scalar) -> Vec<Scalar> {
    polys.par_iter().map(|p| poly_evaluate(p, w)).collect()
}

/// Coefficient `k` of every polynomial, as an `n`-vector
pub(crate) fn coefficient_column(polys: &[Vec<Scalar>], k: usize) -> Vec<Scalar> {
    polys.iter().map(|p| p[k]).collect()
}

/// `ξ = (1, 1, v, v², …, v^(n-2))`
pub(crate) fn xi_powers(v: &Scalar, n: usize) -> Vec<Scalar> {
    let mut xi = Vec::with_capacity(n);
    xi.push(Scalar::one());
    xi.extend(scalar_powers(v, n - 1));
    xi
}

/// Weight of ring member `i` in the shifted sums
///
/// `w_i = Σ_j ξ_2j·p0[i - 2j] + ξ_(2j+1)·p1[i - 2j]`, indices mod `n`
pub(crate) fn shifted_weights(p0: &[Scalar], p1: &[Scalar], xi: &[Scalar]) -> Vec<Scalar> {
    let n = p0.len();
    (0..n)
        .into_par_iter()
        .map(|i| {
            (0..n / 2).fold(Scalar::zero(), |acc, j| {
                let src = (i + n - 2 * j) % n;
                acc + xi[2 * j] * p0[src] + xi[2 * j + 1] * p1[src]
            })
        })
        .collect()
}

/// `Σ_k ω^k·r_k`
pub(crate) fn weighted_sum(r: &[Scalar], w: &Scalar) -> Scalar {
    poly_evaluate(r, w)
}

/// `Σ_k -ω^k·tilde_k`
pub(crate) fn fold_tilde(tilde: &[Point], w: &Scalar) -> ZetherResult<Point> {
    let neg_powers: Vec<Scalar> = scalar_powers(w, tilde.len()).into_iter().map(|p| -p).collect();
    Point::multiscalar_mul(&neg_powers, tilde)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zether_core::decompose;

    fn sample(l: usize, m: usize) -> (Vec<Scalar>, Vec<Scalar>) {
        let blinders: Vec<Scalar> = (0..m).map(|k| Scalar::from((k * 7 + 3) as u64)).collect();
        (blinders, decompose(l as u64, 2, m).unwrap())
    }

    #[test]
    fn test_leading_coefficient_is_indicator() {
        let (a, b) = sample(5, 3);
        let polys = IndexPolynomials::new(&a, &b).expand(8);
        for (i, p) in polys.iter().enumerate() {
            assert_eq!(p.len(), 4);
            let expected = if i == 5 { Scalar::one() } else { Scalar::zero() };
            assert_eq!(p[3], expected);
        }
    }

    #[test]
    fn test_reveal_matches_expansion() {
        let (a, b) = sample(6, 3);
        let index = IndexPolynomials::new(&a, &b);
        let w = Scalar::from(1234567u64);
        let from_coeffs = evaluate_all(&index.expand(8), &w);
        let from_reveal = evaluate_from_reveal(&index.reveal(&w), &w, 8);
        assert_eq!(from_coeffs, from_reveal);
    }

    #[test]
    fn test_shifted_weights() {
        let p0 = vec![Scalar::from(1u64), Scalar::from(2u64), Scalar::from(3u64), Scalar::from(4u64)];
        let p1 = vec![Scalar::from(10u64), Scalar::from(20u64), Scalar::from(30u64), Scalar::from(40u64)];
        let v = Scalar::from(5u64);
        let xi = xi_powers(&v, 4);
        assert_eq!(xi, vec![Scalar::one(), Scalar::one(), v, v * v]);

        let weights = shifted_weights(&p0, &p1, &xi);
        // i = 0: j = 0 picks index 0, j = 1 picks index 2
        assert_eq!(weights[0], p0[0] + p1[0] + v * p0[2] + v * v * p1[2]);
        // i = 1: j = 1 wraps to index 3
        assert_eq!(weights[1], p0[1] + p1[1] + v * p0[3] + v * v * p1[3]);
    }

    #[test]
    fn test_fold_tilde() {
        let base = zether_core::map_into_group("fold test");
        let tilde = vec![base, base * Scalar::from(2u64)];
        let w = Scalar::from(3u64);
        assert_eq!(fold_tilde(&tilde, &w).unwrap(), base * -Scalar::from(7u64));
        assert_eq!(weighted_sum(&[Scalar::from(1u64), Scalar::from(2u64)], &w), Scalar::from(7u64));
    }
}
