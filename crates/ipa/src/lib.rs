//! # Inner Product Argument (IPA)
//!
//! This crate implements the inner product argument used by every range proof
//! in the workspace. The IPA allows proving knowledge of vectors `a` and `b`
//! (length a power of two) such that:
//!
//! ```text
//! P = <a, G> + <b, H> + <a, b>·U
//! ```
//!
//! ## Protocol
//!
//! 1. **Binding**: `x = H(prev)`, `U' = x·U`, `P' = P + c·U'` where `c` is the
//!    claimed inner product and `prev` the caller's last challenge.
//!
//! 2. **Folding** while `n > 1`:
//!    - Split `a = (a_L, a_R)`, `b = (b_L, b_R)` and the generators likewise
//!    - `L = <a_L, G_R> + <b_R, H_L> + <a_L, b_R>·U'`
//!    - `R = <a_R, G_L> + <b_L, H_R> + <a_R, b_L>·U'`
//!    - `x = H(L ‖ R ‖ x_prev)`
//!    - `a' = x·a_L + x⁻¹·a_R`, `b' = x⁻¹·b_L + x·b_R`
//!    - `G' = x⁻¹·G_L + x·G_R`, `H' = x·H_L + x⁻¹·H_R`
//!
//! 3. **Base case** `n = 1`: the proof reveals `(a, b)`.
//!
//! The verifier replays the challenges from the `L`, `R` sequence and checks
//! a single multi-scalar equation.

pub mod proof;
pub mod prover;
pub mod verifier;

pub use proof::*;
pub use prover::*;
pub use verifier::*;

use zether_core::{chained_challenge, Point, Scalar, Transcript};

/// Rescaled inner-product base `U' = H(prev)·U` and the first round challenge
pub(crate) fn bind_u(u: &Point, prev: &Scalar) -> (Point, Scalar) {
    let x = chained_challenge(prev);
    (*u * x, x)
}

/// Round challenge `x = H(L ‖ R ‖ prev)`
pub(crate) fn round_challenge(l: &Point, r: &Point, prev: &Scalar) -> Scalar {
    let mut transcript = Transcript::new();
    transcript.append_point(l);
    transcript.append_point(r);
    transcript.append_scalar(prev);
    transcript.challenge_scalar()
}
