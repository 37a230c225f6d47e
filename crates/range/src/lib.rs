//! # Bulletproofs Range Proofs
//!
//! Single-value and aggregated range proofs over BN254, built on the inner
//! product argument in `zether-ipa`.
//!
//! ## Mathematical Background
//!
//! A range proof for values `v_1..v_m` in `[0, 2^n)` works by:
//!
//! 1. **Bit Decomposition**: `aL` holds the bits of every value, `aR = aL - 1`
//! 2. **Vector Commitment**: `A` commits to `aL, aR`, `S` to random `sL, sR`
//! 3. **Polynomial Identity**: with challenges `y, z` the constant term of
//!    `t(X) = <l(X), r(X)>` equals `Σ z^(1+j)·v_j + δ(y, z)` exactly when
//!    every bit is binary and the bits sum to the values
//! 4. **Inner Product**: after the challenge `x`, an IPA shows `<l(x), r(x)> = t̂`
//!
//! The single-value proof is the aggregated proof with `m = 1`. The building
//! blocks in [`constraints`] are shared with the transfer and withdraw proofs.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use zether_core::{ParamsConfig, PublicParams};
//! use zether_range::{RangeProver, RangeVerifier};
//!
//! let params = PublicParams::new(ParamsConfig::default()).unwrap();
//! let mut rng = rand::thread_rng();
//!
//! let proof = RangeProver::new(&params).prove_range(42, &mut rng).unwrap();
//! assert!(RangeVerifier::new(&params).verify_range(&proof).is_ok());
//! ```

pub mod constraints;
pub mod proof;
pub mod prover;
pub mod verifier;

#[cfg(test)]
pub mod property_tests;

pub use constraints::*;
pub use proof::*;
pub use prover::*;
pub use verifier::*;
