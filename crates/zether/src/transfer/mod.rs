//! Anonymous transfer proof over a ring of `N = 2^m` accounts
//!
//! The prover shows, without revealing which members are involved, that:
//!
//! - it knows `sk` for the ring member at a hidden index `l0`
//! - `c_vector` subtracts the amount at `l0`, adds it at a hidden `l1` and is
//!   zero elsewhere, all under the one randomness behind `D`
//! - the amount and the sender's remaining balance are in range
//! - `nonce_u = sk·G_epoch`
//!
//! Transcript order:
//!
//! ```text
//! v = H(statement ‖ BpA ‖ BpS ‖ A ‖ B)
//! ω = H(v ‖ CLn~ ‖ CRn~ ‖ C0~ ‖ D~ ‖ y0~ ‖ g~ ‖ CX~ ‖ yX~)
//! y = H(ω), z = H(y), x = H(T1 ‖ T2 ‖ z)
//! c = H(x ‖ Ay ‖ AD ‖ Ab ‖ AX ‖ At ‖ Au)
//! ```
//!
//! The inner product argument then runs with base `map(c)` chained on `c`.

mod poly;
pub mod proof;
pub mod prover;
pub mod statement;
pub mod verifier;

pub use proof::*;
pub use prover::*;
pub use statement::*;
pub use verifier::*;

use zether_core::{Point, PublicParams, Scalar, Transcript, ZetherResult};
use zether_range::RangeShape;

pub use zether_core::TRANSFER_VALUES;

/// Generators needed by the index bit commitments `A`, `B`
pub(crate) fn bit_commitment_len(m: usize) -> usize {
    4 * m + 2
}

pub(crate) fn range_shape(params: &PublicParams) -> ZetherResult<RangeShape> {
    RangeShape::new(params.config().agg_range_bits, params.config().agg_values)
}

pub(crate) fn challenge_v(statement: &TransferStatement, bp_a: &Point, bp_s: &Point, a: &Point, b: &Point) -> Scalar {
    let mut transcript = Transcript::new();
    transcript.append_bytes(&statement.to_bytes());
    transcript.append_points(&[*bp_a, *bp_s, *a, *b]);
    transcript.challenge_scalar()
}

pub(crate) fn challenge_omega(v: &Scalar, tildes: [&[Point]; 8]) -> Scalar {
    let mut transcript = Transcript::new();
    transcript.append_scalar(v);
    for tilde in tildes {
        transcript.append_points(tilde);
    }
    transcript.challenge_scalar()
}

pub(crate) fn challenge_c(x: &Scalar, commitments: &[Point; 6]) -> Scalar {
    let mut transcript = Transcript::new();
    transcript.append_scalar(x);
    transcript.append_points(commitments);
    transcript.challenge_scalar()
}
