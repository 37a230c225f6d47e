//! Withdraw (burn) proof
//!
//! Shows that after taking `amount` out of an account, the remaining balance
//! `b` behind `(CLn, CRn)` is in range and known to the holder of `sk`:
//!
//! ```text
//! CLn - sk·CRn = b·G,  pk = sk·G,  u = sk·G_epoch,  0 ≤ b < 2^n
//! ```
//!
//! Transcript order:
//!
//! ```text
//! digest = SHA256(CLn ‖ CRn ‖ pk ‖ epoch ‖ sender)
//! y = H(digest ‖ A ‖ S), z = H(digest ‖ A ‖ S ‖ y), x = H(T1 ‖ T2 ‖ z)
//! c = H(x ‖ Rpub ‖ Rb ‖ RtHat ‖ Ru)
//! ```

pub mod proof;
pub mod prover;
pub mod verifier;

pub use proof::*;
pub use prover::*;
pub use verifier::*;

use sha2::{Digest, Sha256};
use zether_core::{u64_to_min_bytes, Point, PublicParams, Scalar, Transcript, ZetherResult};
use zether_range::{challenge_yz, RangeShape};

/// Public statement of a withdrawal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawStatement {
    /// Left ciphertext half with the withdrawn amount already removed
    pub cln: Point,
    /// Right ciphertext half
    pub crn: Point,
    pub pk: Point,
    pub epoch: u64,
    /// Opaque identifier of the party receiving the funds
    pub sender: Vec<u8>,
    /// `u = sk·G_epoch`
    pub nonce_u: Point,
}

impl WithdrawStatement {
    /// SHA-256 over the statement, the prefix of the `y, z` transcript
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.cln.to_bytes());
        hasher.update(self.crn.to_bytes());
        hasher.update(self.pk.to_bytes());
        hasher.update(u64_to_min_bytes(self.epoch));
        hasher.update(&self.sender);
        hasher.finalize().into()
    }
}

/// Secret witness of a withdrawal
#[derive(Clone)]
pub struct WithdrawWitness {
    pub sk: Scalar,
    /// Balance left after the withdrawal
    pub remaining: u64,
}

impl std::fmt::Debug for WithdrawWitness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("WithdrawWitness { .. }")
    }
}

pub(crate) fn range_shape(params: &PublicParams) -> ZetherResult<RangeShape> {
    RangeShape::new(params.config().agg_range_bits, 1)
}

pub(crate) fn challenge_yz_for(statement: &WithdrawStatement, a: &Point, s: &Point) -> (Scalar, Scalar) {
    let mut transcript = Transcript::new();
    transcript.append_bytes(&statement.digest());
    transcript.append_point(a);
    transcript.append_point(s);
    challenge_yz(transcript)
}

pub(crate) fn challenge_c(x: &Scalar, commitments: &[Point; 4]) -> Scalar {
    let mut transcript = Transcript::new();
    transcript.append_scalar(x);
    transcript.append_points(commitments);
    transcript.challenge_scalar()
}
