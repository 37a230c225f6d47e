//! # Zether Core
//!
//! Foundational algebra for the confidential transfer proof crates:
//!
//! - BN254 G1 points with the 64-byte wire encoding, scalars mod N
//! - Hash-to-curve generators and the shared [`PublicParams`]
//! - SHA-256 Fiat-Shamir transcripts
//! - Scalar vector and polynomial helpers
//! - Canonical byte codec and the shared error type
//!
//! ## Generators
//!
//! Every base point is derived by hashing a fixed label onto the curve:
//! - `G = map("g")`: value generator
//! - `H = map("h")`: blinding generator
//! - `{g_i}, {h_i}`: vector generators for range and bit commitments
//! - `G_epoch = map("zether" ‖ epoch)`: per-epoch nonce base

pub mod codec;
pub mod commitments;
pub mod config;
pub mod errors;
pub mod generators;
pub mod group;
pub mod transcript;
pub mod utils;

pub use codec::*;
pub use commitments::*;
pub use config::*;
pub use errors::*;
pub use generators::*;
pub use group::*;
pub use transcript::*;
pub use utils::*;

#[doc(hidden)]
pub mod __private {
    pub use hex;
    pub use serde;
}
