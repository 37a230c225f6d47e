//! Benchmarks for the confidential transfer proof crates
//!
//! - Inner product argument proving and verification
//! - Single and aggregated range proofs
//! - Transfer proofs across ring sizes, and withdraw proofs
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench -p zether-benches
//! ```
//!
//! Or run specific benchmarks:
//! ```bash
//! cargo bench -p zether-benches --bench transfer
//! cargo bench -p zether-benches --bench ipa
//! ```

use rand::{CryptoRng, RngCore};
use zether::{Account, Ciphertext, KeyPair, Ring, Transfer, TransferBuilder, UserState};
use zether_core::{PublicParams, ZetherResult};

/// A ready-to-verify transfer over a ring of `size` fresh accounts
///
/// The sender sits at index 0 with a balance of 1000 and sends 100 to index 1.
pub fn sample_transfer<R: RngCore + CryptoRng>(
    params: &PublicParams,
    size: usize,
    rng: &mut R,
) -> ZetherResult<Transfer> {
    let (sender, ring, current) = sample_ring(params, size, rng);
    TransferBuilder::new(params)
        .build(&sender, &ring, &current, 100, 1, rng)
}

/// Sender account, ring and current ciphertexts for [`sample_transfer`]
pub fn sample_ring<R: RngCore + CryptoRng>(
    params: &PublicParams,
    size: usize,
    rng: &mut R,
) -> (Account, Ring, Vec<Ciphertext>) {
    let keys: Vec<KeyPair> = (0..size).map(|_| KeyPair::generate(params, rng)).collect();
    let members: Vec<_> = keys.iter().map(KeyPair::public).collect();
    let current = members
        .iter()
        .enumerate()
        .map(|(i, pk)| Ciphertext::encrypt(params, pk, if i == 0 { 1_000 } else { 10 }, rng))
        .collect();
    let sender = Account::with_state(
        keys[0].clone(),
        UserState {
            balance: 1_000,
            ..UserState::default()
        },
    );
    (sender, Ring { members, l0: 0, l1: 1 }, current)
}
