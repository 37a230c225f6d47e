//! # Zether
//!
//! Confidential, anonymous account transfers over BN254. Balances live on the
//! ledger as ElGamal ciphertexts; every state change carries a
//! zero-knowledge proof:
//!
//! - [`transfer`]: moves a hidden amount between two hidden members of a
//!   ring, proving the amount and the sender's remaining balance are in range
//! - [`withdraw`]: takes a public amount out of an account, proving the
//!   remaining balance is in range
//! - [`schnorr`]: proves key ownership for registration
//!
//! Spends are limited to one per epoch through the nonce `u = sk·G_epoch`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rand::thread_rng;
//! use zether::{Account, Ciphertext, DecoyPolicy, KeyPair, RingBuilder, TransferBuilder, TransferVerifier};
//! use zether_core::{ParamsConfig, PublicParams};
//!
//! let params = PublicParams::new(ParamsConfig::default()).unwrap();
//! let mut rng = thread_rng();
//!
//! let registered: Vec<_> = (0..16).map(|_| KeyPair::generate(&params, &mut rng).public()).collect();
//! let alice = KeyPair::generate(&params, &mut rng);
//! let bob = KeyPair::generate(&params, &mut rng);
//!
//! let ring = RingBuilder::new(&registered, DecoyPolicy::default())
//!     .build(alice.public(), bob.public(), 8, &mut rng)
//!     .unwrap();
//! let current: Vec<_> = ring
//!     .members
//!     .iter()
//!     .map(|pk| Ciphertext::encrypt(&params, pk, 100, &mut rng))
//!     .collect();
//!
//! let mut sender = Account::new(alice);
//! sender.recover(&params, &current[ring.l0], 0, 1_000, &Default::default(), &Default::default()).unwrap();
//! let transfer = TransferBuilder::new(&params)
//!     .build(&sender, &ring, &current, 30, 1, &mut rng)
//!     .unwrap();
//! assert!(TransferVerifier::new(&params).verify(&transfer.statement, &transfer.proof).is_ok());
//! ```

pub mod account;
pub mod balance;
pub mod builder;
pub mod elgamal;
pub mod keys;
pub mod ring;
pub mod schnorr;
pub mod transfer;
pub mod withdraw;

pub use account::*;
pub use balance::*;
pub use builder::*;
pub use elgamal::*;
pub use keys::*;
pub use ring::*;
pub use schnorr::{sign, Signature, SIGNATURE_BYTES};
pub use transfer::{TransferProof, TransferProver, TransferStatement, TransferVerifier, TransferWitness};
pub use withdraw::{WithdrawProof, WithdrawProver, WithdrawStatement, WithdrawVerifier, WithdrawWitness};
pub use zether_core::{PublicParams, ZetherError, ZetherResult};
