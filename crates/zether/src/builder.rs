//! Assemble statements and witnesses from account state, then prove
//!
//! The builders only enforce what the local account knows: the tracked
//! balance, the epoch nonce and that the ring is consistent. Callers
//! [`Account::rollover`] to the current epoch before building and
//! [`Account::settle`] once the ledger accepts the proof.

use crate::transfer::{TransferProof, TransferProver, TransferStatement, TransferWitness};
use crate::withdraw::{WithdrawProof, WithdrawProver, WithdrawStatement, WithdrawWitness};
use crate::{Account, Ciphertext, Ring};
use rand_core::{CryptoRng, RngCore};
use tracing::{debug, info};
use zether_core::{ensure_length, random_scalar, PublicParams, Scalar, ZetherError, ZetherResult};

/// A transfer ready to submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub statement: TransferStatement,
    pub proof: TransferProof,
}

/// A withdrawal ready to submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Withdrawal {
    pub statement: WithdrawStatement,
    pub proof: WithdrawProof,
}

/// Builds and proves a transfer from the sender's account over a ring
#[derive(Debug, Clone, Copy)]
pub struct TransferBuilder<'a> {
    params: &'a PublicParams,
}

impl<'a> TransferBuilder<'a> {
    pub fn new(params: &'a PublicParams) -> Self {
        Self { params }
    }

    /// `current[i]` must be the on-ledger ciphertext of `ring.members[i]`
    pub fn build<R: RngCore + CryptoRng>(
        &self,
        sender: &Account,
        ring: &Ring,
        current: &[Ciphertext],
        amount: u64,
        epoch: u64,
        rng: &mut R,
    ) -> ZetherResult<Transfer> {
        ensure_length(ring.len(), current.len())?;
        let (l0, l1) = (ring.l0, ring.l1);
        if l0 >= ring.len() || l1 >= ring.len() {
            return Err(ZetherError::InvalidParameters(format!(
                "ring indices ({}, {}) outside a ring of {}",
                l0,
                l1,
                ring.len()
            )));
        }
        if ring.members[l0] != sender.public() {
            return Err(ZetherError::InvalidParameters(
                "sender is not at the ring's sender index".to_string(),
            ));
        }
        if ring.members[l0] == ring.members[l1] {
            return Err(ZetherError::SelfTransferDisallowed);
        }
        sender.check_spend(amount)?;

        let g = self.params.g();
        let r = random_scalar(rng);
        let value = g * Scalar::from(amount);
        let d = g * r;
        let c_vector: Vec<_> = ring
            .members
            .iter()
            .enumerate()
            .map(|(i, pk)| {
                let masked = *pk * r;
                if i == l0 {
                    masked - value
                } else if i == l1 {
                    masked + value
                } else {
                    masked
                }
            })
            .collect();

        let statement = TransferStatement {
            cln_new: current.iter().zip(c_vector.iter()).map(|(ct, c)| ct.c + *c).collect(),
            crn_new: current.iter().map(|ct| ct.d + d).collect(),
            anon_pk: ring.members.clone(),
            c_vector,
            d,
            nonce_u: sender.nonce(epoch),
            epoch,
        };
        let witness = TransferWitness {
            sk: *sender.key().secret(),
            amount,
            remaining: sender.balance() - amount,
            r,
            l0,
            l1,
        };
        debug!(ring = ring.len(), epoch, "transfer statement assembled");

        let proof = TransferProver::new(self.params).prove(&statement, &witness, rng)?;
        info!(ring = ring.len(), epoch, "transfer built");
        Ok(Transfer { statement, proof })
    }
}

/// Builds and proves a withdrawal from the sender's account
#[derive(Debug, Clone, Copy)]
pub struct WithdrawBuilder<'a> {
    params: &'a PublicParams,
}

impl<'a> WithdrawBuilder<'a> {
    pub fn new(params: &'a PublicParams) -> Self {
        Self { params }
    }

    /// `recipient` is bound into the proof and names who receives the funds
    pub fn build<R: RngCore + CryptoRng>(
        &self,
        sender: &Account,
        current: &Ciphertext,
        amount: u64,
        epoch: u64,
        recipient: &[u8],
        rng: &mut R,
    ) -> ZetherResult<Withdrawal> {
        sender.check_spend(amount)?;

        let statement = WithdrawStatement {
            cln: current.c - self.params.g() * Scalar::from(amount),
            crn: current.d,
            pk: sender.public(),
            epoch,
            sender: recipient.to_vec(),
            nonce_u: sender.nonce(epoch),
        };
        let witness = WithdrawWitness {
            sk: *sender.key().secret(),
            remaining: sender.balance() - amount,
        };

        let proof = WithdrawProver::new(self.params).prove(&statement, &witness, rng)?;
        info!(epoch, "withdrawal built");
        Ok(Withdrawal { statement, proof })
    }
}
