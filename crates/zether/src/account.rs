//! Local account state: decrypted balance and per-epoch nonce bookkeeping

use crate::balance::{read_balance, CancelToken, ScanConfig};
use crate::{Ciphertext, KeyPair};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zether_core::{epoch_base, Point, PublicParams, ZetherError, ZetherResult};

/// What the holder knows about their on-ledger account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserState {
    pub balance: u64,
    pub nonce_used: bool,
    pub last_rollover: u64,
}

/// Key pair plus its tracked state
#[derive(Debug, Clone)]
pub struct Account {
    key: KeyPair,
    state: UserState,
}

impl Account {
    pub fn new(key: KeyPair) -> Self {
        Self::with_state(key, UserState::default())
    }

    pub fn with_state(key: KeyPair, state: UserState) -> Self {
        Self { key, state }
    }

    pub fn key(&self) -> &KeyPair {
        &self.key
    }

    pub fn public(&self) -> Point {
        self.key.public()
    }

    pub fn state(&self) -> &UserState {
        &self.state
    }

    pub fn balance(&self) -> u64 {
        self.state.balance
    }

    /// Entering a newer epoch frees the nonce
    pub fn rollover(&mut self, epoch: u64) {
        if self.state.last_rollover < epoch {
            debug!(from = self.state.last_rollover, to = epoch, "account rollover");
            self.state.nonce_used = false;
            self.state.last_rollover = epoch;
        }
    }

    /// Whether `value` may be spent right now
    pub fn check_spend(&self, value: u64) -> ZetherResult<()> {
        if value > self.state.balance {
            return Err(ZetherError::InsufficientBalance {
                balance: self.state.balance,
                requested: value,
            });
        }
        if self.state.nonce_used {
            return Err(ZetherError::NonceAlreadyUsed {
                epoch: self.state.last_rollover,
            });
        }
        Ok(())
    }

    /// Decrypt the on-ledger ciphertext and search `[low, high]` for the balance
    pub fn recover(
        &mut self,
        params: &PublicParams,
        ciphertext: &Ciphertext,
        low: u64,
        high: u64,
        scan: &ScanConfig,
        cancel: &CancelToken,
    ) -> ZetherResult<u64> {
        if ciphertext.is_identity() {
            return Err(ZetherError::AccountNotFound);
        }
        let point = ciphertext.decrypt(self.key.secret());
        let balance = read_balance(params, &point, low, high, scan, cancel)?;
        debug!(balance, "balance recovered");
        self.state.balance = balance;
        Ok(balance)
    }

    /// `u = sk·G_epoch`
    pub fn nonce(&self, epoch: u64) -> Point {
        epoch_base(epoch) * *self.key.secret()
    }

    /// Apply an accepted spend of `value` in `epoch`
    pub fn settle(&mut self, value: u64, epoch: u64) -> ZetherResult<()> {
        self.rollover(epoch);
        self.check_spend(value)?;
        self.state.balance -= value;
        self.state.nonce_used = true;
        Ok(())
    }
}
