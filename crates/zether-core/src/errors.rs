//! Error types shared by every proof crate

use thiserror::Error;

/// Main error type for confidential transfer operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZetherError {
    /// Vector operands of different lengths
    #[error("Vector length mismatch: expected {expected}, got {actual}")]
    VectorLengthMismatch { expected: usize, actual: usize },

    /// Value outside the permitted interval
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// Malformed point, scalar, ciphertext, signature or proof bytes
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// Decryption produced the group identity
    #[error("Account not found")]
    AccountNotFound,

    /// A recomputed Fiat-Shamir challenge differs from the proof
    #[error("Challenge mismatch in {0}")]
    ChallengeMismatch(&'static str),

    /// A verification equation does not hold
    #[error("Proof invalid: {0}")]
    ProofInvalid(String),

    /// The epoch nonce has already been spent
    #[error("Nonce already used in epoch {epoch}")]
    NonceAlreadyUsed { epoch: u64 },

    /// Sender and receiver are the same account
    #[error("Transfers to self are not allowed")]
    SelfTransferDisallowed,

    /// Ring sampling gave up before finding enough distinct members
    #[error("Decoy sampling exhausted: needed {needed}, found {found}")]
    DecoyExhausted { needed: usize, found: usize },

    /// Spend larger than the tracked balance
    #[error("Insufficient balance: have {balance}, requested {requested}")]
    InsufficientBalance { balance: u64, requested: u64 },

    /// Invalid parameters provided
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Witness inconsistent with the statement shape
    #[error("Invalid witness: {0}")]
    InvalidWitness(String),

    /// Insufficient generators
    #[error("Insufficient generators: need {needed}, have {available}")]
    InsufficientGenerators { needed: usize, available: usize },

    /// Bounded discrete-log search found nothing
    #[error("Balance not found in [{low}, {high}]")]
    BalanceNotFound { low: u64, high: u64 },

    /// Bounded discrete-log search exceeded its deadline
    #[error("Balance scan timed out")]
    ScanTimeout,

    /// Bounded discrete-log search was cancelled by the caller
    #[error("Balance scan cancelled")]
    ScanCancelled,

    /// Configuration could not be loaded or validated
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ZetherError {
    /// Shorthand for a length check failure
    pub fn length(expected: usize, actual: usize) -> Self {
        Self::VectorLengthMismatch { expected, actual }
    }
}

/// Result type for confidential transfer operations
pub type ZetherResult<T> = Result<T, ZetherError>;

/// Fail with `VectorLengthMismatch` unless `actual == expected`
pub fn ensure_length(expected: usize, actual: usize) -> ZetherResult<()> {
    if expected != actual {
        return Err(ZetherError::length(expected, actual));
    }
    Ok(())
}
