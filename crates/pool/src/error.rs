//! Error types for allocation pool operations
//!
//! Display strings are part of the contract: callers and tests match on the
//! exact text, so the messages below must stay stable.

use ido_core::{AccountId, Amount};
use thiserror::Error;

use crate::ledger::LedgerError;

/// Result type for pool operations
pub type Result<T> = std::result::Result<T, PoolError>;

/// Coarse classification of a [`PoolError`].
///
/// Both cap violations (per-user and pool-wide) share
/// [`ErrorKind::PoolCapExceeded`]; the variant and message tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Owner-only operation called by someone else
    NotOwner,
    /// Paired sequences of different lengths
    LengthMismatch,
    /// Caller is not on the whitelist
    NotWhitelisted,
    /// A per-user or pool-wide cap would be exceeded
    PoolCapExceeded,
    /// Operation needs a configured pool
    NotConfigured,
    /// `join` outside the sale window
    WindowClosed,
    /// Zero amount
    InvalidAmount,
    /// Configuration or settings failed validation
    InvalidConfig,
    /// New pool or per-user cap lower than what is already committed
    CapBelowCommitted,
    /// The ledger refused the transfer
    Ledger,
}

/// Error type for allocation pool operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// Owner-only operation invoked by a non-owner
    #[error("Ownable: caller is not the owner")]
    NotOwner {
        /// The rejected caller
        caller: AccountId,
    },

    /// `addresses` and `values` have different lengths
    #[error("Length of addresses and allocation values are different")]
    LengthMismatch {
        /// Number of addresses supplied
        addresses: usize,
        /// Number of values supplied
        values: usize,
    },

    /// Caller is not whitelisted
    #[error("You are not whitelisted")]
    NotWhitelisted {
        /// The rejected caller
        account: AccountId,
    },

    /// The join would push the caller past their own allocation
    #[error("Exceed the amount to join IDO")]
    UserCapExceeded {
        /// The participant
        account: AccountId,
        /// Amount requested in this call
        requested: Amount,
        /// Amount the participant already committed
        committed: Amount,
        /// The participant's cap
        cap: Amount,
    },

    /// The join would push the pool past `max_pool_allocation`
    #[error("Exceed max pool allocation for this IDO")]
    PoolCapExceeded {
        /// Amount requested in this call
        requested: Amount,
        /// Pool-wide committed total
        committed: Amount,
        /// The pool cap
        cap: Amount,
    },

    /// No configuration installed yet
    #[error("IDO pool is not configured")]
    NotConfigured,

    /// `join` outside `[start, end)`
    #[error("IDO pool is not open for joining")]
    WindowClosed {
        /// Clock reading at the time of the call
        now: u64,
        /// Window start (inclusive)
        start: u64,
        /// Window end (exclusive)
        end: u64,
    },

    /// Zero amount
    #[error("Amount must be greater than zero")]
    InvalidAmount,

    /// Configuration failed validation
    #[error("Invalid pool configuration: {message}")]
    InvalidConfig {
        /// What is wrong
        message: String,
    },

    /// Cap lower than the amount already committed
    #[error("Max pool allocation is below the committed amount")]
    CapBelowCommitted {
        /// The proposed cap
        cap: Amount,
        /// Pool-wide committed total
        committed: Amount,
    },

    /// Per-user cap lower than what that participant already committed
    #[error("User max allocation is below the committed amount")]
    UserCapBelowCommitted {
        /// The participant
        account: AccountId,
        /// The proposed cap
        cap: Amount,
        /// Amount the participant already committed
        committed: Amount,
    },

    /// Settings could not be read or parsed
    #[error("Settings error: {message}")]
    Settings {
        /// What went wrong
        message: String,
    },

    /// The ledger refused the transfer
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl PoolError {
    /// Create a configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a settings error
    pub fn settings<S: Into<String>>(message: S) -> Self {
        Self::Settings {
            message: message.into(),
        }
    }

    /// Classify this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotOwner { .. } => ErrorKind::NotOwner,
            Self::LengthMismatch { .. } => ErrorKind::LengthMismatch,
            Self::NotWhitelisted { .. } => ErrorKind::NotWhitelisted,
            Self::UserCapExceeded { .. } | Self::PoolCapExceeded { .. } => {
                ErrorKind::PoolCapExceeded
            }
            Self::NotConfigured => ErrorKind::NotConfigured,
            Self::WindowClosed { .. } => ErrorKind::WindowClosed,
            Self::InvalidAmount => ErrorKind::InvalidAmount,
            Self::InvalidConfig { .. } | Self::Settings { .. } => ErrorKind::InvalidConfig,
            Self::CapBelowCommitted { .. } | Self::UserCapBelowCommitted { .. } => {
                ErrorKind::CapBelowCommitted
            }
            Self::Ledger(_) => ErrorKind::Ledger,
        }
    }

    /// Whether the same call could succeed later without owner action
    /// (the window has not opened yet, or the ledger lacked funds/allowance).
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::WindowClosed { now, start, .. } => now < start,
            Self::Ledger(_) => true,
            _ => false,
        }
    }
}
