//! Token ledger collaborator.
//!
//! The pool never holds funds. During `join` it asks the ledger to move the
//! sale token from the participant to the beneficiary, spending an allowance
//! the participant granted to the pool's account beforehand.
//!
//! [`InMemoryLedger`] is a complete in-process implementation used by the
//! tests, the example and the benches.

mod memory;

pub use memory::InMemoryLedger;

use ido_core::{AccountId, Amount, TokenId};
use thiserror::Error;

/// Error returned by a [`Ledger`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The token is not known to the ledger
    #[error("unknown token {token}")]
    UnknownToken {
        /// The token
        token: TokenId,
    },

    /// The debited account holds too little
    #[error("transfer amount exceeds balance of {account}: needed {needed}, available {available}")]
    InsufficientBalance {
        /// The debited account
        account: AccountId,
        /// Amount the transfer needs
        needed: Amount,
        /// Current balance
        available: Amount,
    },

    /// The spender was not approved for enough
    #[error(
        "insufficient allowance from {owner} to {spender}: needed {needed}, available {available}"
    )]
    InsufficientAllowance {
        /// Account whose funds are spent
        owner: AccountId,
        /// Account spending them
        spender: AccountId,
        /// Amount the transfer needs
        needed: Amount,
        /// Current allowance
        available: Amount,
    },
}

/// Token ledger operations the pool and its participants rely on.
///
/// All methods take `&self`; implementations synchronize internally so a
/// ledger can be shared behind an `Arc`. A failed call must leave balances
/// and allowances untouched.
pub trait Ledger: Send + Sync {
    /// Balance of `account` in `token`.
    fn balance_of(&self, token: TokenId, account: AccountId) -> Result<Amount, LedgerError>;

    /// Remaining amount `spender` may move out of `owner`'s balance.
    fn allowance(
        &self,
        token: TokenId,
        owner: AccountId,
        spender: AccountId,
    ) -> Result<Amount, LedgerError>;

    /// Set the allowance of `spender` over `owner`'s balance.
    fn approve(
        &self,
        token: TokenId,
        owner: AccountId,
        spender: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Move `amount` from `from` to `to`, authorised by `from` itself.
    fn transfer(
        &self,
        token: TokenId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Move `amount` from `from` to `to`, spending `spender`'s allowance.
    fn transfer_from(
        &self,
        token: TokenId,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;
}
