//! In-process ledger.

use std::collections::{HashMap, HashSet};

use ido_core::{AccountId, Amount, TokenId};
use parking_lot::Mutex;

use super::{Ledger, LedgerError};

#[derive(Debug, Default)]
struct Books {
    tokens: HashSet<TokenId>,
    balances: HashMap<(TokenId, AccountId), Amount>,
    allowances: HashMap<(TokenId, AccountId, AccountId), Amount>,
}

impl Books {
    fn ensure_token(&self, token: TokenId) -> Result<(), LedgerError> {
        if self.tokens.contains(&token) {
            Ok(())
        } else {
            Err(LedgerError::UnknownToken { token })
        }
    }

    fn balance(&self, token: TokenId, account: AccountId) -> Amount {
        self.balances.get(&(token, account)).copied().unwrap_or(0)
    }

    fn allowance(&self, token: TokenId, owner: AccountId, spender: AccountId) -> Amount {
        self.allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or(0)
    }

    /// Checks first, then moves; never leaves a half-applied transfer.
    fn move_funds(
        &mut self,
        token: TokenId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let available = self.balance(token, from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                account: from,
                needed: amount,
                available,
            });
        }
        self.balances.insert((token, from), available - amount);
        let credited = self.balance(token, to).saturating_add(amount);
        self.balances.insert((token, to), credited);
        Ok(())
    }
}

/// Thread-safe in-memory ledger with ERC-20 style allowances.
///
/// An allowance of `Amount::MAX` is treated as unlimited and is not
/// decreased by `transfer_from`.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    books: Mutex<Books>,
}

impl InMemoryLedger {
    /// Create an empty ledger with no tokens.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `token` known without minting anything.
    pub fn register_token(&self, token: TokenId) {
        self.books.lock().tokens.insert(token);
    }

    /// Credit `amount` of `token` to `to`, registering the token if needed.
    ///
    /// Balances saturate at `Amount::MAX`.
    pub fn mint(&self, token: TokenId, to: AccountId, amount: Amount) {
        let mut books = self.books.lock();
        books.tokens.insert(token);
        let credited = books.balance(token, to).saturating_add(amount);
        books.balances.insert((token, to), credited);
    }

    /// Sum of all balances of `token`, saturating at `Amount::MAX`.
    pub fn total_supply(&self, token: TokenId) -> Amount {
        self.books
            .lock()
            .balances
            .iter()
            .filter(|((t, _), _)| *t == token)
            .map(|(_, amount)| *amount)
            .fold(0, Amount::saturating_add)
    }
}

impl Ledger for InMemoryLedger {
    fn balance_of(&self, token: TokenId, account: AccountId) -> Result<Amount, LedgerError> {
        let books = self.books.lock();
        books.ensure_token(token)?;
        Ok(books.balance(token, account))
    }

    fn allowance(
        &self,
        token: TokenId,
        owner: AccountId,
        spender: AccountId,
    ) -> Result<Amount, LedgerError> {
        let books = self.books.lock();
        books.ensure_token(token)?;
        Ok(books.allowance(token, owner, spender))
    }

    fn approve(
        &self,
        token: TokenId,
        owner: AccountId,
        spender: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let mut books = self.books.lock();
        books.ensure_token(token)?;
        books.allowances.insert((token, owner, spender), amount);
        Ok(())
    }

    fn transfer(
        &self,
        token: TokenId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let mut books = self.books.lock();
        books.ensure_token(token)?;
        books.move_funds(token, from, to, amount)
    }

    fn transfer_from(
        &self,
        token: TokenId,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let mut books = self.books.lock();
        books.ensure_token(token)?;

        let allowed = books.allowance(token, from, spender);
        if allowed < amount {
            return Err(LedgerError::InsufficientAllowance {
                owner: from,
                spender,
                needed: amount,
                available: allowed,
            });
        }

        books.move_funds(token, from, to, amount)?;
        if allowed != Amount::MAX {
            books
                .allowances
                .insert((token, from, spender), allowed - amount);
        }
        Ok(())
    }
}
