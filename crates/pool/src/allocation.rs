//! Per-user caps and commitment bookkeeping.
//!
//! [`Commitments::reserve`] checks a join against both caps without touching
//! state; [`Commitments::commit`] applies the resulting [`Reservation`]. The
//! pool calls them back to back under its lock, with the ledger transfer in
//! between, so a failed transfer never leaves a recorded commitment.

use std::collections::HashMap;

use ido_core::{AccountId, Amount};

use crate::error::{PoolError, Result};

/// Per-user allocation caps.
#[derive(Debug, Clone, Default)]
pub(crate) struct UserCaps {
    caps: HashMap<AccountId, Amount>,
}

impl UserCaps {
    pub(crate) fn get(&self, account: &AccountId) -> Option<Amount> {
        self.caps.get(account).copied()
    }

    pub(crate) fn set(&mut self, account: AccountId, cap: Amount) {
        self.caps.insert(account, cap);
    }

    pub(crate) fn len(&self) -> usize {
        self.caps.len()
    }
}

/// Outcome of a successful cap check, ready to be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Reservation {
    pub(crate) participant: AccountId,
    pub(crate) amount: Amount,
    pub(crate) cumulative: Amount,
    pub(crate) total: Amount,
}

/// Cumulative commitments per participant and pool-wide.
#[derive(Debug, Clone, Default)]
pub(crate) struct Commitments {
    per_user: HashMap<AccountId, Amount>,
    total: Amount,
}

impl Commitments {
    pub(crate) fn of(&self, account: &AccountId) -> Amount {
        self.per_user.get(account).copied().unwrap_or(0)
    }

    pub(crate) fn total(&self) -> Amount {
        self.total
    }

    pub(crate) fn participants(&self) -> usize {
        self.per_user.len()
    }

    /// Check `amount` against the participant's cap (if any), then the pool
    /// cap. Overflow counts as exceeding the cap being checked.
    pub(crate) fn reserve(
        &self,
        participant: AccountId,
        amount: Amount,
        user_cap: Option<Amount>,
        pool_cap: Amount,
    ) -> Result<Reservation> {
        let committed = self.of(&participant);

        if let Some(cap) = user_cap {
            match committed.checked_add(amount) {
                Some(next) if next <= cap => {}
                _ => {
                    return Err(PoolError::UserCapExceeded {
                        account: participant,
                        requested: amount,
                        committed,
                        cap,
                    });
                }
            }
        }

        let pool_exceeded = || PoolError::PoolCapExceeded {
            requested: amount,
            committed: self.total,
            cap: pool_cap,
        };
        let total = self
            .total
            .checked_add(amount)
            .filter(|next| *next <= pool_cap)
            .ok_or_else(pool_exceeded)?;
        // committed <= self.total, so this cannot overflow once total fits
        let cumulative = committed.checked_add(amount).ok_or_else(pool_exceeded)?;

        Ok(Reservation {
            participant,
            amount,
            cumulative,
            total,
        })
    }

    pub(crate) fn commit(&mut self, reservation: Reservation) {
        self.per_user
            .insert(reservation.participant, reservation.cumulative);
        self.total = reservation.total;
    }
}
