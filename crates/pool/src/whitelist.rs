//! Whitelist of accounts allowed to join.

use std::collections::BTreeSet;

use ido_core::AccountId;

/// Ordered set of whitelisted accounts. Insert and remove are idempotent.
#[derive(Debug, Clone, Default)]
pub(crate) struct Whitelist {
    members: BTreeSet<AccountId>,
}

impl Whitelist {
    /// Returns `true` if the account was not yet a member.
    pub(crate) fn insert(&mut self, account: AccountId) -> bool {
        self.members.insert(account)
    }

    /// Returns `true` if the account was a member.
    pub(crate) fn remove(&mut self, account: &AccountId) -> bool {
        self.members.remove(account)
    }

    pub(crate) fn contains(&self, account: &AccountId) -> bool {
        self.members.contains(account)
    }

    pub(crate) fn len(&self) -> usize {
        self.members.len()
    }

    pub(crate) fn to_vec(&self) -> Vec<AccountId> {
        self.members.iter().copied().collect()
    }
}
