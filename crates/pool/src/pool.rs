//! Allocation pool: whitelist, caps and commitments behind one lock.
//!
//! Every operation takes the caller identity explicitly. Mutations run under
//! a single `parking_lot::Mutex`, so the cap checks and the commitment update
//! of a `join` (ledger transfer included) happen as one indivisible step.

use std::sync::Arc;

use ido_core::{AccountId, Amount};
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::allocation::{Commitments, UserCaps};
use crate::clock::{Clock, SystemClock};
use crate::config::PoolConfig;
use crate::error::{PoolError, Result};
use crate::events::{EventBus, PoolEvent};
use crate::ledger::Ledger;
use crate::settings::{PoolOptions, PoolSettings};
use crate::whitelist::Whitelist;

// ---------------------------------------------------------------------------
// Public value types
// ---------------------------------------------------------------------------

/// Lifecycle of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolStatus {
    /// Created, no configuration yet; `join` is rejected.
    Unconfigured,
    /// A configuration is installed.
    Configured,
}

/// Result of a successful `join`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JoinReceipt {
    /// Who joined
    pub participant: AccountId,
    /// Amount of this join
    pub amount: Amount,
    /// Participant's cumulative commitment afterwards
    pub cumulative: Amount,
    /// Pool-wide committed total afterwards
    pub total_committed: Amount,
}

/// Point-in-time view of the pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolSnapshot {
    /// Lifecycle state
    pub status: PoolStatus,
    /// Current owner
    pub owner: AccountId,
    /// Installed configuration, if any
    pub config: Option<PoolConfig>,
    /// Number of whitelisted accounts
    pub whitelisted: usize,
    /// Number of accounts with a per-user cap
    pub capped_users: usize,
    /// Number of accounts that joined at least once
    pub participants: usize,
    /// Pool-wide committed total
    pub total_committed: Amount,
    /// Capacity left under the pool cap (`None` while unconfigured)
    pub remaining_capacity: Option<Amount>,
}

// ---------------------------------------------------------------------------
// Pool internals
// ---------------------------------------------------------------------------

/// Mutable state, only ever touched under the pool lock.
#[derive(Debug)]
struct PoolState {
    owner: AccountId,
    config: Option<PoolConfig>,
    whitelist: Whitelist,
    caps: UserCaps,
    commitments: Commitments,
}

impl PoolState {
    fn new(owner: AccountId) -> Self {
        Self {
            owner,
            config: None,
            whitelist: Whitelist::default(),
            caps: UserCaps::default(),
            commitments: Commitments::default(),
        }
    }

    fn ensure_owner(&self, caller: AccountId) -> Result<()> {
        if caller == self.owner {
            Ok(())
        } else {
            tracing::warn!(%caller, owner = %self.owner, "owner-only operation rejected");
            Err(PoolError::NotOwner { caller })
        }
    }

    fn ensure_cap_covers_commitments(&self, cap: Amount) -> Result<()> {
        let committed = self.commitments.total();
        if cap < committed {
            return Err(PoolError::CapBelowCommitted { cap, committed });
        }
        Ok(())
    }

    fn remaining_capacity(&self) -> Option<Amount> {
        self.config.map(|config| {
            config
                .max_pool_allocation
                .saturating_sub(self.commitments.total())
        })
    }

    fn status(&self) -> PoolStatus {
        if self.config.is_some() {
            PoolStatus::Configured
        } else {
            PoolStatus::Unconfigured
        }
    }
}

// ---------------------------------------------------------------------------
// PoolBuilder
// ---------------------------------------------------------------------------

/// Builder for [`AllocationPool`].
pub struct PoolBuilder {
    owner: AccountId,
    pool_account: AccountId,
    ledger: Arc<dyn Ledger>,
    clock: Option<Arc<dyn Clock>>,
    options: PoolOptions,
}

impl PoolBuilder {
    /// Time source for window checks (defaults to [`SystemClock`]).
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Runtime options.
    pub fn options(mut self, options: PoolOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the pool.
    ///
    /// # Errors
    /// Returns error if the options are invalid (e.g. `event_buffer == 0`).
    pub fn build(self) -> Result<AllocationPool> {
        self.options.validate()?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        Ok(AllocationPool {
            pool_account: self.pool_account,
            ledger: self.ledger,
            clock,
            events: EventBus::new(self.options.event_buffer),
            options: self.options,
            state: Mutex::new(PoolState::new(self.owner)),
        })
    }
}

// ---------------------------------------------------------------------------
// AllocationPool
// ---------------------------------------------------------------------------

/// In-memory IDO allocation pool.
///
/// Share it behind an `Arc`; all methods take `&self`.
pub struct AllocationPool {
    /// Account the pool spends participants' allowances as
    pool_account: AccountId,
    ledger: Arc<dyn Ledger>,
    clock: Arc<dyn Clock>,
    options: PoolOptions,
    state: Mutex<PoolState>,
    events: EventBus,
}

impl std::fmt::Debug for AllocationPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("AllocationPool")
            .field("pool_account", &self.pool_account)
            .field("owner", &state.owner)
            .field("status", &state.status())
            .field("total_committed", &state.commitments.total())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl AllocationPool {
    /// Create a pool owned by `owner` with default options and the system
    /// clock. `pool_account` is the spender participants approve on the
    /// ledger.
    pub fn new(owner: AccountId, pool_account: AccountId, ledger: Arc<dyn Ledger>) -> Self {
        Self {
            pool_account,
            ledger,
            clock: Arc::new(SystemClock),
            options: PoolOptions::default(),
            state: Mutex::new(PoolState::new(owner)),
            events: EventBus::default(),
        }
    }

    /// Start building a pool with a custom clock or options.
    pub fn builder(
        owner: AccountId,
        pool_account: AccountId,
        ledger: Arc<dyn Ledger>,
    ) -> PoolBuilder {
        PoolBuilder {
            owner,
            pool_account,
            ledger,
            clock: None,
            options: PoolOptions::default(),
        }
    }

    /// Build a pool from loaded settings; a configuration in the settings is
    /// installed on behalf of `owner`.
    pub fn from_settings(
        owner: AccountId,
        pool_account: AccountId,
        ledger: Arc<dyn Ledger>,
        clock: Arc<dyn Clock>,
        settings: &PoolSettings,
    ) -> Result<Self> {
        let pool = Self::builder(owner, pool_account, ledger)
            .clock(clock)
            .options(settings.options.clone())
            .build()?;
        if let Some(config) = settings.config {
            pool.set_config(owner, config)?;
        }
        Ok(pool)
    }

    // -- owner operations ---------------------------------------------------

    /// Install or replace the pool configuration.
    ///
    /// A replacement whose cap is below the committed total is rejected.
    pub fn set_config(&self, caller: AccountId, config: PoolConfig) -> Result<()> {
        let mut state = self.state.lock();
        state.ensure_owner(caller)?;
        config.validate()?;
        state.ensure_cap_covers_commitments(config.max_pool_allocation)?;

        let replaced = state.config.replace(config).is_some();
        tracing::info!(
            sale_token = %config.sale_token,
            window_start = config.window.start,
            window_end = config.window.end,
            max_pool_allocation = %config.max_pool_allocation,
            beneficiary = %config.beneficiary,
            replaced,
            "pool configured"
        );
        self.events.emit(PoolEvent::Configured { config });
        Ok(())
    }

    /// Add accounts to the whitelist. Returns how many were newly added;
    /// existing members are left as they are.
    pub fn add_whitelist_address(&self, caller: AccountId, addresses: &[AccountId]) -> Result<usize> {
        let mut state = self.state.lock();
        state.ensure_owner(caller)?;

        let mut added = 0;
        for &account in addresses {
            if state.whitelist.insert(account) {
                added += 1;
                self.events.emit(PoolEvent::WhitelistAdded { account });
            }
        }
        tracing::info!(requested = addresses.len(), added, "whitelist extended");
        Ok(added)
    }

    /// Remove accounts from the whitelist. Returns how many were removed;
    /// absent accounts are ignored. Existing commitments are kept.
    pub fn remove_whitelist_address(
        &self,
        caller: AccountId,
        addresses: &[AccountId],
    ) -> Result<usize> {
        let mut state = self.state.lock();
        state.ensure_owner(caller)?;

        let mut removed = 0;
        for account in addresses {
            if state.whitelist.remove(account) {
                removed += 1;
                self.events
                    .emit(PoolEvent::WhitelistRemoved { account: *account });
            }
        }
        tracing::info!(requested = addresses.len(), removed, "whitelist reduced");
        Ok(removed)
    }

    /// Set per-user caps; `addresses[i]` gets `caps[i]`.
    ///
    /// Both slices must have the same length, and no cap may be below what
    /// its participant already committed; otherwise nothing changes.
    pub fn add_user_max_allocation(
        &self,
        caller: AccountId,
        addresses: &[AccountId],
        caps: &[Amount],
    ) -> Result<()> {
        let mut state = self.state.lock();
        state.ensure_owner(caller)?;
        if addresses.len() != caps.len() {
            tracing::debug!(
                addresses = addresses.len(),
                values = caps.len(),
                "allocation lists differ in length"
            );
            return Err(PoolError::LengthMismatch {
                addresses: addresses.len(),
                values: caps.len(),
            });
        }

        // all-or-nothing: validate every pair before writing any
        for (&account, &cap) in addresses.iter().zip(caps) {
            let committed = state.commitments.of(&account);
            if cap < committed {
                tracing::debug!(%account, %cap, %committed, "user cap below commitment");
                return Err(PoolError::UserCapBelowCommitted {
                    account,
                    cap,
                    committed,
                });
            }
        }

        for (&account, &cap) in addresses.iter().zip(caps) {
            state.caps.set(account, cap);
            self.events.emit(PoolEvent::UserAllocationSet { account, cap });
        }
        tracing::info!(count = addresses.len(), "user allocations set");
        Ok(())
    }

    /// Overwrite the pool cap. Takes effect for the next `join`.
    pub fn change_max_pool_allocation(&self, caller: AccountId, new_cap: Amount) -> Result<()> {
        let mut state = self.state.lock();
        state.ensure_owner(caller)?;
        state.ensure_cap_covers_commitments(new_cap)?;
        let config = state.config.as_mut().ok_or(PoolError::NotConfigured)?;

        let previous = std::mem::replace(&mut config.max_pool_allocation, new_cap);
        tracing::info!(%previous, current = %new_cap, "max pool allocation changed");
        self.events.emit(PoolEvent::MaxPoolAllocationChanged {
            previous,
            current: new_cap,
        });
        Ok(())
    }

    /// Hand ownership to `new_owner`.
    pub fn transfer_ownership(&self, caller: AccountId, new_owner: AccountId) -> Result<()> {
        let mut state = self.state.lock();
        state.ensure_owner(caller)?;
        if new_owner.is_zero() {
            return Err(PoolError::invalid_config(
                "new owner must not be the zero address",
            ));
        }

        let previous = std::mem::replace(&mut state.owner, new_owner);
        tracing::info!(%previous, current = %new_owner, "ownership transferred");
        self.events.emit(PoolEvent::OwnershipTransferred {
            previous,
            current: new_owner,
        });
        Ok(())
    }

    // -- participant operations ---------------------------------------------

    /// Commit `amount` of the sale token on behalf of `caller`.
    ///
    /// The tokens move from `caller` to the beneficiary through the ledger,
    /// spending the allowance `caller` granted to the pool account. Any
    /// failure, including a ledger refusal, leaves the pool unchanged.
    #[tracing::instrument(level = "debug", skip_all, fields(caller = %caller, amount = %amount))]
    pub fn join(&self, caller: AccountId, amount: Amount) -> Result<JoinReceipt> {
        let mut state = self.state.lock();
        match self.try_join(&mut state, caller, amount) {
            Ok(receipt) => {
                tracing::info!(
                    participant = %receipt.participant,
                    amount = %receipt.amount,
                    cumulative = %receipt.cumulative,
                    total_committed = %receipt.total_committed,
                    "joined"
                );
                self.events.emit(PoolEvent::Joined {
                    participant: receipt.participant,
                    amount: receipt.amount,
                    cumulative: receipt.cumulative,
                    total_committed: receipt.total_committed,
                });
                Ok(receipt)
            }
            Err(err) => {
                tracing::debug!(error = %err, kind = ?err.kind(), "join rejected");
                Err(err)
            }
        }
    }

    fn try_join(
        &self,
        state: &mut PoolState,
        caller: AccountId,
        amount: Amount,
    ) -> Result<JoinReceipt> {
        let config = state.config.ok_or(PoolError::NotConfigured)?;
        if !state.whitelist.contains(&caller) {
            return Err(PoolError::NotWhitelisted { account: caller });
        }
        if amount == 0 {
            return Err(PoolError::InvalidAmount);
        }
        if self.options.enforce_window {
            let now = self.clock.now();
            if !config.window.contains(now) {
                return Err(PoolError::WindowClosed {
                    now,
                    start: config.window.start,
                    end: config.window.end,
                });
            }
        }

        let reservation = state.commitments.reserve(
            caller,
            amount,
            state.caps.get(&caller),
            config.max_pool_allocation,
        )?;

        self.ledger.transfer_from(
            config.sale_token,
            self.pool_account,
            caller,
            config.beneficiary,
            amount,
        )?;
        state.commitments.commit(reservation);

        Ok(JoinReceipt {
            participant: reservation.participant,
            amount: reservation.amount,
            cumulative: reservation.cumulative,
            total_committed: reservation.total,
        })
    }

    // -- queries --------------------------------------------------------------

    /// Current owner.
    pub fn owner(&self) -> AccountId {
        self.state.lock().owner
    }

    /// Account participants approve as spender.
    pub fn pool_account(&self) -> AccountId {
        self.pool_account
    }

    /// Runtime options in effect.
    pub fn options(&self) -> &PoolOptions {
        &self.options
    }

    /// Installed configuration.
    pub fn config(&self) -> Option<PoolConfig> {
        self.state.lock().config
    }

    /// Lifecycle state.
    pub fn status(&self) -> PoolStatus {
        self.state.lock().status()
    }

    /// Whether `account` may join.
    pub fn is_whitelisted(&self, account: &AccountId) -> bool {
        self.state.lock().whitelist.contains(account)
    }

    /// Whitelisted accounts in ascending order.
    pub fn whitelist(&self) -> Vec<AccountId> {
        self.state.lock().whitelist.to_vec()
    }

    /// Per-user cap of `account`, if one was set.
    pub fn user_max_allocation(&self, account: &AccountId) -> Option<Amount> {
        self.state.lock().caps.get(account)
    }

    /// Cumulative commitment of `account`.
    pub fn commitment_of(&self, account: &AccountId) -> Amount {
        self.state.lock().commitments.of(account)
    }

    /// Pool-wide committed total.
    pub fn total_committed(&self) -> Amount {
        self.state.lock().commitments.total()
    }

    /// Capacity left under the pool cap; `None` while unconfigured.
    pub fn remaining_capacity(&self) -> Option<Amount> {
        self.state.lock().remaining_capacity()
    }

    /// Consistent view of the whole pool.
    pub fn snapshot(&self) -> PoolSnapshot {
        let state = self.state.lock();
        PoolSnapshot {
            status: state.status(),
            owner: state.owner,
            config: state.config,
            whitelisted: state.whitelist.len(),
            capped_users: state.caps.len(),
            participants: state.commitments.participants(),
            total_committed: state.commitments.total(),
            remaining_capacity: state.remaining_capacity(),
        }
    }

    /// Subscribe to events emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<PoolEvent> {
        self.events.subscribe()
    }
}
