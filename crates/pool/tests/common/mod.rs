//! Shared fixture: a BUSD-style sale token, an owner, two participants and
//! an outsider, each participant funded with 2000 tokens and a generous
//! allowance for the pool account.

#![allow(dead_code)]

use std::sync::Arc;

use ido_core::{AccountId, Amount, TokenId, tokens};
use ido_pool::{AllocationPool, InMemoryLedger, Ledger, ManualClock, PoolConfig, PoolOptions};

pub const DAY: u64 = 86_400;
pub const START: u64 = 1_700_000_000;
pub const END: u64 = START + 7 * DAY;

pub struct Fixture {
    pub pool: Arc<AllocationPool>,
    pub ledger: Arc<InMemoryLedger>,
    pub clock: Arc<ManualClock>,
    pub owner: AccountId,
    pub user1: AccountId,
    pub user2: AccountId,
    pub outsider: AccountId,
    pub pool_account: AccountId,
    pub token: TokenId,
}

impl Fixture {
    /// Unconfigured pool with the clock one hour into the sale window.
    pub fn new() -> Self {
        Self::with_options(PoolOptions::default())
    }

    pub fn with_options(options: PoolOptions) -> Self {
        ido_log::init_test();
        let owner = AccountId::from_seed(1);
        let user1 = AccountId::from_seed(2);
        let user2 = AccountId::from_seed(3);
        let outsider = AccountId::from_seed(4);
        let pool_account = AccountId::from_seed(0x1d0);
        let token = TokenId::from_seed(0xb05d);

        let ledger = Arc::new(InMemoryLedger::new());
        for user in [user1, user2, outsider] {
            ledger.mint(token, user, tokens(2_000));
            ledger
                .approve(token, user, pool_account, tokens(100_000))
                .expect("approve should succeed");
        }

        let clock = Arc::new(ManualClock::new(START + 3_600));
        let pool = AllocationPool::builder(owner, pool_account, ledger.clone())
            .clock(clock.clone())
            .options(options)
            .build()
            .expect("pool should build");

        Self {
            pool: Arc::new(pool),
            ledger,
            clock,
            owner,
            user1,
            user2,
            outsider,
            pool_account,
            token,
        }
    }

    /// Pool configured with `cap`, beneficiary = owner, and both users
    /// whitelisted.
    pub fn configured(cap: Amount) -> Self {
        let fx = Self::new();
        fx.configure(cap);
        fx.pool
            .add_whitelist_address(fx.owner, &[fx.user1, fx.user2])
            .expect("whitelisting should succeed");
        fx
    }

    pub fn config(&self, cap: Amount) -> PoolConfig {
        PoolConfig::new(self.token, START, END, cap, self.owner)
    }

    pub fn configure(&self, cap: Amount) {
        self.pool
            .set_config(self.owner, self.config(cap))
            .expect("owner should configure");
    }

    pub fn balance(&self, account: AccountId) -> Amount {
        self.ledger
            .balance_of(self.token, account)
            .expect("token is registered")
    }
}
