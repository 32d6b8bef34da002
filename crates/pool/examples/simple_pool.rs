//! Walk through a sale: configure, whitelist, cap, join, and watch events.
//!
//! Run with `IDO_LOG=debug cargo run -p ido-pool --example simple_pool` to
//! see rejections as well.

use std::sync::Arc;

use anyhow::Result;
use ido_core::{AccountId, TokenId, tokens};
use ido_log::info;
use ido_pool::{AllocationPool, InMemoryLedger, Ledger, ManualClock, PoolConfig};

const DAY: u64 = 86_400;

#[tokio::main]
async fn main() -> Result<()> {
    ido_log::init()?;

    let owner = AccountId::from_seed(1);
    let user1 = AccountId::from_seed(2);
    let user2 = AccountId::from_seed(3);
    let pool_account = AccountId::from_seed(0x1d0);
    let busd: TokenId = "0x000000000000000000000000000000000000b05d".parse()?;

    let ledger = Arc::new(InMemoryLedger::new());
    for user in [user1, user2] {
        ledger.mint(busd, user, tokens(2_000));
        ledger.approve(busd, user, pool_account, tokens(100_000))?;
    }

    let start = 1_700_000_000;
    let clock = Arc::new(ManualClock::new(start));
    let pool = Arc::new(
        AllocationPool::builder(owner, pool_account, ledger.clone())
            .clock(clock.clone())
            .build()?,
    );

    let mut events = pool.subscribe();
    let watcher = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            info!(?event, "pool event");
        }
    });

    pool.set_config(
        owner,
        PoolConfig::new(busd, start, start + 7 * DAY, tokens(1_000), owner),
    )?;
    pool.add_whitelist_address(owner, &[user1, user2])?;
    pool.add_user_max_allocation(owner, &[user1, user2], &[tokens(200), tokens(400)])?;

    clock.advance(DAY);
    pool.join(user1, tokens(100))?;
    pool.join(user2, tokens(100))?;

    if let Err(err) = pool.join(user1, tokens(300)) {
        info!(%err, "user1 over their allocation");
    }

    pool.change_max_pool_allocation(owner, tokens(250))?;
    if let Err(err) = pool.join(user2, tokens(100)) {
        info!(%err, "pool cap reached");
    }

    let snapshot = pool.snapshot();
    info!(
        total = %snapshot.total_committed,
        participants = snapshot.participants,
        beneficiary_balance = %ledger.balance_of(busd, owner)?,
        "sale state"
    );

    drop(pool);
    watcher.await?;
    Ok(())
}
