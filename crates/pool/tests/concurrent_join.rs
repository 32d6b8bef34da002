//! Concurrent joins never push the pool past its cap.

mod common;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Barrier};
use std::time::Duration;

use common::Fixture;
use ido_core::{AccountId, tokens};
use ido_pool::{ErrorKind, Ledger, PoolError};
use tokio::task::JoinSet;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn two_joins_exceeding_cap_together_yield_one_success() {
    // Repeat to give the race a real chance to interleave.
    for _ in 0..20 {
        let fx = Fixture::configured(tokens(1_000));
        let barrier = Arc::new(Barrier::new(2));
        let mut set = JoinSet::new();

        for user in [fx.user1, fx.user2] {
            let pool = Arc::clone(&fx.pool);
            let barrier = Arc::clone(&barrier);
            set.spawn_blocking(move || {
                barrier.wait();
                pool.join(user, tokens(600))
            });
        }

        let mut ok = 0;
        let mut rejected = Vec::new();
        while let Some(result) = set.join_next().await {
            match result.expect("task should not panic") {
                Ok(_) => ok += 1,
                Err(err) => rejected.push(err),
            }
        }

        assert_eq!(ok, 1, "exactly one join must win");
        assert_eq!(rejected.len(), 1);
        assert!(matches!(rejected[0], PoolError::PoolCapExceeded { .. }));
        assert_eq!(fx.pool.total_committed(), tokens(600));
        assert_eq!(fx.balance(fx.owner), tokens(600));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn stress_50_participants_never_overshoot() {
    let fx = Fixture::configured(tokens(1_000));
    let participants: Vec<AccountId> = (1_000..1_050).map(AccountId::from_seed).collect();
    for &who in &participants {
        fx.ledger.mint(fx.token, who, tokens(100));
        fx.ledger
            .approve(fx.token, who, fx.pool_account, tokens(100))
            .unwrap();
    }
    fx.pool
        .add_whitelist_address(fx.owner, &participants)
        .unwrap();

    let accepted = Arc::new(AtomicU64::new(0));
    let mut set = JoinSet::new();
    for who in participants {
        let pool = Arc::clone(&fx.pool);
        let accepted = Arc::clone(&accepted);
        set.spawn_blocking(move || {
            // 5 joins of 7 tokens each, 1750 requested in total
            for _ in 0..5 {
                match pool.join(who, tokens(7)) {
                    Ok(_) => {
                        accepted.fetch_add(1, Ordering::SeqCst);
                    }
                    Err(err) => assert_eq!(err.kind(), ErrorKind::PoolCapExceeded),
                }
            }
        });
    }

    let deadline = tokio::time::Instant::now() + Duration::from_secs(30);
    while let Some(result) = tokio::time::timeout_at(deadline, set.join_next())
        .await
        .expect("joins should not deadlock (30s timeout)")
    {
        result.expect("task should not panic");
    }

    let accepted = u128::from(accepted.load(Ordering::SeqCst));
    let total = fx.pool.total_committed();
    assert!(total <= tokens(1_000), "committed {total} exceeds the cap");
    assert_eq!(total, accepted * tokens(7));
    // 142 joins of 7 fit under 1000, the 143rd would not
    assert_eq!(accepted, 142);
    assert_eq!(fx.balance(fx.owner), total);
}
