// Join throughput benchmarks.
//
// Measures the cost of a join (checks, in-memory ledger transfer and commit)
// with an effectively unlimited cap, alone and under thread contention.

use std::hint::black_box;
use std::sync::Arc;
use std::thread;

use criterion::{Criterion, criterion_group, criterion_main};
use ido_core::{AccountId, Amount, TokenId};
use ido_pool::{AllocationPool, InMemoryLedger, Ledger, ManualClock, PoolConfig};

const PARTICIPANTS: u64 = 8;

fn participant(i: u64) -> AccountId {
    AccountId::from_seed(1_000 + i)
}

fn bench_pool(whitelist_size: u64) -> Arc<AllocationPool> {
    let owner = AccountId::from_seed(1);
    let spender = AccountId::from_seed(2);
    let token = TokenId::from_seed(0xb05d);

    let ledger = Arc::new(InMemoryLedger::new());
    for i in 0..PARTICIPANTS {
        ledger.mint(token, participant(i), Amount::MAX / 16);
        ledger
            .approve(token, participant(i), spender, Amount::MAX)
            .expect("token is registered");
    }

    let pool = AllocationPool::builder(owner, spender, ledger)
        .clock(Arc::new(ManualClock::new(10)))
        .build()
        .expect("default options are valid");
    pool.set_config(owner, PoolConfig::new(token, 0, u64::MAX, Amount::MAX, owner))
        .expect("owner configures");

    let members: Vec<AccountId> = (0..whitelist_size.max(PARTICIPANTS)).map(participant).collect();
    pool.add_whitelist_address(owner, &members)
        .expect("owner whitelists");
    Arc::new(pool)
}

fn single_thread_join(c: &mut Criterion) {
    let pool = bench_pool(PARTICIPANTS);
    let who = participant(0);

    c.bench_function("single_thread_join", |b| {
        b.iter(|| black_box(pool.join(who, black_box(1)).expect("join fits")));
    });
}

fn large_whitelist_join(c: &mut Criterion) {
    let pool = bench_pool(10_000);
    let who = participant(0);

    c.bench_function("join_with_10k_whitelist", |b| {
        b.iter(|| black_box(pool.join(who, black_box(1)).expect("join fits")));
    });
}

fn contended_join(c: &mut Criterion) {
    let pool = bench_pool(PARTICIPANTS);

    c.bench_function("contended_join_8_threads_x_64", |b| {
        b.iter(|| {
            thread::scope(|s| {
                for i in 0..PARTICIPANTS {
                    let pool = &pool;
                    s.spawn(move || {
                        for _ in 0..64 {
                            black_box(pool.join(participant(i), 1).expect("join fits"));
                        }
                    });
                }
            });
        });
    });
}

criterion_group!(
    benches,
    single_thread_join,
    large_whitelist_join,
    contended_join,
);
criterion_main!(benches);
