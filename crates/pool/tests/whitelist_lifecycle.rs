//! Whitelist and per-user allocation management.

mod common;

use common::Fixture;
use ido_core::tokens;
use ido_pool::{ErrorKind, PoolError};
use pretty_assertions::assert_eq;

#[test]
fn adding_twice_is_idempotent() {
    let fx = Fixture::new();

    assert_eq!(fx.pool.add_whitelist_address(fx.owner, &[fx.user1]).unwrap(), 1);
    assert_eq!(
        fx.pool
            .add_whitelist_address(fx.owner, &[fx.user1, fx.user1])
            .unwrap(),
        0
    );
    assert_eq!(fx.pool.whitelist(), vec![fx.user1]);
}

#[test]
fn add_remove_add_ends_whitelisted() {
    let fx = Fixture::new();

    fx.pool.add_whitelist_address(fx.owner, &[fx.user1]).unwrap();
    assert_eq!(
        fx.pool
            .remove_whitelist_address(fx.owner, &[fx.user1])
            .unwrap(),
        1
    );
    assert!(!fx.pool.is_whitelisted(&fx.user1));
    fx.pool.add_whitelist_address(fx.owner, &[fx.user1]).unwrap();

    assert!(fx.pool.is_whitelisted(&fx.user1));
}

#[test]
fn removing_absent_account_is_a_noop() {
    let fx = Fixture::configured(tokens(1_000));
    let removed = fx
        .pool
        .remove_whitelist_address(fx.owner, &[fx.outsider])
        .unwrap();
    assert_eq!(removed, 0);
    assert_eq!(fx.pool.whitelist().len(), 2);
}

#[test]
fn whitelist_is_listed_in_order() {
    let fx = Fixture::new();
    fx.pool
        .add_whitelist_address(fx.owner, &[fx.user2, fx.outsider, fx.user1])
        .unwrap();
    assert_eq!(fx.pool.whitelist(), vec![fx.user1, fx.user2, fx.outsider]);
}

#[test]
fn removal_blocks_join_and_readding_restores_it() {
    let fx = Fixture::configured(tokens(1_000));
    fx.pool.join(fx.user1, tokens(100)).unwrap();

    fx.pool
        .remove_whitelist_address(fx.owner, &[fx.user1])
        .unwrap();
    let err = fx.pool.join(fx.user1, tokens(10)).unwrap_err();
    assert_eq!(err, PoolError::NotWhitelisted { account: fx.user1 });
    assert_eq!(err.to_string(), "You are not whitelisted");
    // commitments survive removal
    assert_eq!(fx.pool.commitment_of(&fx.user1), tokens(100));

    fx.pool.add_whitelist_address(fx.owner, &[fx.user1]).unwrap();
    let receipt = fx.pool.join(fx.user1, tokens(10)).unwrap();
    assert_eq!(receipt.cumulative, tokens(110));
}

#[test]
fn allocation_length_mismatch_keeps_previous_caps() {
    let fx = Fixture::new();
    fx.pool
        .add_user_max_allocation(fx.owner, &[fx.user1, fx.user2], &[tokens(200), tokens(400)])
        .unwrap();

    let err = fx
        .pool
        .add_user_max_allocation(fx.owner, &[fx.user1, fx.user2], &[tokens(100)])
        .unwrap_err();

    assert_eq!(
        err,
        PoolError::LengthMismatch {
            addresses: 2,
            values: 1
        }
    );
    assert_eq!(err.kind(), ErrorKind::LengthMismatch);
    assert_eq!(
        err.to_string(),
        "Length of addresses and allocation values are different"
    );
    assert_eq!(fx.pool.user_max_allocation(&fx.user1), Some(tokens(200)));
    assert_eq!(fx.pool.user_max_allocation(&fx.user2), Some(tokens(400)));
}

#[test]
fn allocations_overwrite_and_accept_empty_lists() {
    let fx = Fixture::new();
    fx.pool
        .add_user_max_allocation(fx.owner, &[fx.user1], &[tokens(200)])
        .unwrap();
    fx.pool
        .add_user_max_allocation(fx.owner, &[fx.user1], &[tokens(50)])
        .unwrap();
    fx.pool.add_user_max_allocation(fx.owner, &[], &[]).unwrap();

    assert_eq!(fx.pool.user_max_allocation(&fx.user1), Some(tokens(50)));
    assert_eq!(fx.pool.snapshot().capped_users, 1);
}

#[test]
fn whitelist_can_be_managed_before_configuration() {
    let fx = Fixture::new();
    fx.pool.add_whitelist_address(fx.owner, &[fx.user1]).unwrap();

    let err = fx.pool.join(fx.user1, tokens(1)).unwrap_err();
    assert_eq!(err, PoolError::NotConfigured);

    fx.configure(tokens(1_000));
    fx.pool.join(fx.user1, tokens(1)).unwrap();
}
