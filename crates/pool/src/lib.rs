//! # IDO Allocation Pool
//!
//! In-memory bookkeeping for a token sale: the owner configures the sale,
//! maintains a whitelist and per-user caps; whitelisted participants join
//! with an amount that is pulled from them to the beneficiary through a
//! [`Ledger`].
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use ido_core::{AccountId, TokenId, tokens};
//! use ido_pool::{AllocationPool, InMemoryLedger, Ledger, ManualClock, PoolConfig};
//!
//! let owner = AccountId::from_seed(1);
//! let alice = AccountId::from_seed(2);
//! let spender = AccountId::from_seed(100);
//! let busd = TokenId::from_seed(0xb05d);
//!
//! let ledger = Arc::new(InMemoryLedger::new());
//! ledger.mint(busd, alice, tokens(500));
//! ledger.approve(busd, alice, spender, tokens(500)).unwrap();
//!
//! let pool = AllocationPool::builder(owner, spender, ledger.clone())
//!     .clock(Arc::new(ManualClock::new(150)))
//!     .build()
//!     .unwrap();
//! pool.set_config(owner, PoolConfig::new(busd, 100, 200, tokens(1_000), owner))
//!     .unwrap();
//! pool.add_whitelist_address(owner, &[alice]).unwrap();
//!
//! let receipt = pool.join(alice, tokens(100)).unwrap();
//! assert_eq!(receipt.total_committed, tokens(100));
//! assert_eq!(ledger.balance_of(busd, owner).unwrap(), tokens(100));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod allocation;
mod whitelist;

pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod ledger;
pub mod pool;
pub mod settings;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{PoolConfig, SaleWindow};
pub use error::{ErrorKind, PoolError, Result};
pub use events::{EventBus, PoolEvent};
pub use ledger::{InMemoryLedger, Ledger, LedgerError};
pub use pool::{AllocationPool, JoinReceipt, PoolBuilder, PoolSnapshot, PoolStatus};
pub use settings::{PoolOptions, PoolSettings};
