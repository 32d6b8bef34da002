//! # IDO Core
//!
//! Core types shared by the allocation pool crates.
//!
//! ## Key Components
//!
//! - **Identifiers**: [`AccountId`] and [`TokenId`], 20-byte addresses with
//!   `0x`-prefixed hex formatting
//! - **Amounts**: [`Amount`] in the token's smallest unit, plus helpers for
//!   whole-token conversion and string-based serde
//!
//! ## Usage
//!
//! ```rust
//! use ido_core::{AccountId, TokenId, tokens};
//!
//! let owner = AccountId::from_seed(1);
//! let busd: TokenId = "0x00000000000000000000000000000000000000aa".parse().unwrap();
//!
//! assert_eq!(tokens(1), 1_000_000_000_000_000_000);
//! assert!(!owner.is_zero());
//! assert!(!busd.is_zero());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod amount;
pub mod id;

pub use amount::{Amount, TOKEN_DECIMALS, TOKEN_UNIT, tokens};
pub use id::{ADDRESS_LEN, AccountId, IdParseError, TokenId};

/// Common prelude for crates built on top of `ido-core`
pub mod prelude {
    pub use super::{AccountId, Amount, IdParseError, TokenId, tokens};
}
