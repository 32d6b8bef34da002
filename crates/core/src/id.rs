//! Address-style identifiers for pool participants and tokens.
//!
//! Each identifier is a distinct newtype over a 20-byte array, so an
//! [`AccountId`] can never be passed where a [`TokenId`] is expected.
//!
//! All ID types are `Copy` (20 bytes, stack-allocated) and support:
//! - `from_bytes` / `as_bytes` for raw access
//! - `from_seed(u64)` for deterministic fixtures
//! - `parse(&str)` for `0x`-prefixed hex parsing
//! - serde support (serializes as the hex string)
//! - `Display`, `FromStr`, `Eq`, `Ord`, `Hash`

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Length of an address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Error returned when an identifier string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IdParseError {
    /// The string does not start with `0x`.
    #[error("identifier must start with 0x")]
    MissingPrefix,

    /// The hex body has the wrong number of characters.
    #[error("identifier must have {expected} hex characters, got {actual}")]
    InvalidLength {
        /// Expected number of hex characters
        expected: usize,
        /// Actual number of hex characters
        actual: usize,
    },

    /// The hex body contains a non-hex character.
    #[error("invalid hex in identifier: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

macro_rules! define_address {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name([u8; ADDRESS_LEN]);

        impl $name {
            /// The all-zero address.
            pub const ZERO: Self = Self([0; ADDRESS_LEN]);

            /// Wrap raw address bytes.
            pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
                Self(bytes)
            }

            /// Raw address bytes.
            pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
                &self.0
            }

            /// Whether this is the all-zero address.
            pub fn is_zero(&self) -> bool {
                self.0 == [0; ADDRESS_LEN]
            }

            /// Deterministic address whose last eight bytes hold `seed`
            /// (big-endian).
            pub fn from_seed(seed: u64) -> Self {
                let mut bytes = [0u8; ADDRESS_LEN];
                bytes[ADDRESS_LEN - 8..].copy_from_slice(&seed.to_be_bytes());
                Self(bytes)
            }

            /// Parse a `0x`-prefixed hex string.
            pub fn parse(s: &str) -> Result<Self, IdParseError> {
                s.parse()
            }
        }

        impl From<[u8; ADDRESS_LEN]> for $name {
            fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
                Self(bytes)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name))
                    .field(&format_args!("{self}"))
                    .finish()
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let body = s
                    .strip_prefix("0x")
                    .or_else(|| s.strip_prefix("0X"))
                    .ok_or(IdParseError::MissingPrefix)?;
                if body.len() != ADDRESS_LEN * 2 {
                    return Err(IdParseError::InvalidLength {
                        expected: ADDRESS_LEN * 2,
                        actual: body.len(),
                    });
                }
                let mut bytes = [0u8; ADDRESS_LEN];
                hex::decode_to_slice(body, &mut bytes)?;
                Ok(Self(bytes))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

define_address!(
    /// Identity of an actor: the pool owner, a participant, a beneficiary or
    /// the pool's own spending account on the ledger.
    AccountId
);

define_address!(
    /// Identity of a token contract on the ledger.
    TokenId
);
