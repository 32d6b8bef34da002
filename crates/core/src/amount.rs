//! Token amounts.
//!
//! Amounts are plain `u128` values in the token's smallest unit. TOML and
//! JSON cannot carry a full `u128` as a number, so [`as_string`] provides a
//! serde adapter that writes decimal strings and reads either form.

/// An amount in the token's smallest unit.
pub type Amount = u128;

/// Decimals of the sale token.
pub const TOKEN_DECIMALS: u32 = 18;

/// One whole token in smallest units.
pub const TOKEN_UNIT: Amount = 10u128.pow(TOKEN_DECIMALS);

/// Convert whole tokens into smallest units.
pub const fn tokens(whole: u64) -> Amount {
    whole as Amount * TOKEN_UNIT
}

/// Serde adapter: serialize an [`Amount`] as a decimal string, deserialize
/// from a decimal string or an integer.
///
/// ```rust
/// #[derive(serde::Serialize, serde::Deserialize)]
/// struct Cap {
///     #[serde(with = "ido_core::amount::as_string")]
///     value: ido_core::Amount,
/// }
/// ```
pub mod as_string {
    use std::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    use super::Amount;

    /// Serialize as a decimal string.
    pub fn serialize<S: Serializer>(value: &Amount, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    /// Deserialize from a decimal string or a non-negative integer.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Amount, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }

    struct AmountVisitor;

    impl Visitor<'_> for AmountVisitor {
        type Value = Amount;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative integer or a decimal string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
            Ok(Amount::from(v))
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<Amount, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
            Amount::try_from(v).map_err(|_| E::custom("amount must not be negative"))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
            v.trim()
                .replace('_', "")
                .parse::<Amount>()
                .map_err(|e| E::custom(format!("invalid amount '{v}': {e}")))
        }
    }
}
