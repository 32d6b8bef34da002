//! Pool configuration types

use ido_core::{AccountId, Amount, TokenId};
use serde::{Deserialize, Serialize};

use crate::error::{PoolError, Result};

/// Half-open sale window `[start, end)` in unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleWindow {
    /// First second at which joining is allowed
    pub start: u64,
    /// First second at which joining is no longer allowed
    pub end: u64,
}

impl SaleWindow {
    /// Create a validated window.
    pub fn new(start: u64, end: u64) -> Result<Self> {
        let window = Self { start, end };
        window.validate()?;
        Ok(window)
    }

    /// `start` must be strictly before `end`.
    pub fn validate(&self) -> Result<()> {
        if self.start >= self.end {
            return Err(PoolError::invalid_config(format!(
                "window start ({}) must be before window end ({})",
                self.start, self.end
            )));
        }
        Ok(())
    }

    /// Whether `now` falls inside the window.
    pub fn contains(&self, now: u64) -> bool {
        self.start <= now && now < self.end
    }

    /// Window length in seconds.
    pub fn duration(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }
}

/// Sale parameters installed by the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Token collected from participants
    pub sale_token: TokenId,
    /// When joining is allowed
    pub window: SaleWindow,
    /// Pool-wide cap on cumulative commitments
    #[serde(with = "ido_core::amount::as_string")]
    pub max_pool_allocation: Amount,
    /// Receives the collected tokens
    pub beneficiary: AccountId,
}

impl PoolConfig {
    /// Assemble a configuration from its parts (not validated).
    pub fn new(
        sale_token: TokenId,
        window_start: u64,
        window_end: u64,
        max_pool_allocation: Amount,
        beneficiary: AccountId,
    ) -> Self {
        Self {
            sale_token,
            window: SaleWindow {
                start: window_start,
                end: window_end,
            },
            max_pool_allocation,
            beneficiary,
        }
    }

    /// Validate the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        self.window.validate()?;
        if self.sale_token.is_zero() {
            return Err(PoolError::invalid_config(
                "sale token must not be the zero address",
            ));
        }
        if self.beneficiary.is_zero() {
            return Err(PoolError::invalid_config(
                "beneficiary must not be the zero address",
            ));
        }
        Ok(())
    }
}
