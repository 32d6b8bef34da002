//! Pool settings loaded from TOML with environment overrides.
//!
//! ```toml
//! [options]
//! event_buffer = 256
//! enforce_window = true
//!
//! [config]
//! sale_token = "0x00000000000000000000000000000000000000aa"
//! beneficiary = "0x0000000000000000000000000000000000000001"
//! max_pool_allocation = "1000000000000000000000"
//!
//! [config.window]
//! start = 1700000000
//! end = 1700604800
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::PoolConfig;
use crate::error::{PoolError, Result};

/// Overrides `PoolOptions::event_buffer`.
pub const EVENT_BUFFER_ENV: &str = "IDO_POOL_EVENT_BUFFER";
/// Overrides `PoolOptions::enforce_window`.
pub const ENFORCE_WINDOW_ENV: &str = "IDO_POOL_ENFORCE_WINDOW";

/// Runtime knobs of a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolOptions {
    /// Capacity of the event broadcast channel
    pub event_buffer: usize,
    /// Reject joins outside the sale window
    pub enforce_window: bool,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            event_buffer: 1024,
            enforce_window: true,
        }
    }
}

impl PoolOptions {
    /// `event_buffer` must be non-zero.
    pub fn validate(&self) -> Result<()> {
        if self.event_buffer == 0 {
            return Err(PoolError::invalid_config(
                "event_buffer must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Everything needed to stand up a pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSettings {
    /// Runtime options
    pub options: PoolOptions,
    /// Configuration installed at start-up, if any
    pub config: Option<PoolConfig>,
}

impl PoolSettings {
    /// Parse and validate settings from a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let settings: Self = toml::from_str(input)
            .map_err(|e| PoolError::settings(format!("TOML parse error: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a TOML settings file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| PoolError::settings(format!("cannot read {}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "loading pool settings");
        Self::from_toml_str(&content)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides read through `lookup`.
    pub fn apply_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(raw) = lookup(EVENT_BUFFER_ENV) {
            self.options.event_buffer = raw.trim().parse().map_err(|_| {
                PoolError::settings(format!("{EVENT_BUFFER_ENV} is not a number: {raw:?}"))
            })?;
        }
        if let Some(raw) = lookup(ENFORCE_WINDOW_ENV) {
            self.options.enforce_window = parse_bool(&raw).ok_or_else(|| {
                PoolError::settings(format!("{ENFORCE_WINDOW_ENV} is not a boolean: {raw:?}"))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate options and the optional configuration.
    pub fn validate(&self) -> Result<()> {
        self.options.validate()?;
        if let Some(config) = &self.config {
            config.validate()?;
        }
        Ok(())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") || raw == "1" {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") || raw == "0" {
        Some(false)
    } else {
        None
    }
}
