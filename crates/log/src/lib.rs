//! # IDO Log
//!
//! Thin `tracing-subscriber` setup shared by the pool crates, their
//! examples and their tests.
//!
//! ```rust,no_run
//! fn main() -> ido_log::LogResult<()> {
//!     // IDO_LOG / RUST_LOG and IDO_LOG_FORMAT are honoured
//!     ido_log::init()?;
//!
//!     ido_log::info!(pool = "busd", "pool ready");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod builder;
mod config;
mod error;

pub use builder::LoggerBuilder;
pub use config::{Config, DisplayConfig, FORMAT_ENV, Format, LOG_ENV, Writer};
pub use error::{LogError, LogResult};

// Re-export tracing macros
pub use tracing::{debug, error, info, instrument, span, trace, warn};

/// Initialize logging from the environment.
pub fn init() -> LogResult<()> {
    LoggerBuilder::from_config(Config::from_env()).build()
}

/// Initialize logging with an explicit configuration.
pub fn init_with(config: Config) -> LogResult<()> {
    LoggerBuilder::from_config(config).build()
}

/// Initialize test logging once per process; later calls are no-ops.
pub fn init_test() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        // another harness may already own the global subscriber
        let _ = init_with(Config::test());
    });
}
