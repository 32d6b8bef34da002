//! Error type for logger setup

use thiserror::Error;

/// Result type for logger operations
pub type LogResult<T> = std::result::Result<T, LogError>;

/// Error type for logger operations
#[derive(Debug, Error)]
pub enum LogError {
    /// Filter directive could not be parsed
    #[error("Invalid filter '{filter}': {reason}")]
    Filter {
        /// The offending directive
        filter: String,
        /// Parser message
        reason: String,
    },

    /// The global subscriber could not be installed
    #[error("Failed to install subscriber: {0}")]
    Init(String),
}
