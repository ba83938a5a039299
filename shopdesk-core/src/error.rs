//! Core error types for `ShopDesk`.

use thiserror::Error;

/// Core error type for `ShopDesk` operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A date supplied by a caller could not be parsed.
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
}
