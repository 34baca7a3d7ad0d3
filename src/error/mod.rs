//! Error types for callguard.
//!
//! Validation and callback dispatch never fail; their problems are reported
//! as [`Issue`](crate::tools::Issue)s or logged. `GuardError` only covers
//! loading configuration.

use thiserror::Error;

/// Error returned by a caller-supplied runtime callback.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Primary error type for callguard operations.
#[derive(Error, Debug)]
pub enum GuardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

impl GuardError {
    /// Create an invalid-value error for a config key.
    pub fn invalid_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, GuardError>;
