//! Core error type.
//!
//! Configuration problems are caught here, before a scheduler exists.  The
//! engine wraps `CoreError` as one variant of its own error enum.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Shorthand result type for `cs-core`.
pub type CoreResult<T> = Result<T, CoreError>;
