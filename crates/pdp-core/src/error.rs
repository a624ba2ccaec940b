//! Core error type.
//!
//! Sub-crates define their own error enums and report a `CoreError` through
//! their `Config` variant.

use thiserror::Error;

use crate::TimeUnit;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("tick length must be positive, got 0 {0}")]
    InvalidTickLength(TimeUnit),

    #[error("tick length {length} {unit} overflows the internal millisecond clock")]
    TickLengthOverflow { length: u64, unit: TimeUnit },
}

/// Shorthand result type for `pdp-core`.
pub type CoreResult<T> = Result<T, CoreError>;
