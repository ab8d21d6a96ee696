//! Framework error type.
//!
//! Sub-crates define their own error enums (`ScheduleError`, `PoolError`,
//! `SimError`) and wrap `DsError` as one variant where configuration or time
//! validation can fail underneath them.

use thiserror::Error;

/// The base error type for `ds-core`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DsError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid simulation time {0}: must be finite and non-negative")]
    InvalidTime(f64),
}

/// Shorthand result type for all `ds-*` crates.
pub type DsResult<T> = Result<T, DsError>;
