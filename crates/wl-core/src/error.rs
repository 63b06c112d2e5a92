//! Shared error type.
//!
//! Sub-crates define their own error enums and convert `WlError` at their
//! seams, so `?` works across crates.

use thiserror::Error;

/// Errors raised by `wl-core` primitives.
#[derive(Debug, Error)]
pub enum WlError {
    /// A distribution could not be built or sampled from its parameters.
    #[error("sampling error: {0}")]
    Sampling(String),
}

/// Shorthand result type for `wl-core` operations.
pub type WlResult<T> = Result<T, WlError>;
