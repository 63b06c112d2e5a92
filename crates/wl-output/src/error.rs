//! Error types for wl-output.

use thiserror::Error;

/// Errors that can occur when writing or combining simulation output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Run tables that cannot be merged (missing, mismatched headers,
    /// unparsable advantage probability).
    #[error("cannot combine run tables: {0}")]
    Combine(String),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
