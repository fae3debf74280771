//! Engine error types.

use thiserror::Error;

/// Errors raised by the object-store engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A uniqueness constraint was violated (duplicate primary key or
    /// duplicate value in a unique index).
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// A value could not yield a valid key.
    #[error("Data error: {0}")]
    Data(String),

    /// A database, store, or index does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An operation was attempted in the wrong state.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The transaction has already committed or aborted.
    #[error("Transaction inactive")]
    TransactionInactive,

    /// A write was attempted through a read-only transaction.
    #[error("Read-only transaction")]
    ReadOnly,

    /// A version conflict during open or migration.
    #[error("Version error: {0}")]
    Version(String),

    /// The transaction was aborted by the caller.
    #[error("Transaction aborted: {0}")]
    Aborted(String),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
