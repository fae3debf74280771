//! Error types for the catalog demo.

use thiserror::Error;

/// Errors surfaced by catalog operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Storage error: {0}")]
    Storage(#[from] timber_idb::Error),

    #[error("Record encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
