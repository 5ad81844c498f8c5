//! Error types for the catalog client.

use cadence_core::CadenceError;
use thiserror::Error;

/// Errors that can occur when talking to the music catalog.
#[derive(Error, Debug)]
pub enum CatalogClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Catalog is offline, unreachable or too slow
    #[error("Catalog unreachable: {0}")]
    Unreachable(String),

    /// Catalog returned a non-success status
    #[error("Catalog error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// Invalid catalog base URL
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// Response did not have the expected shape
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Result type for catalog client operations.
pub type Result<T> = std::result::Result<T, CatalogClientError>;

impl From<CatalogClientError> for CadenceError {
    fn from(err: CatalogClientError) -> Self {
        CadenceError::Catalog(err.to_string())
    }
}
