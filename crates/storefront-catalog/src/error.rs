//! # Catalog Error Types
//!
//! ## Error Flow
//! ```text
//! reqwest / serde_json / io error
//!       │
//!       ▼
//! CatalogError (this module) ← Adds context and categorization
//!       │
//!       ▼
//! ApiError (terminal app) → "Error loading products."
//! ```
//!
//! A catalog failure never touches cart state.

use storefront_core::CoreError;
use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog fetch and decode failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request could not be sent or the connection failed.
    #[error("Catalog request failed: {0}")]
    Request(String),

    /// The product service answered with a non-success status.
    #[error("Catalog service returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// The payload is not a JSON array of records.
    #[error("Catalog payload could not be decoded: {0}")]
    Decode(String),

    /// Reading a local catalog file failed.
    #[error("Catalog file error: {0}")]
    Io(String),

    /// The configured catalog URL is not usable.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// The decoded catalog violates a domain rule.
    #[error("Invalid catalog: {0}")]
    Invalid(#[from] CoreError),
}

impl CatalogError {
    /// Whether retrying the same request could succeed.
    ///
    /// Transport failures and 5xx responses are transient; everything else
    /// will fail the same way again.
    pub fn is_transient(&self) -> bool {
        match self {
            CatalogError::Request(_) => true,
            CatalogError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else {
            CatalogError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Io(err.to_string())
    }
}

impl From<url::ParseError> for CatalogError {
    fn from(err: url::ParseError) -> Self {
        CatalogError::InvalidUrl(err.to_string())
    }
}
