//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Shell                       Commands                                   │
//! │  ─────                       ────────                                   │
//! │                                                                         │
//! │  "add 42"                                                               │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │  Catalog error? ── CatalogError::Status(502) ──┐                │  │
//! │  │         │                                      │                │  │
//! │  │  Cart rule?  ───── CoreError::ProductNotFound ─┴─► ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Shell prints: "[NOT_FOUND] Product not found: 42"                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_catalog::CatalogError;
use storefront_core::CoreError;

/// Shown whenever the catalog could not be fetched.
pub const CATALOG_ERROR_NOTICE: &str = "Error loading products.";

/// Error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "EMPTY_CART",
///   "message": "Your cart is empty!"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or cart line not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Cart bound exceeded
    CartError,

    /// Checkout attempted with an empty cart
    EmptyCart,

    /// Catalog could not be loaded
    CatalogError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::LineNotFound(_) => ApiError::new(ErrorCode::NotFound, err.to_string()),
            CoreError::EmptyCartSubmission => {
                ApiError::new(ErrorCode::EmptyCart, err.to_string())
            }
            CoreError::CartTooLarge { .. } | CoreError::QuantityTooLarge { .. } => {
                ApiError::new(ErrorCode::CartError, err.to_string())
            }
            CoreError::DuplicateProduct(_) => {
                ApiError::new(ErrorCode::CatalogError, err.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl ApiError {
    /// The storefront notice for a catalog that could not be loaded.
    pub fn catalog_unavailable() -> Self {
        ApiError::new(ErrorCode::CatalogError, CATALOG_ERROR_NOTICE)
    }
}

/// Converts catalog errors to API errors.
///
/// The user only ever sees the storefront notice. Logging the cause is left
/// to the caller (`commands::load_catalog` logs it once).
impl From<CatalogError> for ApiError {
    fn from(_: CatalogError) -> Self {
        ApiError::catalog_unavailable()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = serde_json::to_value(self.code)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| format!("{:?}", self.code));
        write!(f, "[{}] {}", code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        let err: ApiError = CoreError::ProductNotFound("42".into()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: 42");

        let err: ApiError = CoreError::EmptyCartSubmission.into();
        assert_eq!(err.code, ErrorCode::EmptyCart);
        assert_eq!(err.message, "Your cart is empty!");

        let err: ApiError = CoreError::QuantityTooLarge { requested: 1000, max: 999 }.into();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_catalog_error_mapping() {
        let err: ApiError = CatalogError::Request("connection refused".into()).into();
        assert_eq!(err.code, ErrorCode::CatalogError);
        assert_eq!(err.message, CATALOG_ERROR_NOTICE);
    }

    #[test]
    fn test_display_uses_wire_code() {
        let err = ApiError::new(ErrorCode::EmptyCart, "Your cart is empty!");
        assert_eq!(err.to_string(), "[EMPTY_CART] Your cart is empty!");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&ApiError::not_found("Product", "7")).unwrap();
        assert_eq!(json, r#"{"code":"NOT_FOUND","message":"Product not found: 7"}"#);
    }
}
