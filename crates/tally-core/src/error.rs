//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── ValidationError  - Request body shape failures (400 / 422)        │
//! │  └── CoreError        - Domain failures (404) + wrapped validation     │
//! │                                                                         │
//! │  tally-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  tally-sales errors                                                    │
//! │  └── ServiceError     - { code, message } value handed to the caller   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → HTTP response      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Message Format
//! Field names are quoted in messages (`"quantity" is required`). Clients
//! match on these strings, so they are part of the public contract.

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Status Codes
// =============================================================================

/// Status code for malformed request bodies.
pub const STATUS_BAD_REQUEST: u16 = 400;

/// Status code for a reference to a product that does not exist.
pub const STATUS_NOT_FOUND: u16 = 404;

/// Status code for well-formed values outside the accepted range.
pub const STATUS_UNPROCESSABLE: u16 = 422;

// =============================================================================
// Validation Error
// =============================================================================

/// Request body validation errors.
///
/// Raised while checking the shape of a sale request, before any product
/// lookup or store write happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent.
    #[error("\"{field}\" is required")]
    Required { field: String },

    /// Field is present but not a JSON number.
    #[error("\"{field}\" must be a number")]
    MustBeNumber { field: String },

    /// Field is a number with a fractional part.
    #[error("\"{field}\" must be an integer")]
    MustBeInteger { field: String },

    /// Numeric value is below the accepted minimum.
    #[error("\"{field}\" must be greater than or equal to {min}")]
    TooSmall { field: String, min: i64 },

    /// Body is not a JSON array.
    #[error("\"{field}\" must be an array")]
    MustBeArray { field: String },

    /// Array has fewer elements than required.
    #[error("\"{field}\" must contain at least {min} items")]
    TooFewItems { field: String, min: usize },

    /// Array element is not a JSON object.
    #[error("\"{field}\" must be of type object")]
    MustBeObject { field: String },

    /// Object carries a key outside the line item shape.
    #[error("\"{field}\" is not allowed")]
    NotAllowed { field: String },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    pub fn must_be_number(field: impl Into<String>) -> Self {
        ValidationError::MustBeNumber {
            field: field.into(),
        }
    }

    pub fn must_be_integer(field: impl Into<String>) -> Self {
        ValidationError::MustBeInteger {
            field: field.into(),
        }
    }

    pub fn too_small(field: impl Into<String>, min: i64) -> Self {
        ValidationError::TooSmall {
            field: field.into(),
            min,
        }
    }

    /// Returns the status code the caller should answer with.
    ///
    /// ## Mapping
    /// ```text
    /// TooSmall        → 422 (right type, wrong range)
    /// everything else → 400 (wrong shape)
    /// ```
    pub fn status_code(&self) -> u16 {
        match self {
            ValidationError::TooSmall { .. } => STATUS_UNPROCESSABLE,
            _ => STATUS_BAD_REQUEST,
        }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business rule errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A line item references a product that does not exist.
    ///
    /// The id is kept for logging; the message stays generic because it is
    /// shown verbatim to the client.
    #[error("Product not found")]
    ProductNotFound(ProductId),

    /// Validation error (wraps ValidationError).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns the status code the caller should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            CoreError::ProductNotFound(_) => STATUS_NOT_FOUND,
            CoreError::Validation(e) => e.status_code(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::required("productId").to_string(),
            "\"productId\" is required"
        );
        assert_eq!(
            ValidationError::must_be_number("quantity").to_string(),
            "\"quantity\" must be a number"
        );
        assert_eq!(
            ValidationError::too_small("quantity", 1).to_string(),
            "\"quantity\" must be greater than or equal to 1"
        );
    }

    #[test]
    fn test_validation_status_codes() {
        assert_eq!(ValidationError::required("quantity").status_code(), 400);
        assert_eq!(ValidationError::must_be_number("productId").status_code(), 400);
        assert_eq!(ValidationError::too_small("quantity", 1).status_code(), 422);
    }

    #[test]
    fn test_product_not_found() {
        let err = CoreError::ProductNotFound(100);
        assert_eq!(err.to_string(), "Product not found");
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::too_small("quantity", 1).into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        // transparent: message and code pass through unchanged
        assert_eq!(
            core_err.to_string(),
            "\"quantity\" must be greater than or equal to 1"
        );
        assert_eq!(core_err.status_code(), 422);
    }
}
