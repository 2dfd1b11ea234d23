//! # Error Types
//!
//! Domain-specific error types for shopfront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopfront-core errors (this file)                                     │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── ParseError       - Malformed text records                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  shopfront-store errors (separate crate)                               │
//! │  └── StoreError       - I/O, snapshot and config failures              │
//! │                                                                         │
//! │  Flow: ParseError / ValidationError → CoreError → StoreError           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (id, field, offending text)
//! 3. Errors are enum variants, never String
//! 4. The codec never logs: it returns a `ParseError` and the caller decides

use thiserror::Error;

use crate::product::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Core catalog errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product with this id is in the catalog.
    ///
    /// ## When This Occurs
    /// - Reviewing a product that was never created
    /// - Requesting a report for a removed product
    #[error("Product with id {0} not found")]
    ProductNotFound(ProductId),

    /// A rating ordinal outside `0..=5`.
    #[error("Invalid rating value {0}: must be between 0 and 5")]
    InvalidRatingValue(i64),

    /// Malformed text record (wraps ParseError).
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Parse Error
// =============================================================================

/// Failures while decoding a product or review line.
///
/// ## User Workflow
/// ```text
/// data/product101.txt: "F,101,Cake,three,4,2025-10-25"
///      │
///      ▼
/// parse_product() ──► ParseError::InvalidNumber { field: "price", .. }
///      │
///      ▼
/// Loader logs a warning and skips this one product
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line does not have the number of fields its kind requires.
    #[error("expected {expected} fields, found {found} in '{line}'")]
    FieldCount {
        expected: usize,
        found: usize,
        line: String,
    },

    /// A required text field is blank.
    #[error("{0} is empty")]
    EmptyField(&'static str),

    /// The kind discriminator is neither `F` nor `D`.
    #[error("unknown product kind '{0}'")]
    UnknownKind(String),

    /// An integer or decimal field failed to parse.
    #[error("{field} is not a valid number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    /// The rating ordinal parsed but is outside `0..=5`.
    #[error("rating {0} is out of range 0-5")]
    RatingOutOfRange(i64),

    /// The best-before field is not an ISO-8601 date.
    #[error("invalid best-before date '{0}'")]
    InvalidDate(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before a product reaches the repository.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (line breaks, stray whitespace).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
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
    fn test_error_messages() {
        let err = CoreError::ProductNotFound(42);
        assert_eq!(err.to_string(), "Product with id 42 not found");

        let err = CoreError::InvalidRatingValue(7);
        assert_eq!(
            err.to_string(),
            "Invalid rating value 7: must be between 0 and 5"
        );
    }

    #[test]
    fn test_parse_error_messages() {
        let err = ParseError::InvalidNumber {
            field: "price",
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "price is not a valid number: 'abc'");

        let err = ParseError::FieldCount {
            expected: 6,
            found: 5,
            line: "F,1,Cake,1.00,3".to_string(),
        };
        assert_eq!(err.to_string(), "expected 6 fields, found 5 in 'F,1,Cake,1.00,3'");
    }

    #[test]
    fn test_parse_and_validation_convert_to_core_error() {
        let core_err: CoreError = ParseError::UnknownKind("X".to_string()).into();
        assert!(matches!(core_err, CoreError::Parse(_)));

        let core_err: CoreError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
