//! # Validation Module
//!
//! Input checks run before a product enters the repository.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller                                                       │
//! │  └── Typed arguments (Rating, Money, ProductKind)                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Name shape (non-empty, one line, no stray whitespace)             │
//! │  ├── Price range (never negative)                                      │
//! │  └── Review comment normalized to one trimmed line                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Codec                                                        │
//! │  └── Validated products and normalized reviews survive format → parse  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopfront_core::validation::{validate_price, validate_product_name};
//! use shopfront_core::Money;
//!
//! validate_product_name("Cake").unwrap();
//! validate_price(Money::from_cents(399)).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_NAME_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 200 characters
/// - A single line
/// - No leading or trailing whitespace (the codec trims fields)
///
/// ## Example
/// ```rust
/// use shopfront_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Chocolate, dark").is_ok());
/// assert!(validate_product_name("").is_err());
/// assert!(validate_product_name(" Tea").is_err());
/// assert!(validate_product_name("Two\nLines").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    if name.contains(['\n', '\r']) {
        return Err(ValidationError::InvalidFormat {
            field: "name".to_string(),
            reason: "must be a single line".to_string(),
        });
    }

    if trimmed.len() != name.len() {
        return Err(ValidationError::InvalidFormat {
            field: "name".to_string(),
            reason: "must not start or end with whitespace".to_string(),
        });
    }

    Ok(())
}

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative
/// - Zero is allowed (free samples)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Brings a review comment into the shape the codec stores: line breaks
/// become spaces and surrounding whitespace is dropped.
///
/// ```rust
/// use shopfront_core::validation::normalize_comment;
///
/// assert_eq!(normalize_comment("  two\nlines "), "two lines");
/// ```
pub fn normalize_comment(comment: &str) -> String {
    comment.replace(['\r', '\n'], " ").trim().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
