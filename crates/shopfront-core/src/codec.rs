//! # Text Codec
//!
//! Line-oriented records for products and reviews.
//!
//! ## Record Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product (Food):   F,101,Cake,3.99,4,2025-10-25                         │
//! │                    │  │   │    │   │ └── best before (ISO-8601)         │
//! │                    │  │   │    │   └──── rating ordinal 0-5             │
//! │                    │  │   │    └──────── price, decimal                 │
//! │                    │  │   └───────────── name (may contain commas)      │
//! │                    │  └───────────────── id                             │
//! │                    └──────────────────── kind: F = Food, D = Drink      │
//! │                                                                         │
//! │  Product (Drink):  D,102,Tea,1.99,0                                     │
//! │                                                                         │
//! │  Review:           5,Lovely, would buy again                            │
//! │                    │ └── comment: everything after the FIRST delimiter  │
//! │                    └──── rating ordinal 0-5                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Splitting Strategy
//! The fixed fields are peeled off both ends of the line (kind and id from
//! the left, the numeric tail from the right); whatever is left in the
//! middle is the name. Names and comments can therefore contain the
//! delimiter without any escaping.
//!
//! Every failure is a typed [`ParseError`]. The codec never logs, so a bulk
//! loader can skip one bad record and keep going.

use chrono::NaiveDate;

use crate::error::ParseError;
use crate::money::Money;
use crate::product::{Product, ProductId, ProductKind};
use crate::rating::Rating;
use crate::review::Review;

/// ISO-8601 calendar date, as written in product records.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Default field delimiter.
pub const DEFAULT_DELIMITER: char = ',';

/// Parser and formatter for one delimiter.
///
/// ## Example
/// ```rust
/// use shopfront_core::codec::LineCodec;
///
/// let codec = LineCodec::default();
/// let product = codec.parse_product("D,102,Tea,1.99,0").unwrap();
/// assert_eq!(product.name(), "Tea");
/// assert_eq!(codec.format_product(&product), "D,102,Tea,1.99,0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCodec {
    delimiter: char,
}

impl Default for LineCodec {
    fn default() -> Self {
        LineCodec::new(DEFAULT_DELIMITER)
    }
}

impl LineCodec {
    pub const fn new(delimiter: char) -> Self {
        LineCodec { delimiter }
    }

    pub const fn delimiter(&self) -> char {
        self.delimiter
    }

    // =========================================================================
    // Parsing
    // =========================================================================

    /// Parses a product record.
    ///
    /// ## Errors
    /// - `FieldCount` - 6 fields required for `F`, 5 for `D`
    /// - `UnknownKind` - first field is not `F` or `D`
    /// - `InvalidNumber` - id, price or rating is not a number
    /// - `RatingOutOfRange` - rating outside 0-5
    /// - `InvalidDate` - `F` record with a malformed best-before date
    /// - `EmptyField` - blank name
    pub fn parse_product(&self, line: &str) -> Result<Product, ParseError> {
        let line = strip_line_ending(line);
        let mut head = line.splitn(3, self.delimiter);

        let kind_code = head.next().unwrap_or_default().trim();
        let (expected, tail_len) = match kind_code {
            "F" => (6, 3),
            "D" => (5, 2),
            other => return Err(ParseError::UnknownKind(other.to_string())),
        };
        let field_count_error = || ParseError::FieldCount {
            expected,
            found: line.split(self.delimiter).count(),
            line: line.to_string(),
        };

        let id_field = head.next().ok_or_else(field_count_error)?;
        let rest = head.next().ok_or_else(field_count_error)?;

        // tail fields come back last-first: [date,] rating, price, name
        let mut tail: Vec<&str> = rest.rsplitn(tail_len + 1, self.delimiter).collect();
        if tail.len() != tail_len + 1 {
            return Err(field_count_error());
        }
        tail.reverse();

        let id = parse_id(id_field)?;
        let name = tail[0].trim();
        if name.is_empty() {
            return Err(ParseError::EmptyField("name"));
        }
        let price: Money = tail[1].parse()?;
        let rating = parse_rating(tail[2])?;

        let kind = match kind_code {
            "F" => ProductKind::Food {
                best_before: parse_date(tail[3])?,
            },
            _ => ProductKind::Drink,
        };

        Ok(Product::new(id, name, price, rating, kind))
    }

    /// Parses a review record. Only the first delimiter separates fields.
    ///
    /// ## Errors
    /// - `FieldCount` - no delimiter at all
    /// - `InvalidNumber` / `RatingOutOfRange` - bad rating field
    pub fn parse_review(&self, line: &str) -> Result<Review, ParseError> {
        let line = strip_line_ending(line);
        let (rating_field, comment) =
            line.split_once(self.delimiter).ok_or_else(|| ParseError::FieldCount {
                expected: 2,
                found: 1,
                line: line.to_string(),
            })?;

        Ok(Review::new(parse_rating(rating_field)?, comment.trim()))
    }

    // =========================================================================
    // Formatting
    // =========================================================================

    /// Formats a product record; the inverse of [`LineCodec::parse_product`].
    pub fn format_product(&self, product: &Product) -> String {
        let d = self.delimiter;
        let mut line = format!(
            "{code}{d}{id}{d}{name}{d}{price}{d}{rating}",
            code = product.kind().code(),
            id = product.id(),
            name = product.name(),
            price = product.price(),
            rating = product.rating().ordinal(),
        );
        match product.kind() {
            ProductKind::Food { best_before } => {
                line.push(d);
                line.push_str(&best_before.format(DATE_FORMAT).to_string());
            }
            ProductKind::Drink => {}
        }
        line
    }

    /// Formats a review record; the inverse of [`LineCodec::parse_review`].
    ///
    /// Line breaks inside the comment become spaces: a record is one line.
    pub fn format_review(&self, review: &Review) -> String {
        let comment = review.comment.replace(['\r', '\n'], " ");
        format!("{}{}{}", review.rating.ordinal(), self.delimiter, comment)
    }
}

fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

fn parse_id(field: &str) -> Result<ProductId, ParseError> {
    let field = field.trim();
    field.parse().map_err(|_| ParseError::InvalidNumber {
        field: "id",
        value: field.to_string(),
    })
}

fn parse_rating(field: &str) -> Result<Rating, ParseError> {
    let field = field.trim();
    let ordinal: i64 = field.parse().map_err(|_| ParseError::InvalidNumber {
        field: "rating",
        value: field.to_string(),
    })?;
    Rating::from_ordinal(ordinal).map_err(|_| ParseError::RatingOutOfRange(ordinal))
}

fn parse_date(field: &str) -> Result<NaiveDate, ParseError> {
    let field = field.trim();
    NaiveDate::parse_from_str(field, DATE_FORMAT)
        .map_err(|_| ParseError::InvalidDate(field.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================
