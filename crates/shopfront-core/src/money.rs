//! # Money Module
//!
//! Provides the `Money` type for prices and discounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Summing discounts of a whole catalog in f64 drifts by fractions of    │
//! │  a cent and the grouped totals stop matching the per-product ones.     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    price 1.99 → 199 cents, discount 10% → 19.9 → 20 cents (half-up)    │
//! │    every total is an exact integer sum                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopfront_core::money::Money;
//!
//! let price: Money = "1.99".parse().unwrap();
//! assert_eq!(price.cents(), 199);
//! assert_eq!(price.percentage(1000).cents(), 20); // 10%, rounded half-up
//! assert_eq!(price.to_string(), "1.99");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use crate::error::ParseError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic never has to special-case differences
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **No currency**: the currency symbol belongs to the locale formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the absolute major unit portion (10 for -10.99).
    #[inline]
    pub const fn units(&self) -> i64 {
        (self.0 / 100).abs()
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns `bps` basis points of this amount, rounded half-up to the cent.
    ///
    /// ## Rounding
    /// ```text
    /// 1.99 × 10%  = 0.199  → 0.20
    /// 0.05 × 10%  = 0.005  → 0.01   (half rounds away from zero)
    /// 0.04 × 10%  = 0.004  → 0.00
    /// ```
    ///
    /// ## Implementation
    /// Integer math on i128: `(amount * bps ± 5000) / 10000`, the ±5000
    /// moving exact halves away from zero before truncation.
    pub fn percentage(&self, bps: u32) -> Money {
        let scaled = self.0 as i128 * bps as i128;
        let half = if scaled < 0 { -5000 } else { 5000 };
        Money::from_cents(((scaled + half) / 10000) as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering with two fraction digits (`"1234.50"`).
///
/// ## Note
/// This is the record format used by the codec. Currency symbols and digit
/// grouping are applied by the locale formatter in shopfront-store.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units(), self.cents_part())
    }
}

/// Parses a decimal such as `"12"`, `"1.5"` or `"-0.99"`.
///
/// Fraction digits past the cent must be zero (`"1.990"` is fine,
/// `"0.045"` is rejected): a price is never rounded before its discount is
/// taken.
impl FromStr for Money {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidNumber {
            field: "price",
            value: s.to_string(),
        };

        let text = s.trim();
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };

        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(invalid());
        }

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        let mut fraction_digits = fraction.bytes().map(|b| (b - b'0') as i64);
        let tenths = fraction_digits.next().unwrap_or(0);
        let hundredths = fraction_digits.next().unwrap_or(0);
        if fraction_digits.any(|d| d != 0) {
            return Err(invalid());
        }

        let cents = whole_value
            .checked_mul(100)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths))
            .ok_or_else(invalid)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Summing an iterator of Money (grouped discount totals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
