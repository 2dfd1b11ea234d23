//! # Rating Scale
//!
//! The six-level star scale shared by products and reviews.
//!
//! ```text
//! ordinal   variant     glyph
//! ───────   ─────────   ─────
//!    0      NotRated    ☆☆☆☆☆
//!    1      OneStar     ★☆☆☆☆
//!    2      TwoStar     ★★☆☆☆
//!    3      ThreeStar   ★★★☆☆
//!    4      FourStar    ★★★★☆
//!    5      FiveStar    ★★★★★
//! ```
//!
//! The ordinal space is exactly `0..=5`; the derive order of the variants is
//! the numeric order, so `Ord` on `Rating` agrees with `ordinal()`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// A star rating.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rating {
    #[default]
    NotRated,
    OneStar,
    TwoStar,
    ThreeStar,
    FourStar,
    FiveStar,
}

impl Rating {
    /// Every level, lowest first.
    pub const ALL: [Rating; 6] = [
        Rating::NotRated,
        Rating::OneStar,
        Rating::TwoStar,
        Rating::ThreeStar,
        Rating::FourStar,
        Rating::FiveStar,
    ];

    /// Numeric value used in rating arithmetic.
    #[inline]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Fixed five-character star glyph.
    pub const fn stars(self) -> &'static str {
        match self {
            Rating::NotRated => "\u{2606}\u{2606}\u{2606}\u{2606}\u{2606}",
            Rating::OneStar => "\u{2605}\u{2606}\u{2606}\u{2606}\u{2606}",
            Rating::TwoStar => "\u{2605}\u{2605}\u{2606}\u{2606}\u{2606}",
            Rating::ThreeStar => "\u{2605}\u{2605}\u{2605}\u{2606}\u{2606}",
            Rating::FourStar => "\u{2605}\u{2605}\u{2605}\u{2605}\u{2606}",
            Rating::FiveStar => "\u{2605}\u{2605}\u{2605}\u{2605}\u{2605}",
        }
    }

    /// Converts an ordinal back into a rating.
    ///
    /// ## Errors
    /// `CoreError::InvalidRatingValue` for anything outside `0..=5`.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::Rating;
    ///
    /// assert_eq!(Rating::from_ordinal(3).unwrap(), Rating::ThreeStar);
    /// assert!(Rating::from_ordinal(6).is_err());
    /// assert!(Rating::from_ordinal(-1).is_err());
    /// ```
    pub fn from_ordinal(n: i64) -> CoreResult<Rating> {
        usize::try_from(n)
            .ok()
            .and_then(|i| Rating::ALL.get(i).copied())
            .ok_or(CoreError::InvalidRatingValue(n))
    }

    /// Aggregate rating: the arithmetic mean of `ordinals`, rounded half-up.
    ///
    /// An empty slice is `NotRated`. Because every input lies in `0..=5`,
    /// the rounded mean does too.
    ///
    /// ```text
    /// [1, 5]       → 3.0  → ThreeStar
    /// [2, 3]       → 2.5  → ThreeStar   (half rounds up)
    /// [1, 1, 2]    → 1.33 → OneStar
    /// ```
    pub fn from_mean(ordinals: &[u8]) -> Rating {
        if ordinals.is_empty() {
            return Rating::NotRated;
        }
        let count = ordinals.len() as u64;
        let sum: u64 = ordinals.iter().map(|&o| o as u64).sum();
        // round(sum / count) with halves up, in integers: floor((2*sum + count) / (2*count))
        let rounded = (2 * sum + count) / (2 * count);
        Rating::ALL[rounded.min(5) as usize]
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stars())
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> u8 {
        rating.ordinal()
    }
}

impl TryFrom<u8> for Rating {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::from_ordinal(value as i64)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
