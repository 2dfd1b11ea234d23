//! Customer reviews.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::rating::Rating;

/// One piece of customer feedback. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Review {
    pub rating: Rating,
    pub comment: String,
}

impl Review {
    pub fn new(rating: Rating, comment: impl Into<String>) -> Self {
        Review {
            rating,
            comment: comment.into(),
        }
    }

    /// Orders reviews by rating alone.
    ///
    /// Equal ratings compare `Equal`; with a stable sort that keeps them in
    /// submission order. There is no `Ord` impl: it would disagree with
    /// `Eq`, which also compares the comment.
    pub fn cmp_by_rating(&self, other: &Review) -> Ordering {
        self.rating.cmp(&other.rating)
    }
}

/// Stable sort of `reviews`, lowest rating first.
pub fn sort_by_rating(reviews: &mut [Review]) {
    reviews.sort_by(Review::cmp_by_rating);
}
