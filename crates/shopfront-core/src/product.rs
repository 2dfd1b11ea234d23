//! # Products
//!
//! The immutable catalog item and its two kinds.
//!
//! ## Identity vs. Value
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product { id: 101, name: "Cake", price: 3.99, rating: ★★★☆☆, Food }   │
//! │            └───────┬─────────┘   └──────────────┬───────────────────┘  │
//! │              identity key                 value fields                 │
//! │     (Eq, Hash, Ord, map keying)     (ignored by Eq / Ord)              │
//! │                                                                         │
//! │  with_rating(★★★★☆) ──► new Product, same identity key                 │
//! │  The repository swaps the old key for the new one; nothing is ever     │
//! │  mutated while it sits in the map.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::money::Money;
use crate::rating::Rating;

/// Numeric product identifier.
pub type ProductId = u32;

/// Discount rate in basis points (1000 = 10%).
pub const DISCOUNT_RATE_BPS: u32 = 1000;

// =============================================================================
// Product Kind
// =============================================================================

/// Perishable or non-perishable.
///
/// Every place that cares about the kind matches on this enum, so adding a
/// third kind is a compile error until each of them handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProductKind {
    /// Perishable goods, carrying an expiry date.
    Food { best_before: NaiveDate },
    /// Non-perishable goods.
    Drink,
}

impl ProductKind {
    /// One-letter discriminator used in text records.
    pub const fn code(&self) -> char {
        match self {
            ProductKind::Food { .. } => 'F',
            ProductKind::Drink => 'D',
        }
    }

    /// Expiry date, if this kind has one.
    pub const fn best_before(&self) -> Option<NaiveDate> {
        match self {
            ProductKind::Food { best_before } => Some(*best_before),
            ProductKind::Drink => None,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog item.
///
/// Fields are private: once built, a product never changes. Equality,
/// hashing and ordering use only `(id, name)`. Use [`Product::same_values`]
/// to compare every field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money,
    rating: Rating,
    kind: ProductKind,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Money,
        rating: Rating,
        kind: ProductKind,
    ) -> Self {
        Product {
            id,
            name: name.into(),
            price,
            rating,
            kind,
        }
    }

    /// Shorthand for a perishable product.
    pub fn food(
        id: ProductId,
        name: impl Into<String>,
        price: Money,
        rating: Rating,
        best_before: NaiveDate,
    ) -> Self {
        Product::new(id, name, price, rating, ProductKind::Food { best_before })
    }

    /// Shorthand for a non-perishable product.
    pub fn drink(id: ProductId, name: impl Into<String>, price: Money, rating: Rating) -> Self {
        Product::new(id, name, price, rating, ProductKind::Drink)
    }

    #[inline]
    pub fn id(&self) -> ProductId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    #[inline]
    pub fn rating(&self) -> Rating {
        self.rating
    }

    #[inline]
    pub fn kind(&self) -> ProductKind {
        self.kind
    }

    #[inline]
    pub fn best_before(&self) -> Option<NaiveDate> {
        self.kind.best_before()
    }

    /// 10% of the price, rounded half-up to the cent.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::{Money, Product, Rating};
    ///
    /// let tea = Product::drink(1, "Tea", Money::from_cents(199), Rating::NotRated);
    /// assert_eq!(tea.discount(), Money::from_cents(20));
    /// ```
    pub fn discount(&self) -> Money {
        self.price.percentage(DISCOUNT_RATE_BPS)
    }

    /// A copy of this product carrying `rating`; identity is unchanged.
    pub fn with_rating(&self, rating: Rating) -> Product {
        Product {
            rating,
            ..self.clone()
        }
    }

    /// Compares every field, not just the identity key.
    pub fn same_values(&self, other: &Product) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.price == other.price
            && self.rating == other.rating
            && self.kind == other.kind
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name
    }
}

impl Eq for Product {}

impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.name.hash(state);
    }
}

impl PartialOrd for Product {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ordered by id, then name.
impl Ord for Product {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id
            .cmp(&other.id)
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} #{} '{}' {} {}",
            self.kind.code(),
            self.id,
            self.name,
            self.price,
            self.rating
        )?;
        if let Some(date) = self.best_before() {
            write!(f, " best before {}", date)?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_identity_ignores_value_fields() {
        let a = Product::drink(1, "Tea", Money::from_cents(199), Rating::NotRated);
        let b = Product::food(1, "Tea", Money::from_cents(500), Rating::FiveStar, date(2030, 1, 1));
        let c = Product::drink(1, "Coffee", Money::from_cents(199), Rating::NotRated);

        assert_eq!(a, b);
        assert!(!a.same_values(&b));
        assert_ne!(a, c);
    }

    #[test]
    fn test_ordering_by_id_then_name() {
        let mut products = vec![
            Product::drink(2, "Apple", Money::zero(), Rating::NotRated),
            Product::drink(1, "Banana", Money::zero(), Rating::NotRated),
            Product::drink(1, "Apple", Money::zero(), Rating::NotRated),
        ];
        products.sort();
        let keys: Vec<(ProductId, &str)> = products.iter().map(|p| (p.id(), p.name())).collect();
        assert_eq!(keys, vec![(1, "Apple"), (1, "Banana"), (2, "Apple")]);
    }

    #[test]
    fn test_discount() {
        let cake = Product::food(101, "Cake", Money::from_cents(10000), Rating::NotRated, date(2030, 1, 1));
        assert_eq!(cake.discount(), Money::from_cents(1000));

        let tea = Product::drink(102, "Tea", Money::from_cents(5), Rating::NotRated);
        assert_eq!(tea.discount(), Money::from_cents(1));
    }

    #[test]
    fn test_with_rating_keeps_identity() {
        let tea = Product::drink(1, "Tea", Money::from_cents(199), Rating::NotRated);
        let rated = tea.with_rating(Rating::FourStar);

        assert_eq!(rated, tea);
        assert_eq!(rated.rating(), Rating::FourStar);
        assert_eq!(tea.rating(), Rating::NotRated);
        assert_eq!(rated.price(), tea.price());
    }

    #[test]
    fn test_kind_best_before() {
        let best_before = date(2030, 5, 1);
        assert_eq!(ProductKind::Food { best_before }.best_before(), Some(best_before));
        assert_eq!(ProductKind::Drink.best_before(), None);
        assert_eq!(ProductKind::Food { best_before }.code(), 'F');
        assert_eq!(ProductKind::Drink.code(), 'D');
    }
}
