//! # Product Repository
//!
//! The in-memory catalog: every product mapped to its reviews, behind one
//! reader/writer lock.
//!
//! ## Review Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 review_product(101, ★★★★★, "great")                     │
//! │                                                                         │
//! │  write lock ─────────────────────────────────────────────────────┐     │
//! │  │                                                               │     │
//! │  │  1. find key with id 101       (miss → ProductNotFound)       │     │
//! │  │  2. remove (Cake ★★★☆☆, [r1, r2])                            │     │
//! │  │  3. push r3              → [r1, r2, r3]                       │     │
//! │  │  4. rating = round(mean) → ★★★★☆                             │     │
//! │  │  5. insert (Cake ★★★★☆, [r1, r2, r3])                        │     │
//! │  │                                                               │     │
//! │  └─────────────────────────────────────────────────── unlock ────┘     │
//! │                                                                         │
//! │  Readers see either the old entry or the new one, never a gap.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Keys compare by `(id, name)`, so the map is ordered by id and then name.
//! Lookups by bare id take the first key with that id, which is the one
//! with the smallest name.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use shopfront_core::validation::{normalize_comment, validate_price, validate_product_name};
use shopfront_core::{CoreError, Money, Product, ProductId, ProductKind, Rating, Review};

use crate::error::{StoreError, StoreResult};
use crate::storage::CatalogFiles;

/// One product with its reviews in insertion order.
pub type Entry = (Product, Vec<Review>);

/// Thread-safe product catalog.
///
/// ## Usage
/// ```rust
/// use std::sync::Arc;
/// use shopfront_core::{Money, Rating};
/// use shopfront_store::ProductRepository;
///
/// let repo = Arc::new(ProductRepository::new());
/// repo.create_drink(102, "Tea", Money::from_cents(199), Rating::NotRated).unwrap();
///
/// let tea = repo.review_product(102, Rating::FourStar, "Nice").unwrap();
/// assert_eq!(tea.rating(), Rating::FourStar);
/// ```
#[derive(Debug, Default)]
pub struct ProductRepository {
    pub(super) products: RwLock<BTreeMap<Product, Vec<Review>>>,
}

impl ProductRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Write Path
    // =========================================================================

    /// Adds a product unless its `(id, name)` is already present.
    ///
    /// Returns the product now stored under that identity, which is the
    /// existing one on a duplicate.
    pub fn create_product(
        &self,
        id: ProductId,
        name: &str,
        price: Money,
        rating: Rating,
        kind: ProductKind,
    ) -> StoreResult<Product> {
        validate_product_name(name).map_err(CoreError::from)?;
        validate_price(price).map_err(CoreError::from)?;

        let product = Product::new(id, name, price, rating, kind);
        let mut products = self.products.write();

        if let Some((existing, _)) = products.get_key_value(&product) {
            debug!(id = %id, name = %name, "Product already exists, keeping it");
            return Ok(existing.clone());
        }

        debug!(id = %id, name = %name, kind = %kind.code(), "Creating product");
        products.insert(product.clone(), Vec::new());
        Ok(product)
    }

    pub fn create_food(
        &self,
        id: ProductId,
        name: &str,
        price: Money,
        rating: Rating,
        best_before: NaiveDate,
    ) -> StoreResult<Product> {
        self.create_product(id, name, price, rating, ProductKind::Food { best_before })
    }

    pub fn create_drink(
        &self,
        id: ProductId,
        name: &str,
        price: Money,
        rating: Rating,
    ) -> StoreResult<Product> {
        self.create_product(id, name, price, rating, ProductKind::Drink)
    }

    /// Appends a review and re-rates the product, all under one write lock.
    ///
    /// The comment is stored normalized (one line, trimmed) so it reads back
    /// unchanged from the data folder.
    pub fn review_product(
        &self,
        id: ProductId,
        rating: Rating,
        comment: &str,
    ) -> StoreResult<Product> {
        let mut products = self.products.write();

        let Some(key) = products.keys().find(|p| p.id() == id).cloned() else {
            info!(id = %id, "Review rejected: product not found");
            return Err(StoreError::not_found(id));
        };

        let Some((old, mut reviews)) = products.remove_entry(&key) else {
            return Err(StoreError::not_found(id));
        };

        reviews.push(Review::new(rating, normalize_comment(comment)));
        let ordinals: Vec<u8> = reviews.iter().map(|r| r.rating.ordinal()).collect();
        let updated = old.with_rating(Rating::from_mean(&ordinals));

        debug!(
            id = %id,
            reviews = reviews.len(),
            rating = updated.rating().ordinal(),
            "Product reviewed"
        );

        products.insert(updated.clone(), reviews);
        Ok(updated)
    }

    /// Drops the first product with this id. Returns false if none matched.
    pub fn remove_product(&self, id: ProductId) -> bool {
        let mut products = self.products.write();

        match products.keys().find(|p| p.id() == id).cloned() {
            Some(key) => {
                products.remove(&key);
                debug!(id = %id, "Product removed");
                true
            }
            None => false,
        }
    }

    pub fn clear(&self) {
        self.products.write().clear();
    }

    /// Empties the repository and returns what it held, in one write-locked
    /// step. Nothing accepted before the call is missing from the result.
    pub fn take_all(&self) -> Vec<Entry> {
        let taken = std::mem::take(&mut *self.products.write());
        debug!(count = taken.len(), "Catalog taken");
        taken.into_iter().collect()
    }

    /// Puts back entries whose identity is absent. Used to undo a
    /// [`take_all`](Self::take_all) whose caller failed; anything created
    /// in between under the same identity is kept.
    pub fn put_back(&self, entries: Vec<Entry>) {
        let mut products = self.products.write();
        for (product, reviews) in entries {
            if products.contains_key(&product) {
                warn!(
                    id = %product.id(),
                    name = %product.name(),
                    "Product re-created meanwhile, keeping the newer entry"
                );
                continue;
            }
            products.insert(product, reviews);
        }
    }

    /// Swaps in a new catalog in one step.
    pub fn replace_all(&self, entries: impl IntoIterator<Item = Entry>) {
        let mut fresh = BTreeMap::new();
        for (product, reviews) in entries {
            if fresh.contains_key(&product) {
                warn!(id = %product.id(), name = %product.name(), "Duplicate product dropped");
                continue;
            }
            fresh.insert(product, reviews);
        }

        let count = fresh.len();
        *self.products.write() = fresh;
        debug!(count = count, "Catalog replaced");
    }

    // =========================================================================
    // Read Path
    // =========================================================================

    /// First product with this id.
    pub fn find_product(&self, id: ProductId) -> StoreResult<Product> {
        self.products
            .read()
            .keys()
            .find(|p| p.id() == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    /// The product and a copy of its reviews, in insertion order.
    pub fn find_entry(&self, id: ProductId) -> StoreResult<Entry> {
        self.products
            .read()
            .iter()
            .find(|(p, _)| p.id() == id)
            .map(|(p, reviews)| (p.clone(), reviews.clone()))
            .ok_or_else(|| StoreError::not_found(id))
    }

    pub fn reviews(&self, id: ProductId) -> StoreResult<Vec<Review>> {
        self.find_entry(id).map(|(_, reviews)| reviews)
    }

    pub fn len(&self) -> usize {
        self.products.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.read().is_empty()
    }

    /// Snapshot of every product, ordered by `(id, name)`.
    pub fn products(&self) -> Vec<Product> {
        self.products.read().keys().cloned().collect()
    }

    /// Snapshot of every entry, ordered by `(id, name)`.
    pub fn entries(&self) -> Vec<Entry> {
        self.products
            .read()
            .iter()
            .map(|(p, reviews)| (p.clone(), reviews.clone()))
            .collect()
    }

    // =========================================================================
    // Bulk Load / Save
    // =========================================================================

    /// Replaces the catalog with what is on disk.
    ///
    /// Files are read and parsed before the lock is taken.
    pub fn load_all(&self, files: &CatalogFiles) -> StoreResult<usize> {
        let entries = files.load_catalog()?;
        let count = entries.len();
        self.replace_all(entries);
        info!(count = count, "Catalog loaded");
        Ok(count)
    }

    /// Writes the current catalog to disk and returns how many products
    /// were saved. Products sharing an id with an earlier one are skipped.
    pub fn save_all(&self, files: &CatalogFiles) -> StoreResult<usize> {
        let entries = self.entries();
        let count = files.save_catalog(&entries)?;
        info!(count = count, "Catalog saved");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_repo() -> ProductRepository {
        let repo = ProductRepository::new();
        repo.create_food(
            101,
            "Cake",
            Money::from_cents(399),
            Rating::NotRated,
            date(2025, 10, 25),
        )
        .unwrap();
        repo.create_drink(102, "Tea", Money::from_cents(199), Rating::NotRated)
            .unwrap();
        repo
    }

    #[test]
    fn test_create_and_find() {
        let repo = sample_repo();
        let cake = repo.find_product(101).unwrap();
        assert_eq!(cake.name(), "Cake");
        assert_eq!(cake.best_before(), Some(date(2025, 10, 25)));
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn test_find_missing_is_not_found() {
        let repo = sample_repo();
        let err = repo.find_product(999).unwrap_err();
        assert!(err.is_not_found());

        let empty = ProductRepository::new();
        assert!(empty.find_product(0).unwrap_err().is_not_found());
    }

    #[test]
    fn test_create_duplicate_keeps_one_entry() {
        let repo = ProductRepository::new();
        let first = repo
            .create_drink(1, "Tea", Money::from_cents(199), Rating::NotRated)
            .unwrap();
        let second = repo
            .create_drink(1, "Tea", Money::from_cents(999), Rating::FiveStar)
            .unwrap();

        assert_eq!(repo.len(), 1);
        assert!(second.same_values(&first));
        assert_eq!(second.price(), Money::from_cents(199));
    }

    #[test]
    fn test_create_rejects_invalid_input() {
        let repo = ProductRepository::new();
        assert!(repo
            .create_drink(1, "", Money::from_cents(100), Rating::NotRated)
            .is_err());
        assert!(repo
            .create_drink(1, "Tea", Money::from_cents(-1), Rating::NotRated)
            .is_err());
        assert!(repo.is_empty());
    }

    #[test]
    fn test_duplicate_id_first_match_is_smallest_name() {
        let repo = ProductRepository::new();
        repo.create_drink(7, "Banana", Money::from_cents(100), Rating::NotRated)
            .unwrap();
        repo.create_drink(7, "Apple", Money::from_cents(100), Rating::NotRated)
            .unwrap();

        assert_eq!(repo.len(), 2);
        assert_eq!(repo.find_product(7).unwrap().name(), "Apple");

        let reviewed = repo.review_product(7, Rating::TwoStar, "ok").unwrap();
        assert_eq!(reviewed.name(), "Apple");
    }

    #[test]
    fn test_single_review_sets_rating() {
        let repo = sample_repo();
        let tea = repo.review_product(102, Rating::ThreeStar, "fine").unwrap();
        assert_eq!(tea.rating(), Rating::ThreeStar);
        assert_eq!(repo.find_product(102).unwrap().rating(), Rating::ThreeStar);
    }

    #[test]
    fn test_mean_of_one_and_five_is_three() {
        let repo = sample_repo();
        repo.review_product(101, Rating::OneStar, "dry").unwrap();
        let cake = repo.review_product(101, Rating::FiveStar, "lovely").unwrap();
        assert_eq!(cake.rating(), Rating::ThreeStar);
    }

    #[test]
    fn test_half_rounds_up() {
        let repo = sample_repo();
        repo.review_product(101, Rating::TwoStar, "").unwrap();
        let cake = repo.review_product(101, Rating::ThreeStar, "").unwrap();
        assert_eq!(cake.rating(), Rating::ThreeStar);
    }

    #[test]
    fn test_review_missing_product_fails_and_changes_nothing() {
        let repo = sample_repo();
        let before = repo.entries();

        let err = repo.review_product(5, Rating::FiveStar, "ghost").unwrap_err();
        assert!(err.is_not_found());

        let after = repo.entries();
        assert_eq!(before.len(), after.len());
        assert!(after.iter().all(|(_, reviews)| reviews.is_empty()));
    }

    #[test]
    fn test_reviews_kept_in_insertion_order() {
        let repo = sample_repo();
        repo.review_product(102, Rating::FiveStar, "a").unwrap();
        repo.review_product(102, Rating::OneStar, "b").unwrap();

        let comments: Vec<_> = repo
            .reviews(102)
            .unwrap()
            .into_iter()
            .map(|r| r.comment)
            .collect();
        assert_eq!(comments, vec!["a", "b"]);
    }

    #[test]
    fn test_explicit_rating_kept_until_first_review() {
        let repo = ProductRepository::new();
        repo.create_drink(3, "Coffee", Money::from_cents(250), Rating::FiveStar)
            .unwrap();
        assert_eq!(repo.find_product(3).unwrap().rating(), Rating::FiveStar);

        let coffee = repo.review_product(3, Rating::OneStar, "bitter").unwrap();
        assert_eq!(coffee.rating(), Rating::OneStar);
    }

    #[test]
    fn test_remove_product_is_idempotent() {
        let repo = sample_repo();
        assert!(repo.remove_product(101));
        assert!(!repo.remove_product(101));
        assert_eq!(repo.len(), 1);
        assert!(repo.find_product(101).unwrap_err().is_not_found());
    }

    #[test]
    fn test_replace_all_drops_duplicates() {
        let repo = sample_repo();
        let tea = Product::drink(9, "Tea", Money::from_cents(100), Rating::NotRated);
        repo.replace_all(vec![
            (tea.clone(), vec![Review::new(Rating::OneStar, "x")]),
            (tea, Vec::new()),
        ]);

        assert_eq!(repo.len(), 1);
        assert_eq!(repo.reviews(9).unwrap().len(), 1);
    }

    #[test]
    fn test_concurrent_reviews_are_not_lost() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 25;

        let repo = Arc::new(sample_repo());
        std::thread::scope(|s| {
            for t in 0..THREADS {
                let repo = Arc::clone(&repo);
                s.spawn(move || {
                    for i in 0..PER_THREAD {
                        let rating = Rating::ALL[1 + (t + i) % 5];
                        repo.review_product(101, rating, "concurrent").unwrap();
                        repo.find_product(101).unwrap();
                    }
                });
            }
        });

        let reviews = repo.reviews(101).unwrap();
        assert_eq!(reviews.len(), THREADS * PER_THREAD);

        let ordinals: Vec<u8> = reviews.iter().map(|r| r.rating.ordinal()).collect();
        assert_eq!(
            repo.find_product(101).unwrap().rating(),
            Rating::from_mean(&ordinals)
        );
    }

    #[test]
    fn test_concurrent_creates_of_same_identity() {
        let repo = ProductRepository::new();
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    repo.create_drink(1, "Tea", Money::from_cents(199), Rating::NotRated)
                        .unwrap();
                });
            }
        });
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_review_comment_is_normalized() {
        let repo = sample_repo();
        repo.review_product(102, Rating::FourStar, "  two\nlines ").unwrap();
        assert_eq!(repo.reviews(102).unwrap()[0].comment, "two lines");
    }

    #[test]
    fn test_take_all_empties_and_put_back_restores() {
        let repo = sample_repo();
        repo.review_product(101, Rating::FiveStar, "moist").unwrap();

        let taken = repo.take_all();
        assert_eq!(taken.len(), 2);
        assert!(repo.is_empty());

        repo.create_drink(102, "Tea", Money::from_cents(999), Rating::NotRated)
            .unwrap();
        repo.put_back(taken);

        assert_eq!(repo.len(), 2);
        assert_eq!(repo.reviews(101).unwrap().len(), 1);
        // the re-created Tea wins over the taken one
        assert_eq!(repo.find_product(102).unwrap().price(), Money::from_cents(999));
    }
}
