//! # Catalog Files
//!
//! Reads and writes the catalog as plain text files in the data folder.
//!
//! ## Layout
//! ```text
//! data/
//! ├── product101.txt     "F,101,Cake,3.99,4,2025-10-25"   (first line only)
//! ├── reviews101.txt     "4,Rather good"                  (one review per line)
//! │                      "5,Best cake I ever had"
//! ├── product102.txt     "D,102,Tea,1.99,0"
//! └── ...                (no reviews102.txt → no reviews)
//! reports/
//! └── product101_alice_report.txt
//! ```
//!
//! Any file whose name starts with the product prefix is a product file. A
//! product file that cannot be read or parsed is skipped with a warning, as
//! is a bad review line. Nothing here touches the repository lock.

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use shopfront_core::{LineCodec, Product, ProductId, Review};

use crate::config::{FileSettings, StoreConfig};
use crate::error::{StoreError, StoreResult};
use crate::repository::Entry;

/// File access for one catalog.
#[derive(Debug, Clone)]
pub struct CatalogFiles {
    data_dir: PathBuf,
    reports_dir: PathBuf,
    files: FileSettings,
    codec: LineCodec,
}

impl CatalogFiles {
    pub fn new(config: &StoreConfig) -> Self {
        CatalogFiles {
            data_dir: config.folders.data.clone(),
            reports_dir: config.folders.reports.clone(),
            files: config.files.clone(),
            codec: config.codec(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    pub fn product_path(&self, id: ProductId) -> PathBuf {
        self.data_dir.join(self.files.product_file_name(id))
    }

    pub fn review_path(&self, id: ProductId) -> PathBuf {
        self.data_dir.join(self.files.review_file_name(id))
    }

    /// Fails when `client` is not a plain file name component.
    pub fn report_path(&self, id: ProductId, client: &str) -> StoreResult<PathBuf> {
        Ok(self.reports_dir.join(self.files.report_file_name(id, client)?))
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Every parseable product in the data folder with its reviews.
    ///
    /// A missing data folder is an empty catalog. Failing to list an
    /// existing folder is an error.
    pub fn load_catalog(&self) -> StoreResult<Vec<Entry>> {
        let listing = match fs::read_dir(&self.data_dir) {
            Ok(listing) => listing,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(dir = ?self.data_dir, "Data folder not found, starting with an empty catalog");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::io(&self.data_dir, e)),
        };

        let mut paths: Vec<PathBuf> = listing
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| self.is_product_file(path))
            .collect();
        // directory order is unspecified
        paths.sort();

        let mut entries = Vec::with_capacity(paths.len());
        for path in paths {
            let Some(product) = self.load_product(&path) else {
                continue;
            };
            let reviews = self.load_reviews(product.id());
            entries.push((product, reviews));
        }

        debug!(count = entries.len(), dir = ?self.data_dir, "Catalog files read");
        Ok(entries)
    }

    fn is_product_file(&self, path: &Path) -> bool {
        path.is_file()
            && path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(&self.files.product_prefix))
    }

    /// First line of a product file, or `None` after logging why not.
    fn load_product(&self, path: &Path) -> Option<Product> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!(?path, error = %e, "Skipping unreadable product file");
                return None;
            }
        };

        let line = text.lines().next().unwrap_or_default();
        match self.codec.parse_product(line) {
            Ok(product) => Some(product),
            Err(e) => {
                warn!(?path, error = %e, "Skipping unparseable product file");
                None
            }
        }
    }

    /// Reviews for `id`. No file means no reviews.
    fn load_reviews(&self, id: ProductId) -> Vec<Review> {
        let path = self.review_path(id);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(?path, error = %e, "Skipping unreadable review file");
                return Vec::new();
            }
        };

        text.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(n, line)| match self.codec.parse_review(line) {
                Ok(review) => Some(review),
                Err(e) => {
                    warn!(?path, line = n + 1, error = %e, "Skipping bad review");
                    None
                }
            })
            .collect()
    }

    // =========================================================================
    // Saving
    // =========================================================================

    /// Writes one product file per entry, plus a review file when it has
    /// reviews, and returns how many products were written.
    ///
    /// Files are named by id, so only the first entry per id is written;
    /// entries arrive in `(id, name)` order, which makes that the same
    /// product `find_product` returns. Product and review files left over
    /// from products no longer in `entries` are removed afterwards.
    pub fn save_catalog(&self, entries: &[Entry]) -> StoreResult<usize> {
        fs::create_dir_all(&self.data_dir).map_err(|e| StoreError::io(&self.data_dir, e))?;

        let mut written: BTreeSet<ProductId> = BTreeSet::new();
        let mut with_reviews: BTreeSet<ProductId> = BTreeSet::new();

        for (product, reviews) in entries {
            let id = product.id();
            if !written.insert(id) {
                warn!(id = %id, name = %product.name(), "Another product already uses this id, not saved");
                continue;
            }

            let path = self.product_path(id);
            let line = self.codec.format_product(product) + "\n";
            fs::write(&path, line).map_err(|e| StoreError::io(&path, e))?;

            if reviews.is_empty() {
                continue;
            }
            let path = self.review_path(id);
            let text: String = reviews
                .iter()
                .map(|r| self.codec.format_review(r) + "\n")
                .collect();
            fs::write(&path, text).map_err(|e| StoreError::io(&path, e))?;
            with_reviews.insert(id);
        }

        self.remove_stale_files(&written, &with_reviews)?;

        debug!(count = written.len(), dir = ?self.data_dir, "Catalog files written");
        Ok(written.len())
    }

    /// Deletes product files not in `products` and review files not in
    /// `reviewed`.
    fn remove_stale_files(
        &self,
        products: &BTreeSet<ProductId>,
        reviewed: &BTreeSet<ProductId>,
    ) -> StoreResult<()> {
        let keep: BTreeSet<PathBuf> = products
            .iter()
            .map(|&id| self.product_path(id))
            .chain(reviewed.iter().map(|&id| self.review_path(id)))
            .collect();

        let listing = fs::read_dir(&self.data_dir).map_err(|e| StoreError::io(&self.data_dir, e))?;
        for path in listing.filter_map(|entry| entry.ok()).map(|entry| entry.path()) {
            if keep.contains(&path) || !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            let stale = name.starts_with(&self.files.product_prefix)
                || self.files.review_file_id(name).is_some();
            if !stale {
                continue;
            }

            match fs::remove_file(&path) {
                Ok(()) => debug!(?path, "Removed stale catalog file"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(StoreError::io(&path, e)),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::ProductRepository;
    use chrono::NaiveDate;
    use shopfront_core::{Money, Rating};

    fn files_in(dir: &Path) -> CatalogFiles {
        CatalogFiles::new(&StoreConfig::with_root(dir))
    }

    #[test]
    fn test_paths() {
        let files = files_in(Path::new("/srv/shop"));
        assert_eq!(files.product_path(7), Path::new("/srv/shop/data/product7.txt"));
        assert_eq!(files.review_path(7), Path::new("/srv/shop/data/reviews7.txt"));
        assert_eq!(
            files.report_path(7, "bob").unwrap(),
            Path::new("/srv/shop/reports/product7_bob_report.txt")
        );
        assert!(files.report_path(7, "../bob").is_err());
    }

    #[test]
    fn test_missing_data_folder_is_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let files = files_in(dir.path());
        assert!(files.load_catalog().unwrap().is_empty());
    }

    #[test]
    fn test_load_skips_bad_files_and_lines() {
        let dir = tempfile::tempdir().unwrap();
        let files = files_in(dir.path());
        let data = files.data_dir().to_path_buf();
        fs::create_dir_all(&data).unwrap();

        fs::write(data.join("product101.txt"), "F,101,Cake,3.99,0,2025-10-25\nignored\n").unwrap();
        fs::write(data.join("product102.txt"), "D,102,Tea,1.99,0\n").unwrap();
        fs::write(data.join("product103.txt"), "X,103,Mystery,1.00,0\n").unwrap();
        fs::write(data.join("product104.txt"), "F,104,Milk,0.99,0,not-a-date\n").unwrap();
        fs::write(data.join("product105.txt"), "").unwrap();
        fs::write(data.join("notes.txt"), "D,106,Hidden,1.00,0\n").unwrap();
        fs::write(
            data.join("reviews101.txt"),
            "4,Rather good\nnine,broken\n\n5,Best cake, ever\n7,out of range\n",
        )
        .unwrap();

        let entries = files.load_catalog().unwrap();
        let ids: Vec<_> = entries.iter().map(|(p, _)| p.id()).collect();
        assert_eq!(ids, vec![101, 102]);

        let (_, cake_reviews) = &entries[0];
        assert_eq!(cake_reviews.len(), 2);
        assert_eq!(cake_reviews[1].comment, "Best cake, ever");
        assert!(entries[1].1.is_empty());
    }

    #[test]
    fn test_save_then_load_preserves_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let files = files_in(dir.path());

        let repo = ProductRepository::new();
        repo.create_food(
            101,
            "Cake, chocolate",
            Money::from_cents(399),
            Rating::NotRated,
            NaiveDate::from_ymd_opt(2025, 10, 25).unwrap(),
        )
        .unwrap();
        repo.create_drink(102, "Tea", Money::from_cents(199), Rating::NotRated)
            .unwrap();
        repo.review_product(101, Rating::FiveStar, "Rich, dense").unwrap();
        repo.review_product(101, Rating::TwoStar, "too sweet").unwrap();

        assert_eq!(repo.save_all(&files).unwrap(), 2);
        assert!(!files.review_path(102).exists());

        let loaded = ProductRepository::new();
        assert_eq!(loaded.load_all(&files).unwrap(), 2);

        let before = repo.entries();
        let after = loaded.entries();
        assert_eq!(before.len(), after.len());
        for ((p1, r1), (p2, r2)) in before.iter().zip(after.iter()) {
            assert!(p1.same_values(p2));
            assert_eq!(r1, r2);
        }
    }

    #[test]
    fn test_load_replaces_existing_contents() {
        let dir = tempfile::tempdir().unwrap();
        let files = files_in(dir.path());
        fs::create_dir_all(files.data_dir()).unwrap();
        fs::write(files.product_path(5), "D,5,Water,0.50,0\n").unwrap();

        let repo = ProductRepository::new();
        repo.create_drink(1, "Old", Money::from_cents(100), Rating::NotRated)
            .unwrap();
        repo.load_all(&files).unwrap();

        assert_eq!(repo.len(), 1);
        assert_eq!(repo.find_product(5).unwrap().name(), "Water");
        assert!(repo.find_product(1).is_err());
    }

    #[test]
    fn test_custom_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = StoreConfig::with_root(dir.path());
        config.format.delimiter = ';';
        let files = CatalogFiles::new(&config);

        fs::create_dir_all(files.data_dir()).unwrap();
        fs::write(files.product_path(9), "D;9;Juice, orange;2.50;0\n").unwrap();

        let entries = files.load_catalog().unwrap();
        assert_eq!(entries[0].0.name(), "Juice, orange");
    }

    #[test]
    fn test_save_keeps_first_product_per_id() {
        let dir = tempfile::tempdir().unwrap();
        let files = files_in(dir.path());

        let repo = ProductRepository::new();
        repo.create_drink(7, "Banana", Money::from_cents(120), Rating::NotRated)
            .unwrap();
        repo.create_drink(7, "Apple", Money::from_cents(90), Rating::NotRated)
            .unwrap();
        repo.review_product(7, Rating::FourStar, "crisp").unwrap();

        assert_eq!(repo.save_all(&files).unwrap(), 1);

        let entries = files.load_catalog().unwrap();
        assert_eq!(entries.len(), 1);
        let (product, reviews) = &entries[0];
        assert_eq!(product.name(), "Apple");
        assert_eq!(product.rating(), Rating::FourStar);
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].comment, "crisp");
    }

    #[test]
    fn test_removed_product_stays_removed_after_save() {
        let dir = tempfile::tempdir().unwrap();
        let files = files_in(dir.path());

        let repo = ProductRepository::new();
        repo.create_drink(1, "Tea", Money::from_cents(199), Rating::NotRated)
            .unwrap();
        repo.create_drink(2, "Coffee", Money::from_cents(249), Rating::NotRated)
            .unwrap();
        repo.review_product(1, Rating::ThreeStar, "fine").unwrap();
        repo.save_all(&files).unwrap();
        assert!(files.review_path(1).exists());

        fs::write(files.data_dir().join("notes.txt"), "keep me").unwrap();
        assert!(repo.remove_product(1));
        repo.save_all(&files).unwrap();

        assert!(!files.product_path(1).exists());
        assert!(!files.review_path(1).exists());
        assert!(files.data_dir().join("notes.txt").exists());

        let loaded = ProductRepository::new();
        assert_eq!(loaded.load_all(&files).unwrap(), 1);
        assert!(loaded.find_product(1).is_err());
        assert_eq!(loaded.find_product(2).unwrap().name(), "Coffee");
    }
}
