//! # Reports and Queries
//!
//! Read-only views over the catalog. Each one copies what it needs under the
//! read lock and formats after the lock is released.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{debug, info};

use shopfront_core::review::sort_by_rating;
use shopfront_core::{Money, Product, ProductId};

use crate::error::{StoreError, StoreResult};
use crate::locale::ResourceFormatter;
use crate::repository::ProductRepository;
use crate::storage::CatalogFiles;

impl ProductRepository {
    /// Products matching `filter`, stably sorted by `sorter`.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::{Money, Rating};
    /// use shopfront_store::ProductRepository;
    ///
    /// let repo = ProductRepository::new();
    /// repo.create_drink(1, "Tea", Money::from_cents(199), Rating::NotRated).unwrap();
    /// repo.create_drink(2, "Juice", Money::from_cents(299), Rating::NotRated).unwrap();
    ///
    /// let cheap = repo.list_products(|p| p.price() < Money::from_cents(250), |a, b| a.name().cmp(b.name()));
    /// assert_eq!(cheap.len(), 1);
    /// ```
    pub fn list_products<F, S>(&self, filter: F, sorter: S) -> Vec<Product>
    where
        F: Fn(&Product) -> bool,
        S: FnMut(&Product, &Product) -> Ordering,
    {
        let mut listed: Vec<Product> = self
            .products
            .read()
            .keys()
            .filter(|p| filter(p))
            .cloned()
            .collect();
        listed.sort_by(sorter);
        listed
    }

    /// [`list_products`](Self::list_products), one formatted line per product.
    pub fn print_products<F, S>(&self, filter: F, sorter: S, formatter: &ResourceFormatter) -> String
    where
        F: Fn(&Product) -> bool,
        S: FnMut(&Product, &Product) -> Ordering,
    {
        self.list_products(filter, sorter)
            .iter()
            .map(|p| formatter.format_product(p) + "\n")
            .collect()
    }

    /// Total discount per rating glyph, formatted in the formatter's currency.
    pub fn discount_summary(&self, formatter: &ResourceFormatter) -> BTreeMap<String, String> {
        let mut totals: BTreeMap<&'static str, Money> = BTreeMap::new();
        for product in self.products.read().keys() {
            *totals.entry(product.rating().stars()).or_default() += product.discount();
        }

        totals
            .into_iter()
            .map(|(stars, total)| (stars.to_string(), formatter.format_currency(total)))
            .collect()
    }

    /// Product line followed by its reviews, lowest rating first.
    pub fn product_report(&self, id: ProductId, formatter: &ResourceFormatter) -> StoreResult<String> {
        let (product, mut reviews) = self.find_entry(id).map_err(|e| {
            info!(id = %id, "Report skipped: product not found");
            e
        })?;

        let mut out = formatter.format_product(&product);
        out.push('\n');

        if reviews.is_empty() {
            out.push_str(formatter.localized_no_reviews());
            out.push('\n');
        } else {
            sort_by_rating(&mut reviews);
            for review in &reviews {
                out.push_str(&formatter.format_review(review));
                out.push('\n');
            }
        }

        Ok(out)
    }

    /// Renders the report in `locale_tag` and writes it to the reports folder.
    pub fn write_product_report(
        &self,
        id: ProductId,
        locale_tag: &str,
        client: &str,
        files: &CatalogFiles,
    ) -> StoreResult<PathBuf> {
        let path = files.report_path(id, client)?;
        let formatter = ResourceFormatter::for_tag(locale_tag);
        let report = self.product_report(id, &formatter)?;

        let dir = files.reports_dir();
        std::fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
        std::fs::write(&path, report).map_err(|e| StoreError::io(&path, e))?;

        debug!(id = %id, client = %client, locale = %formatter.locale(), ?path, "Report written");
        Ok(path)
    }
}
