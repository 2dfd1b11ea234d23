//! # shopfront-store: Repository Layer for Shopfront
//!
//! This crate owns the shared product catalog and everything that touches
//! the file system: catalog files, reports, snapshots and configuration.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Data Flow                              │
//! │                                                                         │
//! │  Client thread (review_product, write_product_report)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 shopfront-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  Repository   │    │    Locale     │    │   Storage    │  │   │
//! │  │   │ (product.rs)  │    │  (locale.rs)  │    │ (storage.rs) │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ RwLock<Map>   │───►│ Currency      │    │ data/*.txt   │  │   │
//! │  │   │ Reports       │    │ Dates         │    │ reports/     │  │   │
//! │  │   │               │    │ Messages      │    │ temp/*.tmp   │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              shopfront-core (types + line codec)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`repository`] - The locked catalog, reviews and reports
//! - [`locale`] - Locale-aware currency, date and message formatting
//! - [`storage`] - Catalog text files in the data folder
//! - [`snapshot`] - JSON dump/restore through the temp folder
//! - [`config`] - Folders, file names, delimiter, default locale
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shopfront_store::{CatalogFiles, ProductRepository, StoreConfig};
//! use shopfront_store::locale::ResourceFormatter;
//!
//! # fn main() -> shopfront_store::error::StoreResult<()> {
//! let config = StoreConfig::load(None)?;
//! let files = CatalogFiles::new(&config);
//!
//! let repo = ProductRepository::new();
//! repo.load_all(&files)?;
//!
//! let summary = repo.discount_summary(&ResourceFormatter::new(config.default_locale()));
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod locale;
pub mod repository;
pub mod snapshot;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use locale::{Locale, ResourceFormatter};
pub use repository::{Entry, ProductRepository};
pub use storage::CatalogFiles;
