//! # Repository Module
//!
//! The shared product catalog and the read-only views built on it.
//!
//! ## Lock Roles
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One RwLock, Two Roles                                │
//! │                                                                         │
//! │  Client threads (Arc<ProductRepository>)                               │
//! │       │                                                                 │
//! │       ├── write lock (exclusive)                                       │
//! │       │   ├── create_product / create_food / create_drink              │
//! │       │   ├── review_product                                           │
//! │       │   └── remove_product / clear / replace_all                     │
//! │       │                                                                 │
//! │       └── read lock (shared)                                           │
//! │           ├── find_product / reviews / entries                         │
//! │           └── list_products / discount_summary / product_report        │
//! │                                                                         │
//! │  No file I/O happens while either lock is held.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`product`] - [`ProductRepository`] and its write path
//! - [`report`] - Listing, discount summary and per-product reports

pub mod product;
pub mod report;

pub use product::{Entry, ProductRepository};
