//! # shopfront-core: Pure Catalog Logic for Shopfront
//!
//! This crate holds the catalog's value types and the text record codec as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Callers (shop binary, client threads)          │   │
//! │  │     create_product ──► review_product ──► product_report        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 shopfront-store (Repository Layer)              │   │
//! │  │        RwLock<product → reviews>, reports, files, locale        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ shopfront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  rating  │ │ product  │ │  codec   │ │  money   │          │   │
//! │  │   │  Rating  │ │ Product  │ │LineCodec │ │  Money   │          │   │
//! │  │   │  Review  │ │   Kind   │ │          │ │          │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOCKS • NO LOGGING • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`rating`] - The six-level star scale
//! - [`review`] - Customer reviews and their ordering
//! - [`product`] - Immutable products (Food / Drink)
//! - [`money`] - Integer-cent money with half-up rounding
//! - [`codec`] - Product and review text records
//! - [`validation`] - Input checks before a product is stored
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use shopfront_core::codec::LineCodec;
//! use shopfront_core::{Money, Rating};
//!
//! let codec = LineCodec::default();
//! let cake = codec.parse_product("F,101,Cake,3.99,0,2025-10-25").unwrap();
//!
//! assert_eq!(cake.discount(), Money::from_cents(40));
//! assert_eq!(cake.with_rating(Rating::FourStar).rating().stars(), "★★★★☆");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod codec;
pub mod error;
pub mod money;
pub mod product;
pub mod rating;
pub mod review;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use codec::LineCodec;
pub use error::{CoreError, CoreResult, ParseError, ValidationError};
pub use money::Money;
pub use product::{Product, ProductId, ProductKind, DISCOUNT_RATE_BPS};
pub use rating::Rating;
pub use review::Review;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Longest product name accepted by validation, in characters.
pub const MAX_NAME_LENGTH: usize = 200;
