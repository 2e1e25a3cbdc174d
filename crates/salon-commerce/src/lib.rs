//! Storefront domain types for the salon shop.
//!
//! This crate holds the pure, I/O-free part of the storefront:
//!
//! - **Catalog**: validated products, the category table, the liked set
//! - **Search**: catalog filter state and sort options
//! - **Blog**: posts, tag sets, and admin list filtering
//!
//! # Example
//!
//! ```rust
//! use salon_commerce::prelude::*;
//!
//! let filters = FilterState::from_query_pairs([("category", "skincare")]);
//! assert_eq!(filters.category, ProductCategory::Skincare);
//!
//! let mut tags = TagSet::new();
//! tags.add("Summer").unwrap();
//! assert!(tags.add("summer").is_err());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod blog;
pub mod catalog;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        CategoryInfo, CategorySummary, LikedProducts, Product, ProductCategory, ProductFlags,
        Review,
    };

    // Search
    pub use crate::search::{FilterState, SortOption};

    // Blog
    pub use crate::blog::{
        BlogCategory, BlogPost, PostFilter, PostMetrics, PostStats, PostStatus, TagSet,
    };
}
