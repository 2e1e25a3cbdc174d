//! Product catalog module.
//!
//! Contains the product entity, the category table, and the client-side
//! liked-products set.

mod category;
mod liked;
mod product;

pub use category::{CategoryInfo, CategorySummary, ProductCategory};
pub use liked::LikedProducts;
pub use product::{Product, ProductFlags, RawProduct, Review};
