//! Blog content-admin module.
//!
//! Post model, tag normalization, and list filtering for the admin screens.

mod filter;
mod post;
mod tags;

pub use filter::{PostFilter, PostStats};
pub use post::{slugify, BlogCategory, BlogPost, PostMetrics, PostStatus};
pub use tags::TagSet;
