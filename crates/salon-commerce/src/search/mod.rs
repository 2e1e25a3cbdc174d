//! Search module.
//!
//! Contains the catalog filter state and sort options.

mod filter;
mod sort;

pub use filter::{FilterState, CATEGORY_PARAM, SEARCH_PARAM, SORT_PARAM};
pub use sort::SortOption;
