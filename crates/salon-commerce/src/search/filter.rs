//! Catalog filter state and its two projections: the page's query string and
//! the product API's query parameters.

use crate::catalog::ProductCategory;
use crate::search::SortOption;
use serde::{Deserialize, Serialize};

/// Query-string key for the category filter.
pub const CATEGORY_PARAM: &str = "category";
/// Query-string key for the free-text search.
pub const SEARCH_PARAM: &str = "search";
/// API key for the sort order.
pub const SORT_PARAM: &str = "sortBy";

/// The catalog's filter state.
///
/// Category and search round-trip through the page query string. Sort does
/// not: it is sent to the API but lives only as long as the view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub category: ProductCategory,
    pub search: String,
    pub sort: SortOption,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild filter state from decoded query-string pairs.
    ///
    /// Unknown categories fall back to "all". A `sortBy` pair, if present, is
    /// ignored.
    pub fn from_query_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut state = Self::default();
        for (key, value) in pairs {
            match key.as_ref() {
                CATEGORY_PARAM => state.category = ProductCategory::parse_or_all(value.as_ref()),
                SEARCH_PARAM => state.search = value.as_ref().to_string(),
                _ => {}
            }
        }
        state
    }

    /// Pairs to write back to the page query string. Defaults are omitted.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if !self.category.is_all() {
            pairs.push((CATEGORY_PARAM, self.category.as_str().to_string()));
        }
        if !self.search.is_empty() {
            pairs.push((SEARCH_PARAM, self.search.clone()));
        }
        pairs
    }

    /// Parameters for `GET /products`. `sortBy` is always sent.
    pub fn api_params(&self) -> Vec<(&'static str, String)> {
        let mut params = self.to_query_pairs();
        params.push((SORT_PARAM, self.sort.as_str().to_string()));
        params
    }

    /// True when category or search narrow the listing.
    pub fn has_active_filters(&self) -> bool {
        !self.category.is_all() || !self.search.is_empty()
    }
}
