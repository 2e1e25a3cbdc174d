//! Sort options for the product catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort order requested from the product API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOption {
    /// Best sellers first (default).
    #[default]
    Popular,
    /// Newest arrivals first.
    Newest,
    /// Price, low to high.
    PriceLow,
    /// Price, high to low.
    PriceHigh,
    /// Highest rated first.
    Rating,
    /// Name A-Z.
    Name,
}

impl SortOption {
    /// Every option in dropdown order.
    pub const ALL: [SortOption; 6] = [
        SortOption::Popular,
        SortOption::Newest,
        SortOption::PriceLow,
        SortOption::PriceHigh,
        SortOption::Rating,
        SortOption::Name,
    ];

    /// Wire identifier (`sortBy` value).
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Popular => "popular",
            SortOption::Newest => "newest",
            SortOption::PriceLow => "price-low",
            SortOption::PriceHigh => "price-high",
            SortOption::Rating => "rating",
            SortOption::Name => "name",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Popular => "Most Popular",
            SortOption::Newest => "Newest First",
            SortOption::PriceLow => "Price: Low to High",
            SortOption::PriceHigh => "Price: High to Low",
            SortOption::Rating => "Highest Rated",
            SortOption::Name => "Name: A to Z",
        }
    }

    pub fn from_id(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.as_str() == s.trim())
    }

    /// Parse a wire id, falling back to [`SortOption::Popular`].
    pub fn parse_or_default(s: &str) -> Self {
        Self::from_id(s).unwrap_or_default()
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_ids() {
        assert_eq!(SortOption::from_id("price-high"), Some(SortOption::PriceHigh));
        assert_eq!(SortOption::parse_or_default("cheapest"), SortOption::Popular);
        assert_eq!(SortOption::default().as_str(), "popular");
    }
}
