//! Product categories shown in the catalog filter bar.
//!
//! The set is fixed. Each entry carries its display metadata so views never
//! keep their own label/icon lookup tables.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A catalog category filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    /// No category restriction.
    #[default]
    All,
    HairCare,
    Skincare,
    Makeup,
    Nails,
    Fragrance,
    Tools,
}

/// Display metadata for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
    /// Identifier used on the wire and in the query string.
    pub id: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Emoji icon rendered next to the label.
    pub icon: &'static str,
    /// Accent colour (CSS hex).
    pub color: &'static str,
}

const CATEGORY_TABLE: [(ProductCategory, CategoryInfo); 7] = [
    (
        ProductCategory::All,
        CategoryInfo { id: "all", label: "All Products", icon: "\u{2728}", color: "#6b7280" },
    ),
    (
        ProductCategory::HairCare,
        CategoryInfo { id: "haircare", label: "Hair Care", icon: "\u{1f487}", color: "#8b5cf6" },
    ),
    (
        ProductCategory::Skincare,
        CategoryInfo { id: "skincare", label: "Skincare", icon: "\u{1f9f4}", color: "#ec4899" },
    ),
    (
        ProductCategory::Makeup,
        CategoryInfo { id: "makeup", label: "Makeup", icon: "\u{1f484}", color: "#ef4444" },
    ),
    (
        ProductCategory::Nails,
        CategoryInfo { id: "nails", label: "Nail Care", icon: "\u{1f485}", color: "#f59e0b" },
    ),
    (
        ProductCategory::Fragrance,
        CategoryInfo { id: "fragrance", label: "Fragrance", icon: "\u{1f338}", color: "#10b981" },
    ),
    (
        ProductCategory::Tools,
        CategoryInfo {
            id: "tools",
            label: "Tools & Accessories",
            icon: "\u{2702}\u{fe0f}",
            color: "#3b82f6",
        },
    ),
];

impl ProductCategory {
    /// Every category in filter-bar order.
    pub const ALL: [ProductCategory; 7] = [
        ProductCategory::All,
        ProductCategory::HairCare,
        ProductCategory::Skincare,
        ProductCategory::Makeup,
        ProductCategory::Nails,
        ProductCategory::Fragrance,
        ProductCategory::Tools,
    ];

    /// Look up a category by id, if it is one of the known ones.
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        CATEGORY_TABLE
            .iter()
            .find(|(_, info)| info.id == id)
            .map(|(category, _)| *category)
    }

    /// Look up a category by id, falling back to [`ProductCategory::All`].
    pub fn parse_or_all(id: &str) -> Self {
        Self::from_id(id).unwrap_or_default()
    }

    /// Display metadata for this category.
    pub fn info(&self) -> &'static CategoryInfo {
        CATEGORY_TABLE
            .iter()
            .find(|(category, _)| category == self)
            .map(|(_, info)| info)
            .unwrap_or(&CATEGORY_TABLE[0].1)
    }

    pub fn as_str(&self) -> &'static str {
        self.info().id
    }

    pub fn label(&self) -> &'static str {
        self.info().label
    }

    pub fn is_all(&self) -> bool {
        *self == ProductCategory::All
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Category metadata as served by `GET /products/categories`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub product_count: u32,
}

impl CategorySummary {
    /// The local category this summary maps onto, if any.
    pub fn category(&self) -> Option<ProductCategory> {
        ProductCategory::from_id(&self.id)
    }
}
