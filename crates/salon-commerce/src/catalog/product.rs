//! Product types and boundary validation.
//!
//! The product API is not schema-checked upstream, so payloads are decoded
//! into a permissive [`RawProduct`] first and then validated into a
//! [`Product`]. Views only ever see validated products.

use crate::catalog::ProductCategory;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Independent display flags. Not mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductFlags {
    pub featured: bool,
    pub popular: bool,
    pub on_sale: bool,
    pub new_arrival: bool,
}

/// A customer review shown on the detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub date: Option<String>,
}

/// A product as sent by the API, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default, rename = "_id")]
    pub document_id: Option<serde_json::Value>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    // Plain and `is`-prefixed flag spellings may both be present.
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub is_featured: Option<bool>,
    #[serde(default)]
    pub popular: Option<bool>,
    #[serde(default)]
    pub is_popular: Option<bool>,
    #[serde(default)]
    pub on_sale: Option<bool>,
    #[serde(default)]
    pub is_on_sale: Option<bool>,
    #[serde(default)]
    pub new_arrival: Option<bool>,
    #[serde(default)]
    pub is_new_arrival: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub how_to_use: Option<String>,
    #[serde(default)]
    pub reviews: Option<Vec<Review>>,
}

/// A validated product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    /// URL-safe routing key (unique).
    pub slug: String,
    pub name: String,
    pub brand: String,
    /// Category id as sent by the API.
    pub category: String,
    pub price: Money,
    /// Pre-discount price. Never below `price`.
    pub original_price: Option<Money>,
    /// Average rating, 0.0 to 5.0.
    pub rating: f64,
    pub review_count: u32,
    /// Image URLs in gallery order.
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub stock_quantity: u32,
    pub flags: ProductFlags,
    pub description: String,
    pub ingredients: Vec<String>,
    pub how_to_use: Option<String>,
    pub reviews: Vec<Review>,
}

impl Product {
    /// Create a minimal product, mostly useful for fixtures.
    pub fn new(
        id: impl Into<ProductId>,
        slug: impl Into<String>,
        name: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            name: name.into(),
            brand: String::new(),
            category: ProductCategory::All.as_str().to_string(),
            price,
            original_price: None,
            rating: 0.0,
            review_count: 0,
            images: Vec::new(),
            features: Vec::new(),
            stock_quantity: 0,
            flags: ProductFlags::default(),
            description: String::new(),
            ingredients: Vec::new(),
            how_to_use: None,
            reviews: Vec::new(),
        }
    }

    /// Decode and validate a single JSON value.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, CommerceError> {
        let raw: RawProduct = serde_json::from_value(value.clone())
            .map_err(|e| CommerceError::invalid_product(None, e.to_string()))?;
        Product::try_from(raw)
    }

    /// The local category, if the API's category id is a known one.
    pub fn category_kind(&self) -> Option<ProductCategory> {
        ProductCategory::from_id(&self.category)
    }

    /// On sale when flagged, or when priced below its original price.
    pub fn is_on_sale(&self) -> bool {
        self.flags.on_sale || self.discount_percentage().is_some()
    }

    /// Whole-percent discount against the original price.
    pub fn discount_percentage(&self) -> Option<u8> {
        self.original_price
            .as_ref()
            .and_then(|original| self.price.savings_percent(original))
    }

    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    /// First gallery image, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Rating rounded to the nearest half star, for star widgets.
    pub fn rating_half_stars(&self) -> u8 {
        (self.rating * 2.0).round().clamp(0.0, 10.0) as u8
    }

    /// Builder: set the original price.
    pub fn with_original_price(mut self, original: Money) -> Self {
        self.original_price = Some(original);
        self
    }

    /// Builder: set the stock quantity.
    pub fn with_stock(mut self, quantity: u32) -> Self {
        self.stock_quantity = quantity;
        self
    }

    /// Builder: set the gallery images.
    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    /// Builder: set the category id.
    pub fn with_category(mut self, category: ProductCategory) -> Self {
        self.category = category.as_str().to_string();
        self
    }
}

impl TryFrom<RawProduct> for Product {
    type Error = CommerceError;

    fn try_from(raw: RawProduct) -> Result<Self, Self::Error> {
        let slug = raw.slug.map(|s| s.trim().to_string()).unwrap_or_default();
        if slug.is_empty() {
            return Err(CommerceError::invalid_product(None, "missing slug"));
        }
        let invalid = |reason: &str| CommerceError::invalid_product(Some(&slug), reason);

        let id = match raw.id.or(raw.document_id) {
            Some(serde_json::Value::String(s)) if !s.is_empty() => ProductId::new(s),
            Some(serde_json::Value::Number(n)) => ProductId::new(n.to_string()),
            _ => return Err(invalid("missing id")),
        };

        let name = raw.name.unwrap_or_default();
        if name.trim().is_empty() {
            return Err(invalid("missing name"));
        }

        let price = match raw.price {
            Some(p) if p.is_finite() && p >= 0.0 => Money::from_decimal(p, Currency::USD),
            Some(_) => return Err(invalid("price must be a non-negative number")),
            None => return Err(invalid("missing price")),
        };

        let original_price = match raw.original_price {
            Some(p) if p.is_finite() && p >= 0.0 => Some(Money::from_decimal(p, Currency::USD)),
            Some(_) => return Err(invalid("original price must be a non-negative number")),
            None => None,
        };
        if let Some(original) = &original_price {
            if price.try_cmp(original) == Some(Ordering::Greater) {
                return Err(invalid("price exceeds original price"));
            }
        }

        Ok(Product {
            id,
            slug,
            name,
            brand: raw.brand.unwrap_or_default(),
            category: raw
                .category
                .unwrap_or_else(|| ProductCategory::All.as_str().to_string()),
            price,
            original_price,
            rating: raw.rating.filter(|r| r.is_finite()).unwrap_or(0.0).clamp(0.0, 5.0),
            review_count: raw.review_count.unwrap_or(0),
            images: raw.images.unwrap_or_default(),
            features: raw.features.unwrap_or_default(),
            stock_quantity: raw.stock_quantity.unwrap_or(0).clamp(0, u32::MAX as i64) as u32,
            flags: ProductFlags {
                featured: either_flag(raw.featured, raw.is_featured),
                popular: either_flag(raw.popular, raw.is_popular),
                on_sale: either_flag(raw.on_sale, raw.is_on_sale),
                new_arrival: either_flag(raw.new_arrival, raw.is_new_arrival),
            },
            description: raw.description.unwrap_or_default(),
            ingredients: raw.ingredients.unwrap_or_default(),
            how_to_use: raw.how_to_use.filter(|s| !s.trim().is_empty()),
            reviews: raw.reviews.unwrap_or_default(),
        })
    }
}

fn either_flag(plain: Option<bool>, prefixed: Option<bool>) -> bool {
    plain.unwrap_or(false) || prefixed.unwrap_or(false)
}
