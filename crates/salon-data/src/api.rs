//! The remote product API.
//!
//! Responses are parsed at this boundary: list endpoints keep every entry
//! that validates and report the rest as [`ShapeDiagnostic`]s, so a view can
//! log them without failing the page.

use crate::{ApiError, FetchClient, Response, Transport};
use async_trait::async_trait;
use salon_commerce::catalog::{CategorySummary, Product, ProductCategory};
use salon_commerce::search::FilterState;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

/// A shape problem found while parsing an otherwise successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeDiagnostic {
    /// The body was valid JSON but not an array.
    NotAList {
        endpoint: String,
        found: &'static str,
    },
    /// One array entry failed validation and was skipped.
    InvalidEntry {
        endpoint: String,
        index: usize,
        reason: String,
    },
}

impl ShapeDiagnostic {
    pub fn endpoint(&self) -> &str {
        match self {
            ShapeDiagnostic::NotAList { endpoint, .. } => endpoint,
            ShapeDiagnostic::InvalidEntry { endpoint, .. } => endpoint,
        }
    }
}

impl fmt::Display for ShapeDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeDiagnostic::NotAList { endpoint, found } => {
                write!(f, "{}: expected a list, got {}", endpoint, found)
            }
            ShapeDiagnostic::InvalidEntry {
                endpoint,
                index,
                reason,
            } => write!(f, "{}: skipped entry {}: {}", endpoint, index, reason),
        }
    }
}

/// A parsed value plus the shape problems met on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub diagnostics: Vec<ShapeDiagnostic>,
}

impl<T> Parsed<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            diagnostics: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<U> {
        Parsed {
            value: f(self.value),
            diagnostics: self.diagnostics,
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse a list payload with a per-entry decoder.
fn parse_list<T>(
    endpoint: &str,
    payload: &Value,
    mut decode: impl FnMut(&Value) -> Result<T, String>,
) -> Parsed<Vec<T>> {
    let Value::Array(entries) = payload else {
        return Parsed {
            value: Vec::new(),
            diagnostics: vec![ShapeDiagnostic::NotAList {
                endpoint: endpoint.to_string(),
                found: json_kind(payload),
            }],
        };
    };

    let mut value = Vec::with_capacity(entries.len());
    let mut diagnostics = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        match decode(entry) {
            Ok(item) => value.push(item),
            Err(reason) => diagnostics.push(ShapeDiagnostic::InvalidEntry {
                endpoint: endpoint.to_string(),
                index,
                reason,
            }),
        }
    }
    Parsed { value, diagnostics }
}

/// Parse a product list payload. Non-arrays become an empty list.
pub fn parse_product_list(endpoint: &str, payload: &Value) -> Parsed<Vec<Product>> {
    parse_list(endpoint, payload, |entry| {
        Product::from_json(entry).map_err(|e| e.to_string())
    })
}

fn parse_typed_list<T: DeserializeOwned>(endpoint: &str, payload: &Value) -> Parsed<Vec<T>> {
    parse_list(endpoint, payload, |entry| {
        serde_json::from_value(entry.clone()).map_err(|e| e.to_string())
    })
}

/// Operations the storefront needs from the product service.
#[async_trait(?Send)]
pub trait ProductApi {
    /// `GET /products` with the filter's category, search and sort.
    async fn list_products(&self, filters: &FilterState) -> Result<Parsed<Vec<Product>>, ApiError>;

    /// `GET /products/{slug}`. Unknown slugs yield [`ApiError::ProductNotFound`].
    async fn get_product(&self, slug: &str) -> Result<Product, ApiError>;

    async fn featured_products(&self) -> Result<Parsed<Vec<Product>>, ApiError>;

    async fn popular_products(&self) -> Result<Parsed<Vec<Product>>, ApiError>;

    async fn new_arrivals(&self) -> Result<Parsed<Vec<Product>>, ApiError>;

    async fn on_sale_products(&self) -> Result<Parsed<Vec<Product>>, ApiError>;

    async fn products_by_category(
        &self,
        category: ProductCategory,
    ) -> Result<Parsed<Vec<Product>>, ApiError>;

    /// Distinct brand names.
    async fn brands(&self) -> Result<Parsed<Vec<String>>, ApiError>;

    /// Category metadata with product counts.
    async fn categories(&self) -> Result<Parsed<Vec<CategorySummary>>, ApiError>;
}

/// [`ProductApi`] over HTTP.
pub struct HttpProductApi<T: Transport> {
    client: FetchClient<T>,
}

impl<T: Transport> HttpProductApi<T> {
    pub fn new(client: FetchClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &FetchClient<T> {
        &self.client
    }

    async fn fetch_json(&self, path: &str, params: &[(&str, String)]) -> Result<Value, ApiError> {
        let response = self
            .client
            .get(path)
            .query(params.iter().map(|(k, v)| (*k, v.as_str())))
            .accept("application/json")
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<Value>()?)
    }

    async fn fetch_products(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Parsed<Vec<Product>>, ApiError> {
        let payload = self.fetch_json(path, params).await?;
        Ok(parse_product_list(path, &payload))
    }
}

/// True when a successful response still says the product does not exist.
fn is_not_found_body(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Object(map) if !map.contains_key("slug") => ["message", "error"]
            .iter()
            .filter_map(|key| map.get(*key).and_then(Value::as_str))
            .any(|msg| msg.eq_ignore_ascii_case("product not found")),
        _ => false,
    }
}

fn check_product_response(slug: &str, response: Response) -> Result<Value, ApiError> {
    if response.is_not_found() {
        return Err(ApiError::ProductNotFound(slug.to_string()));
    }
    let payload: Value = response.error_for_status()?.json()?;
    if is_not_found_body(&payload) {
        return Err(ApiError::ProductNotFound(slug.to_string()));
    }
    Ok(payload)
}

#[async_trait(?Send)]
impl<T: Transport> ProductApi for HttpProductApi<T> {
    async fn list_products(&self, filters: &FilterState) -> Result<Parsed<Vec<Product>>, ApiError> {
        self.fetch_products("/products", &filters.api_params()).await
    }

    async fn get_product(&self, slug: &str) -> Result<Product, ApiError> {
        let path = format!("/products/{}", crate::query::encode_component(slug));
        let response = self
            .client
            .get(path)
            .accept("application/json")
            .send()
            .await?;
        let payload = check_product_response(slug, response)?;
        Product::from_json(&payload).map_err(|e| ApiError::Malformed(e.to_string()))
    }

    async fn featured_products(&self) -> Result<Parsed<Vec<Product>>, ApiError> {
        self.fetch_products("/products/featured", &[]).await
    }

    async fn popular_products(&self) -> Result<Parsed<Vec<Product>>, ApiError> {
        self.fetch_products("/products/popular", &[]).await
    }

    async fn new_arrivals(&self) -> Result<Parsed<Vec<Product>>, ApiError> {
        self.fetch_products("/products/new-arrivals", &[]).await
    }

    async fn on_sale_products(&self) -> Result<Parsed<Vec<Product>>, ApiError> {
        self.fetch_products("/products/on-sale", &[]).await
    }

    async fn products_by_category(
        &self,
        category: ProductCategory,
    ) -> Result<Parsed<Vec<Product>>, ApiError> {
        let path = format!("/products/category/{}", category.as_str());
        self.fetch_products(&path, &[]).await
    }

    async fn brands(&self) -> Result<Parsed<Vec<String>>, ApiError> {
        let payload = self.fetch_json("/products/brands", &[]).await?;
        Ok(parse_typed_list("/products/brands", &payload))
    }

    async fn categories(&self) -> Result<Parsed<Vec<CategorySummary>>, ApiError> {
        let payload = self.fetch_json("/products/categories", &[]).await?;
        Ok(parse_typed_list("/products/categories", &payload))
    }
}
