//! Catalog view driven end to end through the HTTP product API.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use salon_commerce::catalog::{CategorySummary, Product, ProductCategory};
use salon_commerce::search::{FilterState, SortOption};
use salon_data::{
    ApiError, FetchClient, HttpProductApi, Parsed, ProductApi, ScriptedTransport,
};
use salon_observability::{LogLevel, StructuredLogger};
use salon_storefront::location::{Location, MemoryLocation};
use salon_storefront::sections::render_catalog;
use salon_storefront::views::catalog::{CatalogView, LoadState, EMPTY_TITLE};
use salon_storefront::ErrorAction;
use serde_json::json;

fn api(transport: ScriptedTransport) -> HttpProductApi<ScriptedTransport> {
    HttpProductApi::new(FetchClient::new(transport).with_base_url("https://api.test"))
}

fn product_json(slug: &str, price: f64) -> serde_json::Value {
    json!({
        "id": slug,
        "slug": slug,
        "name": slug.replace('-', " "),
        "category": "skincare",
        "price": price,
        "stockQuantity": 3
    })
}

#[tokio::test]
async fn test_skincare_empty_result_shows_category_empty_state() {
    let api = api(ScriptedTransport::new().get_json("/products", json!([])));
    let (logger, _) = StructuredLogger::capturing();
    let mut view = CatalogView::mount(
        MemoryLocation::from_url("/products?category=skincare&search="),
        logger,
    );

    assert!(view.refresh(&api).await);

    let sent = api.client().transport().last_sent().unwrap();
    assert_eq!(sent.url(), "https://api.test/products?category=skincare&sortBy=popular");
    assert_eq!(view.location().query(), "category=skincare");

    let empty = view.empty_state().unwrap();
    assert_eq!(empty.title, EMPTY_TITLE);
    assert_eq!(
        empty.message,
        "We don't have any Skincare products right now. Check back soon!"
    );
    assert!(render_catalog(&view).contains("No Products Found"));
}

#[tokio::test]
async fn test_unknown_category_falls_back_to_all() {
    let api = api(ScriptedTransport::new().get_json("/products", json!([product_json("rose-oil", 12.0)])));
    let (logger, _) = StructuredLogger::capturing();
    let mut view = CatalogView::mount(
        MemoryLocation::from_url("/products?category=spaceships&search=rose"),
        logger,
    );

    assert_eq!(view.filters().category, ProductCategory::All);
    assert_eq!(view.location().query(), "search=rose");

    view.refresh(&api).await;
    let sent = api.client().transport().last_sent().unwrap();
    assert_eq!(sent.url(), "https://api.test/products?search=rose&sortBy=popular");
    assert_eq!(view.products().len(), 1);
}

#[tokio::test]
async fn test_non_list_payload_logs_diagnostic_without_error() {
    let api = api(ScriptedTransport::new().get_json("/products", json!({"products": []})));
    let (logger, sink) = StructuredLogger::capturing();
    let mut view = CatalogView::mount(MemoryLocation::new("/products"), logger);

    view.refresh(&api).await;

    assert_eq!(view.state(), LoadState::Loaded);
    assert!(view.products().is_empty());
    assert!(view.error_message().is_none());
    let warnings = sink.at_level(LogLevel::Warn);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].message, "unexpected response shape");
    assert_eq!(
        warnings[0].field("endpoint"),
        Some(&json!("/products"))
    );
}

#[tokio::test]
async fn test_filter_changes_write_query_but_sort_does_not() {
    let api = api(ScriptedTransport::new().get_json("/products", json!([])));
    let (logger, _) = StructuredLogger::capturing();
    let mut view = CatalogView::mount(MemoryLocation::new("/products"), logger);

    let ticket = view.set_category(ProductCategory::Nails).unwrap();
    view.execute(&api, ticket).await;
    let ticket = view.set_search("gel polish").unwrap();
    view.execute(&api, ticket).await;
    assert_eq!(view.location().query(), "category=nails&search=gel+polish");
    let writes = view.location().writes();

    let ticket = view.set_sort(SortOption::PriceHigh).unwrap();
    view.execute(&api, ticket).await;
    assert_eq!(view.location().writes(), writes);

    let sent = api.client().transport().last_sent().unwrap();
    assert_eq!(
        sent.url(),
        "https://api.test/products?category=nails&search=gel+polish&sortBy=price-high"
    );

    assert!(view.set_sort(SortOption::PriceHigh).is_none());
    assert!(view.clear_filters().is_some());
    assert_eq!(view.location().query(), "");
}

/// Answers list requests from a queue, one outcome per call.
struct QueuedApi {
    listings: RefCell<VecDeque<Result<Parsed<Vec<Product>>, ApiError>>>,
}

impl QueuedApi {
    fn new(outcomes: Vec<Result<Parsed<Vec<Product>>, ApiError>>) -> Self {
        Self {
            listings: RefCell::new(outcomes.into()),
        }
    }

    fn empty() -> Parsed<Vec<Product>> {
        Parsed::clean(Vec::new())
    }
}

#[async_trait(?Send)]
impl ProductApi for QueuedApi {
    async fn list_products(&self, _filters: &FilterState) -> Result<Parsed<Vec<Product>>, ApiError> {
        self.listings
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Self::empty()))
    }

    async fn get_product(&self, slug: &str) -> Result<Product, ApiError> {
        Err(ApiError::ProductNotFound(slug.to_string()))
    }

    async fn featured_products(&self) -> Result<Parsed<Vec<Product>>, ApiError> {
        Ok(Self::empty())
    }

    async fn popular_products(&self) -> Result<Parsed<Vec<Product>>, ApiError> {
        Ok(Self::empty())
    }

    async fn new_arrivals(&self) -> Result<Parsed<Vec<Product>>, ApiError> {
        Ok(Self::empty())
    }

    async fn on_sale_products(&self) -> Result<Parsed<Vec<Product>>, ApiError> {
        Ok(Self::empty())
    }

    async fn products_by_category(
        &self,
        _category: ProductCategory,
    ) -> Result<Parsed<Vec<Product>>, ApiError> {
        Ok(Self::empty())
    }

    async fn brands(&self) -> Result<Parsed<Vec<String>>, ApiError> {
        Ok(Parsed::clean(Vec::new()))
    }

    async fn categories(&self) -> Result<Parsed<Vec<CategorySummary>>, ApiError> {
        Ok(Parsed::clean(Vec::new()))
    }
}

#[tokio::test]
async fn test_failure_then_retry_recovers() {
    let serum = Product::from_json(&product_json("glow-serum", 24.99)).unwrap();
    let api = QueuedApi::new(vec![
        Err(ApiError::Network("offline".into())),
        Ok(Parsed::clean(vec![serum])),
    ]);
    let (logger, sink) = StructuredLogger::capturing();
    let mut view = CatalogView::mount(MemoryLocation::new("/products"), logger);

    view.refresh(&api).await;
    assert_eq!(view.state(), LoadState::Failed);
    assert_eq!(view.error_action(), Some(ErrorAction::Retry));
    assert!(render_catalog(&view).contains("Try Again"));

    view.retry(&api).await;
    assert_eq!(view.state(), LoadState::Loaded);
    assert_eq!(view.products().len(), 1);
    assert!(sink.contains("retrying product fetch"));
}

#[tokio::test]
async fn test_stale_response_is_dropped() {
    let api = QueuedApi::new(vec![
        Ok(Parsed::clean(vec![
            Product::from_json(&product_json("new-result", 5.0)).unwrap(),
        ])),
    ]);
    let (logger, _) = StructuredLogger::capturing();
    let mut view = CatalogView::mount(MemoryLocation::new("/products"), logger);

    let first = view.set_category(ProductCategory::HairCare).unwrap();
    let second = view.set_category(ProductCategory::Nails).unwrap();

    assert!(view.execute(&api, second).await);
    assert!(!view.complete_fetch(first, Ok(Parsed::clean(Vec::new()))));
    assert_eq!(view.products()[0].slug, "new-result");
}
