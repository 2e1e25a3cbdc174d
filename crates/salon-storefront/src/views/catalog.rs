//! Catalog view: filter state, query-string sync, and the product list.
//!
//! Every filter change writes category and search back to the page query
//! string and hands out a [`FetchTicket`]. Tickets are numbered; only the
//! most recent one may replace the product list, so a slow response for an
//! old filter can never overwrite a newer one.

use salon_commerce::catalog::{LikedProducts, Product, ProductCategory};
use salon_commerce::ids::ProductId;
use salon_commerce::search::{FilterState, SortOption};
use salon_data::query::{build_query, parse_query};
use salon_data::{ApiError, Parsed, ProductApi};
use salon_observability::StructuredLogger;

use crate::config::DEFAULT_ERROR_MESSAGE;
use crate::location::Location;
use crate::views::{log_diagnostics, ErrorAction};

/// Title of the empty state.
pub const EMPTY_TITLE: &str = "No Products Found";

/// How the catalog is embedded on the page. Decides the error action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayVariant {
    /// Full catalog page; errors offer an in-place retry.
    #[default]
    Standalone,
    /// Catalog inside the home carousel; errors offer a page reload.
    Embedded,
}

impl DisplayVariant {
    pub fn error_action(&self) -> ErrorAction {
        match self {
            DisplayVariant::Standalone => ErrorAction::Retry,
            DisplayVariant::Embedded => ErrorAction::ReloadPage,
        }
    }
}

/// Where the product list stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Permission to replace the product list with one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    filters: FilterState,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Filter snapshot the request must be made with.
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }
}

/// Copy shown when a successful load returns no products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub title: &'static str,
    pub message: String,
}

impl EmptyState {
    pub fn for_filters(filters: &FilterState) -> Self {
        let scope = if filters.category.is_all() {
            String::new()
        } else {
            format!("{} ", filters.category.label())
        };
        let message = if filters.search.is_empty() {
            format!(
                "We don't have any {}products right now. Check back soon!",
                scope
            )
        } else {
            format!("No {}products match \"{}\".", scope, filters.search)
        };
        Self {
            title: EMPTY_TITLE,
            message,
        }
    }
}

/// The catalog view-model.
pub struct CatalogView<L: Location> {
    location: L,
    filters: FilterState,
    products: Vec<Product>,
    state: LoadState,
    liked: LikedProducts,
    variant: DisplayVariant,
    error_message: String,
    issued: u64,
    logger: StructuredLogger,
}

impl<L: Location> CatalogView<L> {
    /// Build the view from the current query string.
    ///
    /// The location is rewritten once so unknown categories and other junk
    /// disappear from the address bar.
    pub fn mount(location: L, logger: StructuredLogger) -> Self {
        let filters = FilterState::from_query_pairs(parse_query(&location.query()));
        let logger = logger.for_view("catalog");

        logger
            .info_builder("catalog mounted")
            .field("category", filters.category.as_str())
            .field("search", filters.search.as_str())
            .emit();

        let mut view = Self {
            location,
            filters,
            products: Vec::new(),
            state: LoadState::Idle,
            liked: LikedProducts::new(),
            variant: DisplayVariant::Standalone,
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
            issued: 0,
            logger,
        };
        view.sync_location();
        view
    }

    pub fn with_variant(mut self, variant: DisplayVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn variant(&self) -> DisplayVariant {
        self.variant
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    /// Failure copy, only while failed.
    pub fn error_message(&self) -> Option<&str> {
        (self.state == LoadState::Failed).then_some(self.error_message.as_str())
    }

    /// What the error state offers, only while failed.
    pub fn error_action(&self) -> Option<ErrorAction> {
        (self.state == LoadState::Failed).then(|| self.variant.error_action())
    }

    /// Empty-state copy, only after a successful load with no products.
    pub fn empty_state(&self) -> Option<EmptyState> {
        (self.state == LoadState::Loaded && self.products.is_empty())
            .then(|| EmptyState::for_filters(&self.filters))
    }

    pub fn set_category(&mut self, category: ProductCategory) -> Option<FetchTicket> {
        if self.filters.category == category {
            return None;
        }
        self.filters.category = category;
        self.sync_location();
        Some(self.begin_fetch())
    }

    pub fn set_search(&mut self, search: impl Into<String>) -> Option<FetchTicket> {
        let search = search.into();
        if self.filters.search == search {
            return None;
        }
        self.filters.search = search;
        self.sync_location();
        Some(self.begin_fetch())
    }

    /// Change the sort order. The query string is left alone.
    pub fn set_sort(&mut self, sort: SortOption) -> Option<FetchTicket> {
        if self.filters.sort == sort {
            return None;
        }
        self.filters.sort = sort;
        Some(self.begin_fetch())
    }

    /// Reset category, search and sort to their defaults.
    pub fn clear_filters(&mut self) -> Option<FetchTicket> {
        if self.filters == FilterState::default() {
            return None;
        }
        self.filters = FilterState::default();
        self.sync_location();
        Some(self.begin_fetch())
    }

    /// Start a fetch for the current filters. Earlier tickets become stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.state = LoadState::Loading;
        self.logger
            .debug_builder("product fetch started")
            .field_i64("seq", self.issued as i64)
            .emit();
        FetchTicket {
            seq: self.issued,
            filters: self.filters.clone(),
        }
    }

    /// Apply a fetch outcome. Returns false when the ticket was stale and
    /// the outcome was dropped.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Parsed<Vec<Product>>, ApiError>,
    ) -> bool {
        if ticket.seq != self.issued {
            self.logger
                .debug_builder("stale product response dropped")
                .field_i64("seq", ticket.seq as i64)
                .field_i64("latest", self.issued as i64)
                .emit();
            return false;
        }

        match outcome {
            Ok(parsed) => {
                log_diagnostics(&self.logger, &parsed.diagnostics);
                self.products = parsed.value;
                self.state = LoadState::Loaded;
                self.logger
                    .info_builder("products loaded")
                    .field_i64("count", self.products.len() as i64)
                    .field("category", ticket.filters.category.as_str())
                    .field("sort", ticket.filters.sort.as_str())
                    .emit();
            }
            Err(e) => {
                self.products.clear();
                self.state = LoadState::Failed;
                self.logger
                    .error_builder("product fetch failed")
                    .field("error", e.to_string())
                    .emit();
            }
        }
        true
    }

    /// Run a ticket against the API and apply the result.
    pub async fn execute<A: ProductApi + ?Sized>(&mut self, api: &A, ticket: FetchTicket) -> bool {
        let outcome = api.list_products(ticket.filters()).await;
        self.complete_fetch(ticket, outcome)
    }

    /// Fetch with the current filters.
    pub async fn refresh<A: ProductApi + ?Sized>(&mut self, api: &A) -> bool {
        let ticket = self.begin_fetch();
        self.execute(api, ticket).await
    }

    /// Retry after a failure. Same as [`refresh`](Self::refresh).
    pub async fn retry<A: ProductApi + ?Sized>(&mut self, api: &A) -> bool {
        self.logger.info("retrying product fetch");
        self.refresh(api).await
    }

    /// Flip the liked state of a product. Returns the new state.
    pub fn toggle_like(&mut self, id: &ProductId) -> bool {
        self.liked.toggle(id)
    }

    pub fn is_liked(&self, id: &ProductId) -> bool {
        self.liked.is_liked(id)
    }

    pub fn liked_count(&self) -> usize {
        self.liked.len()
    }

    fn sync_location(&mut self) {
        let query = build_query(self.filters.to_query_pairs());
        self.location.replace_query(&query);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::MemoryLocation;
    use salon_commerce::money::{Currency, Money};
    use salon_data::ShapeDiagnostic;
    use salon_observability::LogLevel;

    fn product(slug: &str) -> Product {
        Product::new(slug, slug, slug, Money::new(1200, Currency::USD))
    }

    fn mount(url: &str) -> (CatalogView<MemoryLocation>, salon_observability::MemorySink) {
        let (logger, sink) = StructuredLogger::capturing();
        (CatalogView::mount(MemoryLocation::from_url(url), logger), sink)
    }

    #[test]
    fn test_mount_reads_query() {
        let (view, _) = mount("/products?category=skincare&search=vitamin+c");
        assert_eq!(view.filters().category, ProductCategory::Skincare);
        assert_eq!(view.filters().search, "vitamin c");
        assert_eq!(view.filters().sort, SortOption::Popular);
        assert_eq!(view.state(), LoadState::Idle);
    }

    #[test]
    fn test_mount_drops_unknown_category_from_query() {
        let (view, _) = mount("/products?category=lipstick&sortBy=rating");
        assert_eq!(view.filters().category, ProductCategory::All);
        assert_eq!(view.filters().sort, SortOption::Popular);
        assert_eq!(view.location().query(), "");
    }

    #[test]
    fn test_setters_sync_query_and_issue_tickets() {
        let (mut view, _) = mount("/products");

        let ticket = view.set_category(ProductCategory::Skincare).unwrap();
        assert_eq!(ticket.filters().api_params(), vec![
            ("category", "skincare".to_string()),
            ("sortBy", "popular".to_string()),
        ]);
        assert_eq!(view.location().query(), "category=skincare");
        assert_eq!(view.state(), LoadState::Loading);

        view.set_search("rose water").unwrap();
        assert_eq!(view.location().query(), "category=skincare&search=rose+water");

        let writes = view.location().writes();
        view.set_sort(SortOption::PriceHigh).unwrap();
        assert_eq!(view.location().writes(), writes);

        assert!(view.set_category(ProductCategory::Skincare).is_none());
    }

    #[test]
    fn test_query_round_trip_through_remount() {
        let (mut view, _) = mount("/products");
        view.set_category(ProductCategory::Nails);
        view.set_search("gel & glitter");

        let (remounted, _) = mount(&view.location().href());
        assert_eq!(remounted.filters().category, ProductCategory::Nails);
        assert_eq!(remounted.filters().search, "gel & glitter");
    }

    #[test]
    fn test_latest_ticket_wins() {
        let (mut view, sink) = mount("/products");
        let first = view.set_category(ProductCategory::Makeup).unwrap();
        let second = view.set_search("matte").unwrap();

        assert!(view.complete_fetch(second, Ok(Parsed::clean(vec![product("matte-lip")]))));
        assert!(!view.complete_fetch(first, Ok(Parsed::clean(vec![product("old")]))));

        assert_eq!(view.products().len(), 1);
        assert_eq!(view.products()[0].slug, "matte-lip");
        assert!(sink.contains("stale product response dropped"));
    }

    #[test]
    fn test_failure_clears_products_and_sets_message() {
        let (mut view, sink) = mount("/products");
        let ticket = view.begin_fetch();
        view.complete_fetch(ticket, Ok(Parsed::clean(vec![product("a")])));

        let ticket = view.begin_fetch();
        view.complete_fetch(ticket, Err(ApiError::Network("offline".into())));

        assert!(view.products().is_empty());
        assert_eq!(view.state(), LoadState::Failed);
        assert_eq!(view.error_message(), Some(DEFAULT_ERROR_MESSAGE));
        assert_eq!(view.error_action(), Some(ErrorAction::Retry));
        assert!(view.empty_state().is_none());
        assert_eq!(sink.at_level(LogLevel::Error).len(), 1);
    }

    #[test]
    fn test_embedded_variant_offers_reload() {
        let (view, _) = mount("/");
        let mut view = view.with_variant(DisplayVariant::Embedded);
        let ticket = view.begin_fetch();
        view.complete_fetch(ticket, Err(ApiError::Http { status: 502, message: String::new() }));
        assert_eq!(view.error_action(), Some(ErrorAction::ReloadPage));
    }

    #[test]
    fn test_non_list_payload_is_empty_with_diagnostic() {
        let (mut view, sink) = mount("/products?category=skincare");
        let ticket = view.begin_fetch();
        let parsed = Parsed {
            value: Vec::new(),
            diagnostics: vec![ShapeDiagnostic::NotAList {
                endpoint: "/products".to_string(),
                found: "object",
            }],
        };
        view.complete_fetch(ticket, Ok(parsed));

        assert_eq!(view.state(), LoadState::Loaded);
        assert!(view.error_message().is_none());
        assert_eq!(sink.at_level(LogLevel::Warn).len(), 1);
        assert!(view.empty_state().is_some());
    }

    #[test]
    fn test_empty_state_copy() {
        let mut filters = FilterState::from_query_pairs([("category", "skincare")]);
        let empty = EmptyState::for_filters(&filters);
        assert_eq!(empty.title, "No Products Found");
        assert_eq!(
            empty.message,
            "We don't have any Skincare products right now. Check back soon!"
        );

        filters.search = "serum".to_string();
        assert_eq!(
            EmptyState::for_filters(&filters).message,
            "No Skincare products match \"serum\"."
        );

        assert_eq!(
            EmptyState::for_filters(&FilterState::default()).message,
            "We don't have any products right now. Check back soon!"
        );
    }

    #[test]
    fn test_clear_filters() {
        let (mut view, _) = mount("/products?category=tools&search=brush");
        assert!(view.clear_filters().is_some());
        assert_eq!(view.location().query(), "");
        assert!(view.clear_filters().is_none());
    }

    #[test]
    fn test_toggle_like() {
        let (mut view, _) = mount("/products");
        let id = ProductId::new("p1");
        assert!(view.toggle_like(&id));
        assert!(view.is_liked(&id));
        assert_eq!(view.liked_count(), 1);
        assert!(!view.toggle_like(&id));
        assert_eq!(view.liked_count(), 0);
    }
}
