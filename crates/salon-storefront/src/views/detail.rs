//! Product detail view: gallery, quantity stepper, tabs, share.

use std::time::Instant;

use salon_commerce::catalog::Product;
use salon_data::query::encode_component;
use salon_data::{ApiError, ProductApi};
use salon_observability::StructuredLogger;

use crate::config::FeedbackConfig;
use crate::timer::Transient;

/// Confirmation shown after copying the product link.
pub const LINK_COPIED: &str = "Link copied to clipboard!";
/// Shown when the slug does not name a product.
pub const NOT_FOUND_MESSAGE: &str = "Product not found";
/// Shown for any other load failure.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load product. Please try again.";
/// Add-to-cart has no backend yet.
pub const CART_UNAVAILABLE: &str = "Cart is not available yet.";

/// Load state of the detail page.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Ready(Box<Product>),
    NotFound,
    Failed,
}

/// Image gallery index. Wraps in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gallery {
    len: usize,
    index: usize,
}

impl Gallery {
    pub fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub fn prev(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }

    /// Thumbnail click. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.len {
            self.index = index;
            true
        } else {
            false
        }
    }
}

/// Quantity picker bounded to `[1, stock]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityStepper {
    value: u32,
    max: u32,
}

impl QuantityStepper {
    /// `None` when nothing is in stock; the stepper is hidden then.
    pub fn new(stock: u32) -> Option<Self> {
        (stock > 0).then_some(Self { value: 1, max: stock })
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn can_increment(&self) -> bool {
        self.value < self.max
    }

    pub fn can_decrement(&self) -> bool {
        self.value > 1
    }

    pub fn increment(&mut self) {
        if self.can_increment() {
            self.value += 1;
        }
    }

    pub fn decrement(&mut self) {
        if self.can_decrement() {
            self.value -= 1;
        }
    }

    /// Typed input, clamped into range.
    pub fn set(&mut self, value: u32) {
        self.value = value.clamp(1, self.max);
    }
}

/// Detail page tabs. Only the active one is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DetailTab {
    #[default]
    Description,
    Ingredients,
    HowToUse,
    Reviews,
}

impl DetailTab {
    pub const ALL: [DetailTab; 4] = [
        DetailTab::Description,
        DetailTab::Ingredients,
        DetailTab::HowToUse,
        DetailTab::Reviews,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DetailTab::Description => "description",
            DetailTab::Ingredients => "ingredients",
            DetailTab::HowToUse => "how-to-use",
            DetailTab::Reviews => "reviews",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DetailTab::Description => "Description",
            DetailTab::Ingredients => "Ingredients",
            DetailTab::HowToUse => "How to Use",
            DetailTab::Reviews => "Reviews",
        }
    }
}

/// Host capabilities used by the share button.
pub trait SharePlatform {
    /// Whether a native share sheet exists.
    fn can_share(&self) -> bool;

    fn share(&mut self, title: &str, text: &str, url: &str) -> Result<(), String>;

    fn copy_to_clipboard(&mut self, text: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Copied,
    Failed(String),
}

/// Result of pressing add-to-cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddToCartNotice {
    pub slug: String,
    pub quantity: u32,
    pub message: &'static str,
}

/// The product detail view-model.
pub struct DetailView {
    slug: String,
    state: DetailState,
    gallery: Gallery,
    quantity: Option<QuantityStepper>,
    tab: DetailTab,
    liked: bool,
    share_notice: Transient<&'static str>,
    site_url: String,
    logger: StructuredLogger,
}

impl DetailView {
    pub fn new(
        slug: impl Into<String>,
        site_url: impl Into<String>,
        feedback: &FeedbackConfig,
        logger: StructuredLogger,
    ) -> Self {
        let slug = slug.into();
        let logger = logger
            .for_view("detail")
            .with_route(format!("/products/{}", slug));
        Self {
            slug,
            state: DetailState::Loading,
            gallery: Gallery::default(),
            quantity: None,
            tab: DetailTab::default(),
            liked: false,
            share_notice: Transient::new(feedback.hide_after()),
            site_url: site_url.into(),
            logger,
        }
    }

    pub async fn load<A: ProductApi + ?Sized>(&mut self, api: &A) {
        self.state = DetailState::Loading;
        let outcome = api.get_product(&self.slug).await;
        self.apply(outcome);
    }

    pub fn apply(&mut self, outcome: Result<Product, ApiError>) {
        match outcome {
            Ok(product) => {
                self.gallery = Gallery::new(product.images.len());
                self.quantity = QuantityStepper::new(product.stock_quantity);
                self.tab = DetailTab::default();
                self.logger
                    .info_builder("product loaded")
                    .field("name", product.name.as_str())
                    .field_i64("stock", i64::from(product.stock_quantity))
                    .emit();
                self.state = DetailState::Ready(Box::new(product));
            }
            Err(ApiError::ProductNotFound(slug)) => {
                self.logger
                    .warn_builder("product not found")
                    .field("slug", slug)
                    .emit();
                self.clear_product_controls();
                self.state = DetailState::NotFound;
            }
            Err(e) => {
                self.logger
                    .error_builder("product fetch failed")
                    .field("error", e.to_string())
                    .emit();
                self.clear_product_controls();
                self.state = DetailState::Failed;
            }
        }
    }

    fn clear_product_controls(&mut self) {
        self.gallery = Gallery::default();
        self.quantity = None;
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn product(&self) -> Option<&Product> {
        match &self.state {
            DetailState::Ready(product) => Some(product),
            _ => None,
        }
    }

    /// User-facing message for the not-found and failed states.
    pub fn message(&self) -> Option<&'static str> {
        match self.state {
            DetailState::NotFound => Some(NOT_FOUND_MESSAGE),
            DetailState::Failed => Some(LOAD_FAILED_MESSAGE),
            _ => None,
        }
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn gallery_mut(&mut self) -> &mut Gallery {
        &mut self.gallery
    }

    pub fn current_image(&self) -> Option<&str> {
        self.product()
            .and_then(|p| p.images.get(self.gallery.index()))
            .map(String::as_str)
    }

    /// `None` hides the stepper.
    pub fn quantity(&self) -> Option<&QuantityStepper> {
        self.quantity.as_ref()
    }

    pub fn quantity_mut(&mut self) -> Option<&mut QuantityStepper> {
        self.quantity.as_mut()
    }

    pub fn tab(&self) -> DetailTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: DetailTab) {
        self.tab = tab;
    }

    pub fn toggle_like(&mut self) -> bool {
        self.liked = !self.liked;
        self.liked
    }

    pub fn is_liked(&self) -> bool {
        self.liked
    }

    /// Absolute link to this product.
    pub fn product_url(&self) -> String {
        format!(
            "{}/products/{}",
            self.site_url.trim_end_matches('/'),
            encode_component(&self.slug)
        )
    }

    /// Logs the intent only; nothing is added anywhere.
    pub fn add_to_cart(&self) -> Option<AddToCartNotice> {
        let quantity = self.quantity?.value();
        self.logger
            .info_builder("add to cart requested")
            .field("slug", self.slug.as_str())
            .field_i64("quantity", i64::from(quantity))
            .emit();
        Some(AddToCartNotice {
            slug: self.slug.clone(),
            quantity,
            message: CART_UNAVAILABLE,
        })
    }

    /// Native share when available, otherwise copy the link and show a
    /// short confirmation.
    pub fn share<P: SharePlatform + ?Sized>(&mut self, platform: &mut P, now: Instant) -> ShareOutcome {
        let url = self.product_url();
        let (title, text) = match self.product() {
            Some(p) => (p.name.clone(), p.description.clone()),
            None => (self.slug.clone(), String::new()),
        };

        if platform.can_share() {
            return match platform.share(&title, &text, &url) {
                Ok(()) => ShareOutcome::Shared,
                Err(e) => {
                    self.logger.debug_builder("share dismissed").field("error", e.as_str()).emit();
                    ShareOutcome::Failed(e)
                }
            };
        }

        match platform.copy_to_clipboard(&url) {
            Ok(()) => {
                self.share_notice.show(LINK_COPIED, now);
                ShareOutcome::Copied
            }
            Err(e) => {
                self.logger.warn_builder("clipboard copy failed").field("error", e.as_str()).emit();
                ShareOutcome::Failed(e)
            }
        }
    }

    pub fn share_notice(&self, now: Instant) -> Option<&'static str> {
        self.share_notice.get(now).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salon_commerce::money::{Currency, Money};
    use std::time::Duration;

    #[derive(Default)]
    struct FakePlatform {
        native: bool,
        shared: Vec<String>,
        clipboard: Option<String>,
    }

    impl SharePlatform for FakePlatform {
        fn can_share(&self) -> bool {
            self.native
        }

        fn share(&mut self, _title: &str, _text: &str, url: &str) -> Result<(), String> {
            self.shared.push(url.to_string());
            Ok(())
        }

        fn copy_to_clipboard(&mut self, text: &str) -> Result<(), String> {
            self.clipboard = Some(text.to_string());
            Ok(())
        }
    }

    fn serum(stock: u32) -> Product {
        Product::new("p1", "glow-serum", "Glow Serum", Money::new(2499, Currency::USD))
            .with_stock(stock)
            .with_images(vec!["a.jpg".into(), "b.jpg".into(), "c.jpg".into()])
    }

    fn view() -> DetailView {
        let (logger, _) = StructuredLogger::capturing();
        DetailView::new("glow-serum", "https://salon.example/", &FeedbackConfig::default(), logger)
    }

    #[test]
    fn test_gallery_wraps_both_ways() {
        let mut g = Gallery::new(3);
        g.prev();
        assert_eq!(g.index(), 2);
        g.next();
        assert_eq!(g.index(), 0);
        assert!(!g.select(3));
        assert!(g.select(1));

        let mut empty = Gallery::new(0);
        empty.next();
        empty.prev();
        assert_eq!(empty.index(), 0);
    }

    #[test]
    fn test_quantity_bounds() {
        assert!(QuantityStepper::new(0).is_none());

        let mut q = QuantityStepper::new(2).unwrap();
        q.decrement();
        assert_eq!(q.value(), 1);
        q.increment();
        q.increment();
        assert_eq!(q.value(), 2);
        assert!(!q.can_increment());
        q.set(0);
        assert_eq!(q.value(), 1);
        q.set(99);
        assert_eq!(q.value(), 2);
    }

    #[test]
    fn test_apply_ready_resets_widgets() {
        let mut v = view();
        v.select_tab(DetailTab::Reviews);
        v.apply(Ok(serum(5)));

        assert_eq!(v.product().map(|p| p.slug.as_str()), Some("glow-serum"));
        assert_eq!(v.gallery().len(), 3);
        assert_eq!(v.quantity().map(|q| q.max()), Some(5));
        assert_eq!(v.tab(), DetailTab::Description);
        v.gallery_mut().prev();
        assert_eq!(v.current_image(), Some("c.jpg"));
    }

    #[test]
    fn test_out_of_stock_hides_stepper() {
        let mut v = view();
        v.apply(Ok(serum(0)));
        assert!(v.quantity().is_none());
        assert!(v.add_to_cart().is_none());
    }

    #[test]
    fn test_not_found_is_distinct_from_failure() {
        let mut v = view();
        v.apply(Err(ApiError::ProductNotFound("glow-serum".into())));
        assert_eq!(v.state(), &DetailState::NotFound);
        assert_eq!(v.message(), Some(NOT_FOUND_MESSAGE));

        v.apply(Err(ApiError::Network("offline".into())));
        assert_eq!(v.state(), &DetailState::Failed);
        assert_eq!(v.message(), Some(LOAD_FAILED_MESSAGE));
    }

    #[test]
    fn test_share_falls_back_to_clipboard() {
        let now = Instant::now();
        let mut v = view();
        v.apply(Ok(serum(1)));
        let mut platform = FakePlatform::default();

        assert_eq!(v.share(&mut platform, now), ShareOutcome::Copied);
        assert_eq!(
            platform.clipboard.as_deref(),
            Some("https://salon.example/products/glow-serum")
        );
        assert_eq!(v.share_notice(now + Duration::from_millis(1999)), Some(LINK_COPIED));
        assert_eq!(v.share_notice(now + Duration::from_secs(2)), None);
    }

    #[test]
    fn test_native_share_shows_no_notice() {
        let now = Instant::now();
        let mut v = view();
        let mut platform = FakePlatform {
            native: true,
            ..Default::default()
        };
        assert_eq!(v.share(&mut platform, now), ShareOutcome::Shared);
        assert_eq!(platform.shared.len(), 1);
        assert!(v.share_notice(now).is_none());
    }

    #[test]
    fn test_add_to_cart_is_a_stub() {
        let mut v = view();
        v.apply(Ok(serum(4)));
        if let Some(q) = v.quantity_mut() {
            q.set(3);
        }
        let notice = v.add_to_cart().unwrap();
        assert_eq!(notice.quantity, 3);
        assert_eq!(notice.message, CART_UNAVAILABLE);
    }

    #[test]
    fn test_failed_reload_clears_gallery_and_stepper() {
        let mut v = view();
        v.apply(Ok(serum(4)));
        v.gallery_mut().next();

        v.apply(Err(ApiError::Network("offline".into())));
        assert!(v.add_to_cart().is_none());
        assert!(v.quantity().is_none());
        assert_eq!(v.gallery().len(), 0);
        assert_eq!(v.gallery().index(), 0);

        v.apply(Ok(serum(4)));
        v.apply(Err(ApiError::ProductNotFound("glow-serum".into())));
        assert!(v.add_to_cart().is_none());
        assert!(v.current_image().is_none());
    }

    #[test]
    fn test_product_url_encodes_slug() {
        let (logger, _) = StructuredLogger::capturing();
        let v = DetailView::new("rose & oud", "https://salon.example", &FeedbackConfig::default(), logger);
        assert_eq!(v.product_url(), "https://salon.example/products/rose+%26+oud");
    }
}
