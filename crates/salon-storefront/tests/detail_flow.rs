//! Product detail page against scripted API responses.

use std::time::{Duration, Instant};

use salon_data::{FetchClient, HttpProductApi, Method, Response, ScriptedTransport};
use salon_observability::StructuredLogger;
use salon_storefront::config::FeedbackConfig;
use salon_storefront::sections::render_detail;
use salon_storefront::views::detail::{
    DetailState, DetailTab, DetailView, ShareOutcome, SharePlatform, CART_UNAVAILABLE,
    LINK_COPIED, NOT_FOUND_MESSAGE,
};
use serde_json::json;

fn api(transport: ScriptedTransport) -> HttpProductApi<ScriptedTransport> {
    HttpProductApi::new(FetchClient::new(transport).with_base_url("https://api.test"))
}

fn view(slug: &str) -> DetailView {
    DetailView::new(
        slug,
        "https://salon.example/",
        &FeedbackConfig::default(),
        StructuredLogger::capturing().0,
    )
}

fn serum() -> serde_json::Value {
    json!({
        "id": "p1",
        "slug": "glow-serum",
        "name": "Glow Serum",
        "brand": "Lumen",
        "price": 24.99,
        "originalPrice": 29.99,
        "stockQuantity": 3,
        "images": ["a.jpg", "b.jpg", "c.jpg"],
        "description": "Brightening vitamin C serum.",
        "ingredients": ["Vitamin C", "Hyaluronic Acid"]
    })
}

/// Clipboard-only host.
#[derive(Default)]
struct Clipboard {
    copied: Option<String>,
}

impl SharePlatform for Clipboard {
    fn can_share(&self) -> bool {
        false
    }

    fn share(&mut self, _title: &str, _text: &str, _url: &str) -> Result<(), String> {
        Err("unsupported".into())
    }

    fn copy_to_clipboard(&mut self, text: &str) -> Result<(), String> {
        self.copied = Some(text.to_string());
        Ok(())
    }
}

#[tokio::test]
async fn test_missing_slug_is_not_found_not_failure() {
    let api = api(ScriptedTransport::new());
    let mut page = view("no-such-thing");
    page.load(&api).await;

    assert_eq!(page.state(), &DetailState::NotFound);
    assert_eq!(page.message(), Some(NOT_FOUND_MESSAGE));
    let html = render_detail(&page, Instant::now());
    assert!(html.contains("Back to Products"));
    assert!(!html.contains("Try Again"));
}

#[tokio::test]
async fn test_server_error_is_generic_failure() {
    let api = api(ScriptedTransport::new().respond(
        Method::Get,
        "/products/glow-serum",
        Response::html(503, "unavailable"),
    ));
    let mut page = view("glow-serum");
    page.load(&api).await;

    assert_eq!(page.state(), &DetailState::Failed);
    assert!(render_detail(&page, Instant::now()).contains("Try Again"));
}

#[tokio::test]
async fn test_loaded_product_gallery_quantity_and_tabs() {
    let api = api(ScriptedTransport::new().get_json("/products/glow-serum", serum()));
    let mut page = view("glow-serum");
    page.load(&api).await;

    assert_eq!(page.product().map(|p| p.name.as_str()), Some("Glow Serum"));

    page.gallery_mut().prev();
    assert_eq!(page.current_image(), Some("c.jpg"));
    page.gallery_mut().next();
    assert_eq!(page.current_image(), Some("a.jpg"));

    let stepper = page.quantity_mut().unwrap();
    stepper.decrement();
    assert_eq!(stepper.value(), 1);
    stepper.set(10);
    assert_eq!(stepper.value(), 3);
    stepper.increment();
    assert_eq!(stepper.value(), 3);

    let notice = page.add_to_cart().unwrap();
    assert_eq!(notice.quantity, 3);
    assert_eq!(notice.message, CART_UNAVAILABLE);

    page.select_tab(DetailTab::Ingredients);
    let html = render_detail(&page, Instant::now());
    assert!(html.contains("Vitamin C, Hyaluronic Acid"));
    assert!(!html.contains("Brightening vitamin C serum."));
    assert!(html.contains("$29.99"));
}

#[tokio::test]
async fn test_share_copies_link_and_notice_expires() {
    let api = api(ScriptedTransport::new().get_json("/products/glow-serum", serum()));
    let mut page = view("glow-serum");
    page.load(&api).await;

    let now = Instant::now();
    let mut clipboard = Clipboard::default();
    assert_eq!(page.share(&mut clipboard, now), ShareOutcome::Copied);
    assert_eq!(
        clipboard.copied.as_deref(),
        Some("https://salon.example/products/glow-serum")
    );

    assert_eq!(page.share_notice(now + Duration::from_millis(1999)), Some(LINK_COPIED));
    assert_eq!(page.share_notice(now + Duration::from_secs(2)), None);
}
