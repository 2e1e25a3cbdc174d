//! Product detail sections.

use std::time::Instant;

use salon_commerce::catalog::Product;

use super::{escape_html, render_stars};
use crate::views::detail::{DetailState, DetailTab, DetailView};

/// Render the whole detail page body for the view's current state.
pub fn render_detail(view: &DetailView, now: Instant) -> String {
    let body = match view.state() {
        DetailState::Loading => {
            r#"<div class="detail-loading">Loading product...</div>"#.to_string()
        }
        DetailState::NotFound => format!(
            r#"<div class="detail-not-found">
        <h1>{}</h1>
        <a href="/products" class="btn">Back to Products</a>
    </div>"#,
            view.message().unwrap_or_default()
        ),
        DetailState::Failed => format!(
            r#"<div class="detail-error">
        <p>{}</p>
        <button class="detail-retry">Try Again</button>
    </div>"#,
            view.message().unwrap_or_default()
        ),
        DetailState::Ready(product) => render_ready(view, product, now),
    };

    format!(
        r#"<section class="product-detail" data-section="detail">
    {}
</section>"#,
        body
    )
}

fn render_ready(view: &DetailView, product: &Product, now: Instant) -> String {
    let main_image = match view.current_image() {
        Some(src) => format!(
            r#"<img src="{}" alt="{}" class="detail-image-main">"#,
            escape_html(src),
            escape_html(&product.name)
        ),
        None => r#"<div class="detail-image-placeholder">No image available</div>"#.to_string(),
    };

    let thumbnails: String = product
        .images
        .iter()
        .enumerate()
        .map(|(i, src)| {
            let active = if i == view.gallery().index() { " detail-thumb--active" } else { "" };
            format!(
                r#"<img src="{}" class="detail-thumb{}" data-index="{}">"#,
                escape_html(src),
                active,
                i
            )
        })
        .collect();

    let quantity = match view.quantity() {
        Some(q) => format!(
            r#"<div class="quantity-stepper">
            <button class="qty-dec"{}>−</button>
            <span class="qty-value">{}</span>
            <button class="qty-inc"{}>+</button>
        </div>
        <button class="btn-add-to-cart">Add to Cart</button>"#,
            if q.can_decrement() { "" } else { " disabled" },
            q.value(),
            if q.can_increment() { "" } else { " disabled" }
        ),
        None => r#"<p class="stock-out">Out of Stock</p>"#.to_string(),
    };

    let tabs: String = DetailTab::ALL
        .iter()
        .map(|tab| {
            let active = if *tab == view.tab() { " detail-tab--active" } else { "" };
            format!(
                r#"<button class="detail-tab{}" data-tab="{}">{}</button>"#,
                active,
                tab.as_str(),
                tab.label()
            )
        })
        .collect();

    let notice = view
        .share_notice(now)
        .map(|msg| format!(r#"<div class="toast">{}</div>"#, msg))
        .unwrap_or_default();

    let price = match product.original_price {
        Some(original) if product.is_on_sale() => format!(
            r#"<span class="price-current">{}</span> <span class="price-original">{}</span>"#,
            product.price, original
        ),
        _ => format!(r#"<span class="price-current">{}</span>"#, product.price),
    };

    format!(
        r#"<div class="detail-gallery">
        {main_image}
        <button class="gallery-prev">‹</button>
        <button class="gallery-next">›</button>
        <div class="detail-thumbs">{thumbnails}</div>
    </div>
    <div class="detail-info">
        <p class="detail-brand">{brand}</p>
        <h1 class="detail-name">{name}</h1>
        <div class="detail-rating">{stars} <span>({reviews} reviews)</span></div>
        <div class="detail-price">{price}</div>
        {quantity}
        <button class="like-button{liked}">♥</button>
        <button class="share-button">Share</button>
        {notice}
    </div>
    <div class="detail-tabs">{tabs}</div>
    <div class="detail-tab-panel">{panel}</div>"#,
        main_image = main_image,
        thumbnails = thumbnails,
        brand = escape_html(&product.brand),
        name = escape_html(&product.name),
        stars = render_stars(product.rating_half_stars()),
        reviews = product.review_count,
        price = price,
        quantity = quantity,
        liked = if view.is_liked() { " like-button--active" } else { "" },
        notice = notice,
        tabs = tabs,
        panel = render_tab_panel(view.tab(), product)
    )
}

/// Only the active tab's content is rendered.
pub fn render_tab_panel(tab: DetailTab, product: &Product) -> String {
    match tab {
        DetailTab::Description => {
            let features: String = product
                .features
                .iter()
                .map(|f| format!("<li>{}</li>", escape_html(f)))
                .collect();
            format!(
                r#"<p>{}</p><ul class="detail-features">{}</ul>"#,
                escape_html(&product.description),
                features
            )
        }
        DetailTab::Ingredients => {
            if product.ingredients.is_empty() {
                "<p>Ingredient information is not available.</p>".to_string()
            } else {
                let items: Vec<String> = product.ingredients.iter().map(|i| escape_html(i)).collect();
                format!("<p>{}</p>", items.join(", "))
            }
        }
        DetailTab::HowToUse => match &product.how_to_use {
            Some(text) => format!("<p>{}</p>", escape_html(text)),
            None => "<p>Usage instructions are not available.</p>".to_string(),
        },
        DetailTab::Reviews => {
            if product.reviews.is_empty() {
                "<p>No reviews yet.</p>".to_string()
            } else {
                product
                    .reviews
                    .iter()
                    .map(|r| {
                        format!(
                            r#"<div class="review"><strong>{}</strong> {}<p>{}</p></div>"#,
                            escape_html(&r.author),
                            render_stars((r.rating * 2.0).round().clamp(0.0, 10.0) as u8),
                            escape_html(&r.comment)
                        )
                    })
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedbackConfig;
    use salon_commerce::money::{Currency, Money};
    use salon_data::ApiError;
    use salon_observability::StructuredLogger;

    fn view() -> DetailView {
        DetailView::new(
            "glow-serum",
            "https://salon.example",
            &FeedbackConfig::default(),
            StructuredLogger::capturing().0,
        )
    }

    #[test]
    fn test_out_of_stock_hides_stepper() {
        let mut v = view();
        v.apply(Ok(Product::new("p1", "glow-serum", "Glow", Money::new(100, Currency::USD))));
        let html = render_detail(&v, Instant::now());
        assert!(html.contains("Out of Stock"));
        assert!(!html.contains("quantity-stepper"));
    }

    #[test]
    fn test_only_active_tab_rendered() {
        let mut product = Product::new("p1", "glow-serum", "Glow", Money::new(100, Currency::USD));
        product.description = "Brightening serum".into();
        product.ingredients = vec!["Vitamin C".into()];

        assert!(render_tab_panel(DetailTab::Description, &product).contains("Brightening"));
        let panel = render_tab_panel(DetailTab::Ingredients, &product);
        assert!(panel.contains("Vitamin C"));
        assert!(!panel.contains("Brightening"));
        assert!(render_tab_panel(DetailTab::Reviews, &product).contains("No reviews yet."));
    }

    #[test]
    fn test_not_found_message() {
        let mut v = view();
        v.apply(Err(ApiError::ProductNotFound("glow-serum".into())));
        assert!(render_detail(&v, Instant::now()).contains("Product not found"));
    }
}
