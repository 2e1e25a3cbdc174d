//! Featured carousel section.

use super::escape_html;
use crate::views::featured::{FeaturedCarousel, FeaturedState};

/// Render the featured carousel with its slides, arrows and dots.
pub fn render_featured(carousel: &FeaturedCarousel) -> String {
    let body = match carousel.state() {
        FeaturedState::Loading => {
            r#"<div class="featured-loading">Loading featured products...</div>"#.to_string()
        }
        FeaturedState::Empty => {
            r#"<div class="featured-empty">No featured products at the moment.</div>"#.to_string()
        }
        FeaturedState::Failed => {
            let label = carousel.error_action().map(|a| a.label()).unwrap_or_default();
            format!(
                r#"<div class="featured-error">
        <p>Failed to load featured products.</p>
        <button class="featured-reload" onclick="window.location.reload()">{}</button>
    </div>"#,
                label
            )
        }
        FeaturedState::Ready => {
            let slides: String = carousel
                .products()
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    let active = if i == carousel.index() { " featured-slide--active" } else { "" };
                    let image = p
                        .primary_image()
                        .map(|src| {
                            format!(r#"<img src="{}" alt="{}">"#, escape_html(src), escape_html(&p.name))
                        })
                        .unwrap_or_default();
                    format!(
                        r#"<a class="featured-slide{}" href="/products/{}">{}<span class="featured-name">{}</span><span class="featured-price">{}</span></a>"#,
                        active,
                        escape_html(&p.slug),
                        image,
                        escape_html(&p.name),
                        p.price
                    )
                })
                .collect();

            let dots: String = (0..carousel.len())
                .map(|i| {
                    let active = if i == carousel.index() { " featured-dot--active" } else { "" };
                    format!(r#"<button class="featured-dot{}" data-index="{}"></button>"#, active, i)
                })
                .collect();

            format!(
                r#"<div class="featured-track">{slides}</div>
    <button class="featured-prev" aria-label="Previous">‹</button>
    <button class="featured-next" aria-label="Next">›</button>
    <div class="featured-dots">{dots}</div>"#,
                slides = slides,
                dots = dots
            )
        }
    };

    format!(
        r#"<section class="featured-carousel" data-section="featured">
    <h2>Featured Products</h2>
    {}
</section>"#,
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CarouselConfig;
    use salon_commerce::catalog::Product;
    use salon_commerce::money::{Currency, Money};
    use salon_data::{ApiError, Parsed};
    use salon_observability::StructuredLogger;
    use std::time::Instant;

    #[test]
    fn test_ready_marks_active_slide_and_dot() {
        let now = Instant::now();
        let mut carousel =
            FeaturedCarousel::new(&CarouselConfig::default(), StructuredLogger::capturing().0);
        let products = vec![
            Product::new("a", "a", "Alpha", Money::new(100, Currency::USD)),
            Product::new("b", "b", "Beta", Money::new(200, Currency::USD)),
        ];
        carousel.apply(Ok(Parsed::clean(products)), now);
        carousel.next(now);

        let html = render_featured(&carousel);
        assert!(html.contains(r#"featured-slide featured-slide--active" href="/products/b""#));
        assert_eq!(html.matches("featured-dot--active").count(), 1);
        assert!(html.contains(r#"data-index="1""#));
    }

    #[test]
    fn test_failed_offers_reload() {
        let mut carousel =
            FeaturedCarousel::new(&CarouselConfig::default(), StructuredLogger::capturing().0);
        carousel.apply(Err(ApiError::Network("down".into())), Instant::now());
        assert!(render_featured(&carousel).contains("Reload Page"));
    }
}
