//! Home page: the featured carousel above an embedded catalog.

use std::time::Instant;

use salon_data::ProductApi;
use salon_observability::StructuredLogger;

use crate::config::StorefrontConfig;
use crate::location::Location;
use crate::sections;
use crate::views::catalog::{CatalogView, DisplayVariant};
use crate::views::featured::FeaturedCarousel;

pub struct HomePage<L: Location> {
    pub catalog: CatalogView<L>,
    pub featured: FeaturedCarousel,
    logger: StructuredLogger,
}

impl<L: Location> HomePage<L> {
    pub fn mount(location: L, config: &StorefrontConfig, logger: StructuredLogger) -> Self {
        let catalog = CatalogView::mount(location, logger.clone())
            .with_variant(DisplayVariant::Embedded)
            .with_error_message(config.catalog.error_message.clone());
        let featured = FeaturedCarousel::new(&config.carousel, logger.clone());
        Self {
            catalog,
            featured,
            logger: logger.for_view("home"),
        }
    }

    /// Fetch the catalog list and the featured products concurrently.
    pub async fn load<A: ProductApi + ?Sized>(&mut self, api: &A, now: Instant) {
        let ticket = self.catalog.begin_fetch();
        let (listing, featured) =
            futures::join!(api.list_products(ticket.filters()), api.featured_products());

        self.featured.apply(featured, now);
        self.catalog.complete_fetch(ticket, listing);

        self.logger
            .info_builder("home page loaded")
            .field_i64("featured", self.featured.len() as i64)
            .field_i64("products", self.catalog.products().len() as i64)
            .emit();
    }

    pub fn render(&self) -> String {
        format!(
            r#"<main class="home-page">
{featured}
{filters}
{grid}
</main>"#,
            featured = sections::render_featured(&self.featured),
            filters = sections::render_filters(self.catalog.filters()),
            grid = sections::render_catalog(&self.catalog),
        )
    }
}
