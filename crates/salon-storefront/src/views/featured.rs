//! Featured-products carousel embedded on the home page.

use std::time::Instant;

use salon_commerce::catalog::Product;
use salon_data::{ApiError, Parsed, ProductApi};
use salon_observability::StructuredLogger;

use crate::config::CarouselConfig;
use crate::timer::AutoAdvance;
use crate::views::{log_diagnostics, ErrorAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeaturedState {
    #[default]
    Loading,
    Ready,
    Empty,
    Failed,
}

/// Up to `max_items` featured products, auto-advancing on a fixed interval.
///
/// Manual navigation re-arms the timer instead of pausing it. Each
/// successful load bumps `generation` and starts the cycle over.
pub struct FeaturedCarousel {
    products: Vec<Product>,
    index: usize,
    state: FeaturedState,
    timer: AutoAdvance,
    generation: u64,
    max_items: usize,
    logger: StructuredLogger,
}

impl FeaturedCarousel {
    pub fn new(config: &CarouselConfig, logger: StructuredLogger) -> Self {
        Self {
            products: Vec::new(),
            index: 0,
            state: FeaturedState::Loading,
            timer: AutoAdvance::new(config.interval()),
            generation: 0,
            max_items: config.max_items,
            logger: logger.for_view("featured"),
        }
    }

    pub async fn load<A: ProductApi + ?Sized>(&mut self, api: &A, now: Instant) {
        let outcome = api.featured_products().await;
        self.apply(outcome, now);
    }

    /// Apply a featured-products response.
    pub fn apply(&mut self, outcome: Result<Parsed<Vec<Product>>, ApiError>, now: Instant) {
        match outcome {
            Ok(parsed) => {
                log_diagnostics(&self.logger, &parsed.diagnostics);
                let mut products = parsed.value;
                products.truncate(self.max_items);
                self.products = products;
                self.index = 0;
                self.generation += 1;

                if self.products.is_empty() {
                    self.state = FeaturedState::Empty;
                    self.timer.disarm();
                } else {
                    self.state = FeaturedState::Ready;
                    self.timer.arm(now);
                }
                self.logger
                    .info_builder("featured products loaded")
                    .field_i64("count", self.products.len() as i64)
                    .field_i64("generation", self.generation as i64)
                    .emit();
            }
            Err(e) => {
                self.products.clear();
                self.index = 0;
                self.state = FeaturedState::Failed;
                self.timer.disarm();
                self.logger
                    .error_builder("featured fetch failed")
                    .field("error", e.to_string())
                    .emit();
            }
        }
    }

    /// Advance if the auto-advance deadline has passed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.products.is_empty() || !self.timer.fire(now) {
            return false;
        }
        self.index = (self.index + 1) % self.products.len();
        true
    }

    pub fn next(&mut self, now: Instant) {
        if let Some(len) = self.len_nonzero() {
            self.index = (self.index + 1) % len;
            self.timer.arm(now);
        }
    }

    pub fn prev(&mut self, now: Instant) {
        if let Some(len) = self.len_nonzero() {
            self.index = (self.index + len - 1) % len;
            self.timer.arm(now);
        }
    }

    /// Jump to a dot. Out-of-range indices are ignored.
    pub fn go_to(&mut self, index: usize, now: Instant) -> bool {
        if index >= self.products.len() {
            return false;
        }
        self.index = index;
        self.timer.arm(now);
        true
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn current(&self) -> Option<&Product> {
        self.products.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn state(&self) -> FeaturedState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// The embedded carousel can only offer a page reload.
    pub fn error_action(&self) -> Option<ErrorAction> {
        (self.state == FeaturedState::Failed).then_some(ErrorAction::ReloadPage)
    }

    fn len_nonzero(&self) -> Option<usize> {
        (!self.products.is_empty()).then_some(self.products.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salon_commerce::money::{Currency, Money};
    use std::time::Duration;

    fn products(n: usize) -> Vec<Product> {
        (0..n)
            .map(|i| {
                let slug = format!("p{}", i);
                Product::new(slug.as_str(), slug.as_str(), slug.as_str(), Money::new(999, Currency::USD))
            })
            .collect()
    }

    fn carousel() -> FeaturedCarousel {
        let (logger, _) = StructuredLogger::capturing();
        FeaturedCarousel::new(&CarouselConfig::default(), logger)
    }

    #[test]
    fn test_keeps_first_four_and_cycles() {
        let start = Instant::now();
        let mut c = carousel();
        c.apply(Ok(Parsed::clean(products(6))), start);

        assert_eq!(c.len(), 4);
        assert_eq!(c.products()[3].slug, "p3");
        assert_eq!(c.state(), FeaturedState::Ready);

        let mut now = start;
        for expected in [1, 2, 3, 0] {
            now += Duration::from_secs(4);
            assert!(c.tick(now));
            assert_eq!(c.index(), expected);
        }
        assert!(!c.tick(now + Duration::from_secs(1)));
    }

    #[test]
    fn test_manual_navigation_rearms_timer() {
        let start = Instant::now();
        let mut c = carousel();
        c.apply(Ok(Parsed::clean(products(3))), start);

        c.prev(start + Duration::from_secs(3));
        assert_eq!(c.index(), 2);
        assert!(!c.tick(start + Duration::from_secs(4)));
        assert!(c.tick(start + Duration::from_secs(7)));
        assert_eq!(c.index(), 0);

        assert!(!c.go_to(3, start));
        assert!(c.go_to(1, start + Duration::from_secs(8)));
        assert_eq!(c.next_deadline(), Some(start + Duration::from_secs(12)));
        c.next(start + Duration::from_secs(9));
        assert_eq!(c.index(), 2);
    }

    #[test]
    fn test_reload_resets_index_and_generation() {
        let start = Instant::now();
        let mut c = carousel();
        c.apply(Ok(Parsed::clean(products(4))), start);
        c.next(start);
        assert_eq!(c.generation(), 1);

        c.apply(Ok(Parsed::clean(products(2))), start + Duration::from_secs(1));
        assert_eq!(c.index(), 0);
        assert_eq!(c.generation(), 2);
        assert_eq!(c.next_deadline(), Some(start + Duration::from_secs(5)));
    }

    #[test]
    fn test_empty_and_failed_states() {
        let now = Instant::now();
        let mut c = carousel();
        c.apply(Ok(Parsed::clean(Vec::new())), now);
        assert_eq!(c.state(), FeaturedState::Empty);
        assert!(c.next_deadline().is_none());
        c.next(now);
        assert_eq!(c.index(), 0);
        assert!(!c.tick(now + Duration::from_secs(60)));

        c.apply(Err(ApiError::Network("offline".into())), now);
        assert_eq!(c.state(), FeaturedState::Failed);
        assert_eq!(c.error_action(), Some(ErrorAction::ReloadPage));
    }
}
