//! View-models and HTML sections for the salon storefront.
//!
//! Each view owns its state and is driven by the host: user actions call
//! operations, fetches are awaited against a [`ProductApi`], and timers are
//! deadlines checked against instants the host supplies. Sections render a
//! view's current state to HTML.
//!
//! # Example
//!
//! ```rust,ignore
//! use salon_storefront::prelude::*;
//!
//! let config = StorefrontConfig::load("storefront.toml")?;
//! let client = FetchClient::new(ReqwestTransport::new()?)
//!     .with_base_url(&config.api.base_url)
//!     .with_credentials(config.api.credentials());
//! let api = HttpProductApi::new(client);
//!
//! let location = MemoryLocation::from_url("/products?category=skincare");
//! let mut catalog = CatalogView::mount(location, config.logger());
//! catalog.refresh(&api).await;
//! let html = render_catalog(&catalog);
//! ```
//!
//! [`ProductApi`]: salon_data::ProductApi

pub mod config;
pub mod legacy;
pub mod location;
pub mod sections;
pub mod timer;
pub mod views;

pub use config::StorefrontConfig;
pub use location::{Location, MemoryLocation};
pub use timer::{AutoAdvance, Transient};
pub use views::ErrorAction;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::StorefrontConfig;
    pub use crate::location::{Location, MemoryLocation};
    pub use crate::sections::*;
    pub use crate::views::blog_admin::{BlogAdminList, BlogBackend, MockBlogBackend, PostForm};
    pub use crate::views::catalog::{CatalogView, DisplayVariant, LoadState};
    pub use crate::views::detail::{DetailState, DetailView, SharePlatform};
    pub use crate::views::featured::{FeaturedCarousel, FeaturedState};
    pub use crate::views::home::HomePage;
    pub use crate::views::ErrorAction;

    pub use salon_data::prelude::*;
    #[cfg(not(target_arch = "wasm32"))]
    pub use salon_data::ReqwestTransport;
}
