//! Catalog sections: filter bar, product grid, empty and error states.

use salon_commerce::catalog::{Product, ProductCategory};
use salon_commerce::search::{FilterState, SortOption};

use super::{escape_html, render_stars};
use crate::location::Location;
use crate::views::catalog::{CatalogView, LoadState};

/// Category pills, search box and sort select.
pub fn render_filters(filters: &FilterState) -> String {
    let categories: String = ProductCategory::ALL
        .iter()
        .map(|cat| {
            let info = cat.info();
            let active = if *cat == filters.category { " category-pill--active" } else { "" };
            format!(
                r#"<button class="category-pill{active}" data-category="{id}" style="--accent: {color}">
            <span class="category-icon">{icon}</span> {label}
        </button>"#,
                active = active,
                id = info.id,
                color = info.color,
                icon = info.icon,
                label = escape_html(info.label)
            )
        })
        .collect();

    let sort_options: String = SortOption::ALL
        .iter()
        .map(|opt| {
            let selected = if *opt == filters.sort { " selected" } else { "" };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                opt.as_str(),
                selected,
                opt.display_name()
            )
        })
        .collect();

    let clear = if filters.has_active_filters() {
        r#"<button class="clear-filters">Clear filters</button>"#
    } else {
        ""
    };

    format!(
        r#"<section class="catalog-filters" data-section="filters">
    <div class="category-pills">{categories}</div>
    <input type="search" name="search" class="catalog-search" placeholder="Search products..." value="{search}">
    <select name="sortBy" class="catalog-sort">{sort_options}</select>
    {clear}
</section>"#,
        categories = categories,
        search = escape_html(&filters.search),
        sort_options = sort_options,
        clear = clear
    )
}

/// One product card.
pub fn render_product_card(product: &Product, liked: bool) -> String {
    let image = match product.primary_image() {
        Some(src) => format!(
            r#"<img src="{}" alt="{}" class="product-card-image">"#,
            escape_html(src),
            escape_html(&product.name)
        ),
        None => r#"<div class="product-card-image product-card-image--placeholder"></div>"#
            .to_string(),
    };

    let price = match (product.original_price, product.discount_percentage()) {
        (Some(original), Some(pct)) if product.is_on_sale() => format!(
            r#"<span class="price-current">{}</span>
            <span class="price-original">{}</span>
            <span class="price-discount">-{}%</span>"#,
            product.price, original, pct
        ),
        _ => format!(r#"<span class="price-current">{}</span>"#, product.price),
    };

    let badge = if !product.in_stock() {
        r#"<span class="badge badge--out">Out of Stock</span>"#
    } else if product.flags.new_arrival {
        r#"<span class="badge badge--new">New</span>"#
    } else if product.is_on_sale() {
        r#"<span class="badge badge--sale">Sale</span>"#
    } else {
        ""
    };

    format!(
        r#"<article class="product-card" data-product-id="{id}">
        <a href="/products/{slug}">{image}</a>
        {badge}
        <button class="like-button{liked_class}" aria-pressed="{liked}" aria-label="Like">♥</button>
        <p class="product-card-brand">{brand}</p>
        <h3 class="product-card-name"><a href="/products/{slug}">{name}</a></h3>
        <div class="product-card-rating">{stars} <span class="review-count">({reviews})</span></div>
        <div class="product-card-price">{price}</div>
    </article>"#,
        id = escape_html(product.id.as_str()),
        slug = escape_html(&product.slug),
        image = image,
        badge = badge,
        liked_class = if liked { " like-button--active" } else { "" },
        liked = liked,
        brand = escape_html(&product.brand),
        name = escape_html(&product.name),
        stars = render_stars(product.rating_half_stars()),
        reviews = product.review_count,
        price = price
    )
}

/// Product grid, or the loading, empty or error state.
pub fn render_catalog<L: Location>(view: &CatalogView<L>) -> String {
    let body = match view.state() {
        LoadState::Idle | LoadState::Loading => {
            r#"<div class="catalog-loading">Loading products...</div>"#.to_string()
        }
        LoadState::Failed => {
            let action = view
                .error_action()
                .map(|a| {
                    format!(
                        r#"<button class="catalog-error-action" data-action="{:?}">{}</button>"#,
                        a,
                        a.label()
                    )
                })
                .unwrap_or_default();
            format!(
                r#"<div class="catalog-error">
        <p>{}</p>
        {}
    </div>"#,
                escape_html(view.error_message().unwrap_or_default()),
                action
            )
        }
        LoadState::Loaded => match view.empty_state() {
            Some(empty) => format!(
                r#"<div class="catalog-empty">
        <h2>{}</h2>
        <p>{}</p>
    </div>"#,
                empty.title,
                escape_html(&empty.message)
            ),
            None => {
                let cards: String = view
                    .products()
                    .iter()
                    .map(|p| render_product_card(p, view.is_liked(&p.id)))
                    .collect();
                format!(r#"<div class="product-grid">{}</div>"#, cards)
            }
        },
    };

    format!(
        r#"<section class="catalog" data-section="catalog">
    {}
</section>"#,
        body
    )
}
