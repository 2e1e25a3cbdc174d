//! HTML section renderers for the storefront views.

mod blog;
mod catalog;
mod detail;
mod featured;

pub use blog::*;
pub use catalog::*;
pub use detail::*;
pub use featured::*;

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Five stars, filled to the nearest half.
pub(crate) fn render_stars(half_stars: u8) -> String {
    (0..5u8)
        .map(|i| {
            let filled = half_stars.saturating_sub(i * 2);
            match filled {
                0 => r#"<span class="star star--empty">☆</span>"#,
                1 => r#"<span class="star star--half">★</span>"#,
                _ => r#"<span class="star star--full">★</span>"#,
            }
        })
        .collect()
}
