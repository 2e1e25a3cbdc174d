//! Options for the third-party slide plugin on the legacy pages.
//!
//! The plugin itself is not ours; we only decide which selector gets which
//! options and serialise them for the page.

use std::collections::BTreeMap;

use serde::Serialize;

/// Items per slide at one viewport breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Breakpoint {
    pub items: u32,
}

/// Plugin options, in the plugin's own camelCase keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselOptions {
    pub items: u32,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub margin: u32,
    pub autoplay: bool,
    pub autoplay_timeout: u64,
    pub autoplay_hover_pause: bool,
    pub nav: bool,
    pub dots: bool,
    /// Keyed by minimum viewport width in pixels.
    pub responsive: BTreeMap<u32, Breakpoint>,
}

/// Selector plus the options bound to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarouselBinding {
    pub selector: &'static str,
    pub options: CarouselOptions,
}

impl CarouselBinding {
    pub fn options_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.options)
    }
}

fn breakpoints(points: &[(u32, u32)]) -> BTreeMap<u32, Breakpoint> {
    points
        .iter()
        .map(|&(width, items)| (width, Breakpoint { items }))
        .collect()
}

/// Services strip: one card on phones, three on desktop.
pub fn service_carousel() -> CarouselBinding {
    CarouselBinding {
        selector: ".service-caro",
        options: CarouselOptions {
            items: 3,
            looping: true,
            margin: 30,
            autoplay: true,
            autoplay_timeout: 4000,
            autoplay_hover_pause: true,
            nav: true,
            dots: false,
            responsive: breakpoints(&[(0, 1), (768, 2), (992, 3)]),
        },
    }
}

/// Testimonials: one quote at a time with dots.
pub fn testimonial_carousel() -> CarouselBinding {
    CarouselBinding {
        selector: ".test-caro",
        options: CarouselOptions {
            items: 1,
            looping: true,
            margin: 0,
            autoplay: true,
            autoplay_timeout: 5000,
            autoplay_hover_pause: true,
            nav: false,
            dots: true,
            responsive: breakpoints(&[(0, 1)]),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_options_json() {
        let json: serde_json::Value =
            serde_json::from_str(&service_carousel().options_json().unwrap()).unwrap();
        assert_eq!(json["loop"], true);
        assert_eq!(json["autoplayTimeout"], 4000);
        assert_eq!(json["responsive"]["768"]["items"], 2);
    }

    #[test]
    fn test_testimonial_selector() {
        let binding = testimonial_carousel();
        assert_eq!(binding.selector, ".test-caro");
        assert!(binding.options.dots);
        assert!(!binding.options.nav);
    }
}
