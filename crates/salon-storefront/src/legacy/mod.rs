//! Scripts for the older marketing pages: slide carousels, the mobile menu
//! and two AJAX forms.

mod carousel;
mod forms;
mod menu;

pub use carousel::*;
pub use forms::*;
pub use menu::*;

use salon_observability::StructuredLogger;

use crate::config::StorefrontConfig;

/// Everything the legacy pages bind on load.
pub struct LegacyPage {
    pub menu: MobileMenu,
    pub contact: FormController,
    pub appointment: FormController,
    carousels: Vec<CarouselBinding>,
}

impl LegacyPage {
    pub fn new(
        config: &StorefrontConfig,
        contact_action: impl Into<String>,
        appointment_action: impl Into<String>,
        logger: StructuredLogger,
    ) -> Self {
        let hide_after = config.feedback.hide_after();
        Self {
            menu: MobileMenu::new(),
            contact: FormController::new(
                LegacyForm::Contact,
                contact_action,
                hide_after,
                logger.clone(),
            ),
            appointment: FormController::new(
                LegacyForm::Appointment,
                appointment_action,
                hide_after,
                logger,
            ),
            carousels: vec![service_carousel(), testimonial_carousel()],
        }
    }

    pub fn carousels(&self) -> &[CarouselBinding] {
        &self.carousels
    }

    /// Inline script that starts the slide plugin on each bound selector.
    pub fn bootstrap_script(&self) -> Result<String, serde_json::Error> {
        let mut lines = Vec::with_capacity(self.carousels.len());
        for binding in &self.carousels {
            lines.push(format!(
                "  $('{}').owlCarousel({});",
                binding.selector,
                binding.options_json()?
            ));
        }
        Ok(format!(
            "<script>\n$(function () {{\n{}\n}});\n</script>",
            lines.join("\n")
        ))
    }
}
