//! View-models. Each owns its state and exposes read-only accessors; the
//! host drives them with operations, awaited fetches and clock instants.

pub mod blog_admin;
pub mod catalog;
pub mod detail;
pub mod featured;
pub mod home;

use salon_data::ShapeDiagnostic;
use salon_observability::StructuredLogger;

/// What an error state offers the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorAction {
    /// Re-run the failed fetch in place.
    Retry,
    /// Reload the whole page.
    ReloadPage,
}

impl ErrorAction {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorAction::Retry => "Try Again",
            ErrorAction::ReloadPage => "Reload Page",
        }
    }
}

/// Shape problems are logged, never shown.
pub(crate) fn log_diagnostics(logger: &StructuredLogger, diagnostics: &[ShapeDiagnostic]) {
    for diagnostic in diagnostics {
        logger
            .warn_builder("unexpected response shape")
            .field("endpoint", diagnostic.endpoint())
            .field("detail", diagnostic.to_string())
            .emit();
    }
}
