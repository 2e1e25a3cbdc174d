//! AJAX form posts on the legacy pages.
//!
//! Each form posts its fields url-encoded to its declared action and shows
//! the returned HTML fragment as feedback for a couple of seconds.

use std::time::{Duration, Instant};

use salon_data::{FetchClient, Transport};
use salon_observability::StructuredLogger;

use crate::timer::Transient;

/// Shown when the post fails for any reason.
pub const GENERIC_ERROR_FRAGMENT: &str =
    r#"<div class="alert alert-danger">Something went wrong. Please try again.</div>"#;
/// Shown when required fields are blank.
pub const MISSING_FIELDS_FRAGMENT: &str =
    r#"<div class="alert alert-warning">Please fill in all required fields.</div>"#;

/// The two AJAX forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyForm {
    Contact,
    Appointment,
}

impl LegacyForm {
    pub fn selector(&self) -> &'static str {
        match self {
            LegacyForm::Contact => "#contact-form",
            LegacyForm::Appointment => "#apoint-form",
        }
    }

    /// Posted field names, in form order.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            LegacyForm::Contact => &["name", "email", "subject", "comments"],
            LegacyForm::Appointment => {
                &["name", "email", "service", "number", "date", "time", "comments"]
            }
        }
    }

    pub fn required(&self) -> &'static [&'static str] {
        match self {
            LegacyForm::Contact => &["name", "email", "comments"],
            LegacyForm::Appointment => &["name", "email", "service", "number", "date", "time"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// Server answered; its fragment is the feedback.
    Sent,
    MissingFields(Vec<&'static str>),
    /// A post is already in flight.
    Busy,
    Failed,
}

/// Controller for one form on the page.
pub struct FormController {
    form: LegacyForm,
    action: String,
    submitting: bool,
    feedback: Transient<String>,
    logger: StructuredLogger,
}

impl FormController {
    pub fn new(
        form: LegacyForm,
        action: impl Into<String>,
        hide_after: Duration,
        logger: StructuredLogger,
    ) -> Self {
        Self {
            form,
            action: action.into(),
            submitting: false,
            feedback: Transient::new(hide_after),
            logger: logger.for_view(form.selector()),
        }
    }

    pub fn form(&self) -> LegacyForm {
        self.form
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Feedback fragment, if still visible at `now`.
    pub fn feedback(&self, now: Instant) -> Option<&str> {
        self.feedback.get(now).map(String::as_str)
    }

    /// Blank required fields, in form order.
    pub fn missing_fields(&self, values: &[(&str, &str)]) -> Vec<&'static str> {
        self.form
            .required()
            .iter()
            .copied()
            .filter(|name| {
                !values
                    .iter()
                    .any(|(k, v)| k == name && !v.trim().is_empty())
            })
            .collect()
    }

    /// Post the form's fields. Values for unknown names are not sent.
    ///
    /// `clock` is read when the feedback is shown, after the response
    /// arrives for a posted form.
    pub async fn submit<T: Transport>(
        &mut self,
        client: &FetchClient<T>,
        values: &[(&str, &str)],
        clock: impl Fn() -> Instant,
    ) -> FormOutcome {
        if self.submitting {
            return FormOutcome::Busy;
        }

        let missing = self.missing_fields(values);
        if !missing.is_empty() {
            self.feedback.show(MISSING_FIELDS_FRAGMENT.to_string(), clock());
            return FormOutcome::MissingFields(missing);
        }

        let pairs: Vec<(&str, &str)> = self
            .form
            .fields()
            .iter()
            .map(|name| {
                let value = values
                    .iter()
                    .find(|(k, _)| k == name)
                    .map(|(_, v)| *v)
                    .unwrap_or("");
                (*name, value)
            })
            .collect();

        self.submitting = true;
        let result = client.post(self.action.as_str()).form(pairs).send().await;
        self.submitting = false;

        let fragment = result
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text());
        let now = clock();

        match fragment {
            Ok(html) => {
                self.logger.info_builder("form posted").field("action", self.action.as_str()).emit();
                self.feedback.show(html, now);
                FormOutcome::Sent
            }
            Err(e) => {
                self.logger
                    .error_builder("form post failed")
                    .field("action", self.action.as_str())
                    .field("error", e.to_string())
                    .emit();
                self.feedback.show(GENERIC_ERROR_FRAGMENT.to_string(), now);
                FormOutcome::Failed
            }
        }
    }
}
