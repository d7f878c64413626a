//! Page view-controllers
//!
//! Each page owns its form buffers and fetched lists exclusively and talks
//! to the API only through [`ApiClient`](crate::api::ApiClient). Actions take
//! `&mut self`, so a page never has two requests of its own in flight.
//!
//! Failed actions leave previously displayed data alone and set the page's
//! error banner. Form checks run before any request; a failing form is
//! marked touched and nothing is sent.

pub mod client_progress;
pub mod clients;
pub mod dashboard;
pub mod exercises;
pub mod reports;
pub mod routines;
pub mod sessions;

pub use client_progress::ClientProgressPage;
pub use clients::ClientsPage;
pub use dashboard::DashboardPage;
pub use exercises::ExercisesPage;
pub use reports::ReportsPage;
pub use routines::RoutinesPage;
pub use sessions::SessionsPage;

use crate::error::{ConsoleError, ConsoleResult};
use fitware_shared::validation::FieldErrors;
use serde::Serialize;

/// Generic banner for pages without their own wording
pub const DEFAULT_FALLBACK: &str = "No se pudo completar la operación.";

/// Success and error banners of a page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub error: Option<String>,
    pub success: Option<String>,
}

impl Feedback {
    pub fn clear(&mut self) {
        self.error = None;
        self.success = None;
    }

    pub fn succeed(&mut self, message: &str) {
        self.success = Some(message.to_string());
    }

    pub fn fail(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    /// Record a failed result in the error banner and pass it through
    pub(crate) fn capture<T>(&mut self, result: ConsoleResult<T>, fallback: &str) -> ConsoleResult<T> {
        if let Err(err) = &result {
            self.error = Some(err.user_message(fallback));
        }
        result
    }
}

/// Touched flag and failing fields of one form
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormStatus {
    pub touched: bool,
    pub invalid_fields: Vec<String>,
    pub messages: Vec<String>,
}

impl FormStatus {
    /// Mark every field touched and remember which ones failed
    pub fn mark_all_touched(&mut self, errors: &FieldErrors) {
        self.touched = true;
        self.invalid_fields = errors.errors().iter().map(|e| e.field.clone()).collect();
        self.messages = errors.errors().iter().map(|e| e.user_message()).collect();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_invalid(&self, field: &str) -> bool {
        self.invalid_fields.iter().any(|f| f == field)
    }
}

/// Error returned when a form fails its local checks
pub(crate) fn invalid_form(errors: &FieldErrors) -> ConsoleError {
    let summary = errors
        .errors()
        .iter()
        .map(|e| e.user_message())
        .collect::<Vec<_>>()
        .join("; ");
    ConsoleError::Validation(summary)
}

/// Render a number the way a numeric input shows it
pub(crate) fn number_input(value: f64) -> String {
    value.to_string()
}
