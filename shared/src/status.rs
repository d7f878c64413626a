//! Session status codes and their display labels
//!
//! The server stores one of four canonical codes; the console shows a
//! human label. Translation is deliberately asymmetric:
//!
//! - code → label never fails: an unknown code is shown verbatim.
//! - label → code can fail: nothing outside the canonical set is sent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::NormalizeError;

/// Canonical session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    #[serde(rename = "PROGRAMADA")]
    Scheduled,
    #[serde(rename = "EN_PROGRESO")]
    InProgress,
    #[serde(rename = "COMPLETADA")]
    Completed,
    #[serde(rename = "CANCELADA")]
    Cancelled,
}

/// (status, canonical code, display label)
const STATUS_TABLE: [(SessionStatus, &str, &str); 4] = [
    (SessionStatus::Scheduled, "PROGRAMADA", "Programada"),
    (SessionStatus::InProgress, "EN_PROGRESO", "En progreso"),
    (SessionStatus::Completed, "COMPLETADA", "Completada"),
    (SessionStatus::Cancelled, "CANCELADA", "Cancelada"),
];

impl SessionStatus {
    pub const ALL: [SessionStatus; 4] = [
        SessionStatus::Scheduled,
        SessionStatus::InProgress,
        SessionStatus::Completed,
        SessionStatus::Cancelled,
    ];

    /// Code the server stores and expects
    pub fn code(&self) -> &'static str {
        STATUS_TABLE
            .iter()
            .find(|(status, _, _)| status == self)
            .map(|(_, code, _)| *code)
            .unwrap_or_default()
    }

    /// Label shown in the console
    pub fn label(&self) -> &'static str {
        STATUS_TABLE
            .iter()
            .find(|(status, _, _)| status == self)
            .map(|(_, _, label)| *label)
            .unwrap_or_default()
    }

    /// Exact code lookup, no normalization
    pub fn from_code(code: &str) -> Option<Self> {
        STATUS_TABLE
            .iter()
            .find(|(_, c, _)| *c == code)
            .map(|(status, _, _)| *status)
    }

    /// Exact label lookup, no normalization
    pub fn from_label(label: &str) -> Option<Self> {
        STATUS_TABLE
            .iter()
            .find(|(_, _, l)| *l == label)
            .map(|(status, _, _)| *status)
    }

    /// Labels in display order, for select inputs
    pub fn labels() -> [&'static str; 4] {
        Self::ALL.map(|status| status.label())
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Parses a form label with the same rules as [`label_to_status`]
impl FromStr for SessionStatus {
    type Err = NormalizeError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        label_to_status(Some(label))
            .ok_or_else(|| NormalizeError::UnknownStatus(label.to_string()))
    }
}

/// Translate a label picked in the form into the status to submit
///
/// An exact (trimmed) label match wins. Otherwise the input is trimmed,
/// uppercased and its first space replaced by `_`; the result is accepted
/// only when it is itself a canonical code. Anything else yields `None`.
pub fn label_to_status(label: Option<&str>) -> Option<SessionStatus> {
    let label = label.filter(|l| !l.is_empty())?;
    let trimmed = label.trim();
    if let Some(status) = SessionStatus::from_label(trimmed) {
        return Some(status);
    }
    let normalized = trimmed.to_uppercase().replacen(' ', "_", 1);
    SessionStatus::from_code(&normalized)
}

/// Translate a server code into the label to display
///
/// Known codes (compared trimmed and uppercased) map to their label; any
/// other non-empty value is returned unchanged.
pub fn code_to_label(code: Option<&str>) -> Option<String> {
    let code = code.filter(|c| !c.is_empty())?;
    let key = code.trim().to_uppercase();
    match SessionStatus::from_code(&key) {
        Some(status) => Some(status.label().to_string()),
        None => Some(code.to_string()),
    }
}
