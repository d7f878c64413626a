//! API request and response types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::null_as_default;

/// Error body returned by the server on failed requests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
}

// ============================================================================
// Reports
// ============================================================================

/// Report grouping by query complexity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportCategory {
    Simple,
    Intermedio,
    Avanzado,
}

impl ReportCategory {
    pub const ALL: [ReportCategory; 3] = [
        ReportCategory::Simple,
        ReportCategory::Intermedio,
        ReportCategory::Avanzado,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ReportCategory::Simple => "Consultas simples",
            ReportCategory::Intermedio => "Consultas intermedias",
            ReportCategory::Avanzado => "Consultas avanzadas",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ReportCategory::Simple => "Listados directos para una visión rápida.",
            ReportCategory::Intermedio => "Agrupaciones con joins y consolidaciones.",
            ReportCategory::Avanzado => "KPIs con subconsultas y lógica analítica.",
        }
    }
}

impl fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ReportCategory::Simple => "SIMPLE",
            ReportCategory::Intermedio => "INTERMEDIO",
            ReportCategory::Avanzado => "AVANZADO",
        };
        f.write_str(code)
    }
}

/// One tabular section of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    pub id: String,
    pub category: ReportCategory,
    pub title: String,
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rows: Vec<Vec<String>>,
}

impl ReportSection {
    pub fn has_rows(&self) -> bool {
        !self.rows.is_empty()
    }
}

/// Report response for a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub from: String,
    pub to: String,
    pub generated_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sections: Vec<ReportSection>,
}

impl ReportSummary {
    /// Sections belonging to one category, in server order
    pub fn sections_by(&self, category: ReportCategory) -> Vec<&ReportSection> {
        self.sections
            .iter()
            .filter(|section| section.category == category)
            .collect()
    }
}

/// Report query filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportQuery {
    pub desde: Option<String>,
    pub hasta: Option<String>,
    pub sections: Vec<String>,
}

impl ReportQuery {
    /// Query pairs in wire order; each section becomes its own `sections` entry
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2 + self.sections.len());
        if let Some(desde) = self.desde.as_ref().filter(|d| !d.is_empty()) {
            pairs.push(("desde", desde.clone()));
        }
        if let Some(hasta) = self.hasta.as_ref().filter(|h| !h.is_empty()) {
            pairs.push(("hasta", hasta.clone()));
        }
        for section in &self.sections {
            pairs.push(("sections", section.clone()));
        }
        pairs
    }
}
