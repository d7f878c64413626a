//! Reports page: section catalogue, date range presets, summary query and
//! PDF export

use super::Feedback;
use crate::api::ApiClient;
use crate::error::{ConsoleError, ConsoleResult};
use chrono::{Datelike, Duration, Local, NaiveDate};
use fitware_shared::datetime::to_date_input;
use fitware_shared::{ReportCategory, ReportQuery, ReportSection, ReportSummary};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const FALLBACK: &str = "No se pudo generar el reporte, intenta nuevamente.";
pub const MSG_SELECT_TO_QUERY: &str = "Selecciona al menos un reporte para generar los resultados.";
pub const MSG_SELECT_TO_DOWNLOAD: &str = "Selecciona al menos un reporte antes de descargar.";

/// Section selected when the page opens
pub const DEFAULT_SECTION: &str = "clientes-registrados";

// ============================================================================
// Catalogue
// ============================================================================

/// One selectable report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportOption {
    pub id: &'static str,
    pub label: &'static str,
    pub category: ReportCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helper: Option<&'static str>,
}

const fn option(
    id: &'static str,
    label: &'static str,
    category: ReportCategory,
    helper: Option<&'static str>,
) -> ReportOption {
    ReportOption {
        id,
        label,
        category,
        helper,
    }
}

pub const REPORT_OPTIONS: [ReportOption; 10] = [
    option(
        "clientes-registrados",
        "Clientes inscritos en el periodo",
        ReportCategory::Simple,
        Some("Altas por fecha de inscripción."),
    ),
    option(
        "sesiones-periodo",
        "Sesiones programadas en el rango",
        ReportCategory::Simple,
        Some("Últimas 25 sesiones registradas."),
    ),
    option(
        "progresos-periodo",
        "Registros de progreso",
        ReportCategory::Simple,
        Some("Últimos registros corporales de clientes."),
    ),
    option(
        "sesiones-estado",
        "Volumen de sesiones por estado",
        ReportCategory::Intermedio,
        Some("Conteo agrupado por estado."),
    ),
    option(
        "top-clientes-sesiones",
        "Top clientes por sesiones completadas",
        ReportCategory::Intermedio,
        Some("Ranking con calorías promedio."),
    ),
    option(
        "rutinas-entrenador",
        "Producción de rutinas por entrenador",
        ReportCategory::Intermedio,
        None,
    ),
    option(
        "peso-promedio-mensual",
        "Evolución de peso promedio mensual",
        ReportCategory::Intermedio,
        None,
    ),
    option(
        "mes-activo-calorias",
        "Mes con más sesiones completadas",
        ReportCategory::Avanzado,
        None,
    ),
    option(
        "clientes-sin-progreso",
        "Clientes sin seguimiento en 45 días",
        ReportCategory::Avanzado,
        None,
    ),
    option(
        "variacion-peso",
        "Clientes con mayor variación de peso",
        ReportCategory::Avanzado,
        None,
    ),
];

/// Catalogue entries of one category, in catalogue order
pub fn options_by(category: ReportCategory) -> Vec<&'static ReportOption> {
    REPORT_OPTIONS
        .iter()
        .filter(|option| option.category == category)
        .collect()
}

// ============================================================================
// Date presets
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DatePreset {
    Custom,
    CurrentMonth,
    PreviousMonth,
    #[serde(rename = "last-30")]
    Last30,
}

impl DatePreset {
    pub const ALL: [DatePreset; 4] = [
        DatePreset::Custom,
        DatePreset::CurrentMonth,
        DatePreset::PreviousMonth,
        DatePreset::Last30,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DatePreset::Custom => "Personalizado",
            DatePreset::CurrentMonth => "Mes actual",
            DatePreset::PreviousMonth => "Mes anterior",
            DatePreset::Last30 => "Últimos 30 días",
        }
    }

    /// Date range for `today`; `Custom` has none
    pub fn range(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            DatePreset::Custom => None,
            DatePreset::CurrentMonth => {
                let first = first_of_month(today);
                Some((first, last_of_month(first)))
            }
            DatePreset::PreviousMonth => {
                let previous = first_of_month(today).pred_opt()?;
                Some((first_of_month(previous), previous))
            }
            DatePreset::Last30 => Some((today - Duration::days(30), today)),
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn last_of_month(first: NaiveDate) -> NaiveDate {
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    next.and_then(|n| n.pred_opt()).unwrap_or(first)
}

// ============================================================================
// Page
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportsPage {
    #[serde(skip)]
    api: ApiClient,
    #[serde(skip)]
    output_dir: PathBuf,
    pub preset: DatePreset,
    /// `YYYY-MM-DD`, empty when unset
    pub desde: String,
    pub hasta: String,
    /// Selected section ids in selection order
    pub selected: Vec<String>,
    pub summary: Option<ReportSummary>,
    pub loading: bool,
    pub downloading: bool,
    pub feedback: Feedback,
}

impl ReportsPage {
    /// Page opened today with the default section over the last 30 days
    pub fn new(api: ApiClient, output_dir: impl Into<PathBuf>) -> Self {
        Self::new_at(api, output_dir, Local::now().date_naive())
    }

    pub fn new_at(api: ApiClient, output_dir: impl Into<PathBuf>, today: NaiveDate) -> Self {
        let mut page = Self {
            api,
            output_dir: output_dir.into(),
            preset: DatePreset::Custom,
            desde: String::new(),
            hasta: String::new(),
            selected: vec![DEFAULT_SECTION.to_string()],
            summary: None,
            loading: false,
            downloading: false,
            feedback: Feedback::default(),
        };
        page.apply_preset(DatePreset::Last30, today);
        page
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Switch preset, filling the range unless it is `Custom`
    pub fn apply_preset(&mut self, preset: DatePreset, today: NaiveDate) {
        self.preset = preset;
        if let Some((from, to)) = preset.range(today) {
            self.desde = to_date_input(from);
            self.hasta = to_date_input(to);
        }
    }

    /// Typing a date by hand switches to the custom preset
    pub fn set_range(&mut self, desde: &str, hasta: &str) {
        self.preset = DatePreset::Custom;
        self.desde = desde.to_string();
        self.hasta = hasta.to_string();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Add or remove a section from the selection
    pub fn toggle(&mut self, id: &str) {
        if self.is_selected(id) {
            self.selected.retain(|s| s != id);
        } else {
            self.selected.push(id.to_string());
        }
    }

    pub fn select_all(&mut self) {
        self.selected = REPORT_OPTIONS.iter().map(|o| o.id.to_string()).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.summary = None;
    }

    fn report_query(&self) -> ReportQuery {
        ReportQuery {
            desde: Some(self.desde.clone()).filter(|d| !d.is_empty()),
            hasta: Some(self.hasta.clone()).filter(|h| !h.is_empty()),
            sections: self.selected.clone(),
        }
    }

    /// Fetch the summary for the current range and selection
    pub async fn query(&mut self) -> ConsoleResult<()> {
        if self.selected.is_empty() {
            self.summary = None;
            self.feedback.fail(MSG_SELECT_TO_QUERY);
            return Err(ConsoleError::Validation(MSG_SELECT_TO_QUERY.to_string()));
        }

        self.feedback.error = None;
        self.loading = true;
        let query = self.report_query();
        debug!(sections = ?query.sections, desde = ?query.desde, hasta = ?query.hasta, "Querying reports");
        let result = self.api.reports().summary(&query).await;
        self.loading = false;
        self.summary = Some(self.feedback.capture(result, FALLBACK)?);
        Ok(())
    }

    /// Download the PDF into the output directory
    ///
    /// Returns the written path, or `None` when a download is already
    /// running.
    pub async fn download(&mut self) -> ConsoleResult<Option<PathBuf>> {
        if self.downloading {
            return Ok(None);
        }
        if self.selected.is_empty() {
            self.feedback.fail(MSG_SELECT_TO_DOWNLOAD);
            return Err(ConsoleError::Validation(MSG_SELECT_TO_DOWNLOAD.to_string()));
        }

        self.feedback.error = None;
        self.downloading = true;
        let result = self.api.reports().pdf(&self.report_query()).await;
        self.downloading = false;
        let bytes = self.feedback.capture(result, FALLBACK)?;

        let path = self.output_dir.join(self.file_name());
        let written = tokio::fs::write(&path, &bytes).await;
        self.feedback.capture(written.map_err(ConsoleError::from), FALLBACK)?;
        info!(path = %path.display(), size = bytes.len(), "Report saved");
        Ok(Some(path))
    }

    /// `reportes-fitware-{desde}-a-{hasta}.pdf`, falling back to the
    /// summary range and then to placeholders
    pub fn file_name(&self) -> String {
        let summary = self.summary.as_ref();
        let from = non_empty(&self.desde)
            .or_else(|| summary.and_then(|s| non_empty(&s.from)))
            .unwrap_or("inicio");
        let to = non_empty(&self.hasta)
            .or_else(|| summary.and_then(|s| non_empty(&s.to)))
            .unwrap_or("fin");
        format!("reportes-fitware-{}-a-{}.pdf", from, to)
    }

    /// Summary sections of one category; empty before any query
    pub fn sections_by(&self, category: ReportCategory) -> Vec<&ReportSection> {
        self.summary
            .as_ref()
            .map(|summary| summary.sections_by(category))
            .unwrap_or_default()
    }

    pub fn has_rows(section: &ReportSection) -> bool {
        section.has_rows()
    }
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value).filter(|v| !v.is_empty())
}
