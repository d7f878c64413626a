use super::ApiClient;
use crate::error::ConsoleResult;
use fitware_shared::{ReportQuery, ReportSummary};
use tracing::info;

const REPORTS: &str = "reportes";

/// Operational reports, as JSON summary or rendered PDF
pub struct ReportsApi<'a> {
    api: &'a ApiClient,
}

impl<'a> ReportsApi<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// `GET /reportes?desde=&hasta=&sections=...`
    pub async fn summary(&self, query: &ReportQuery) -> ConsoleResult<ReportSummary> {
        self.api.get_json(&[REPORTS], &query.to_pairs()).await
    }

    /// `GET /reportes/pdf` with the same filters, returning the raw document
    pub async fn pdf(&self, query: &ReportQuery) -> ConsoleResult<Vec<u8>> {
        let bytes = self
            .api
            .get_bytes(&[REPORTS, "pdf"], &query.to_pairs())
            .await?;
        info!(size = bytes.len(), sections = query.sections.len(), "Downloaded report PDF");
        Ok(bytes)
    }
}
