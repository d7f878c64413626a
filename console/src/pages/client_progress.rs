//! Progress history of one client (`/clientes/{id}/progreso`)

use super::{invalid_form, number_input, Feedback, FormStatus, DEFAULT_FALLBACK};
use crate::api::ApiClient;
use crate::error::ConsoleResult;
use crate::routes::Route;
use fitware_shared::validation::{validate_min_value, validate_required, FieldErrors};
use fitware_shared::Progress;
use serde::Serialize;
use tracing::debug;

/// Progress form buffer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressForm {
    pub fecha: String,
    pub peso: String,
    pub imc: String,
    pub observaciones: String,
}

impl ProgressForm {
    pub fn from_entry(entry: &Progress) -> Self {
        Self {
            fecha: entry.fecha.clone(),
            peso: number_input(entry.peso),
            imc: number_input(entry.imc),
            observaciones: entry.observaciones.clone().unwrap_or_default(),
        }
    }

    /// Date required, weight at least 20, BMI at least 10
    pub fn validate(&self) -> Result<Progress, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("fecha", validate_required(&self.fecha));
        let peso = errors.check("peso", validate_min_value(&self.peso, 20.0));
        let imc = errors.check("imc", validate_min_value(&self.imc, 10.0));

        match (peso, imc) {
            (Some(peso), Some(imc)) if errors.is_empty() => Ok(Progress {
                id: None,
                fecha: self.fecha.clone(),
                peso,
                imc,
                observaciones: Some(self.observaciones.clone()).filter(|o| !o.trim().is_empty()),
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProgressPage {
    #[serde(skip)]
    api: ApiClient,
    pub cedula: String,
    pub entries: Vec<Progress>,
    pub form: ProgressForm,
    pub form_status: FormStatus,
    pub editing: Option<Progress>,
    pub loading: bool,
    pub saving: bool,
    pub feedback: Feedback,
}

impl ClientProgressPage {
    /// Open the page for `cedula`; an empty identifier sends the user back
    /// to the clients list
    pub fn open(api: ApiClient, cedula: &str) -> Result<Self, Route> {
        let cedula = cedula.trim();
        if cedula.is_empty() {
            return Err(Route::Clients);
        }
        Ok(Self {
            api,
            cedula: cedula.to_string(),
            entries: Vec::new(),
            form: ProgressForm::default(),
            form_status: FormStatus::default(),
            editing: None,
            loading: false,
            saving: false,
            feedback: Feedback::default(),
        })
    }

    pub async fn load(&mut self) -> ConsoleResult<()> {
        self.loading = true;
        self.feedback.error = None;
        let result = self.api.clients().list_progress(&self.cedula).await;
        self.loading = false;
        self.entries = self.feedback.capture(result, DEFAULT_FALLBACK)?;
        debug!(cedula = %self.cedula, count = self.entries.len(), "Progress loaded");
        Ok(())
    }

    pub fn edit(&mut self, entry: &Progress) {
        self.form = ProgressForm::from_entry(entry);
        self.form_status.reset();
        self.editing = Some(entry.clone());
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.form = ProgressForm::default();
        self.form_status.reset();
    }

    /// Create an entry, or update the one being edited, then reload
    pub async fn save(&mut self) -> ConsoleResult<()> {
        let payload = match self.form.validate() {
            Ok(payload) => payload,
            Err(errors) => {
                self.form_status.mark_all_touched(&errors);
                return Err(invalid_form(&errors));
            }
        };

        self.saving = true;
        let editing_id = self.editing.as_ref().and_then(|entry| entry.id);
        let result = match editing_id {
            Some(id) => self.api.clients().update_progress(id, &payload).await,
            None => self.api.clients().add_progress(&self.cedula, &payload).await,
        };
        self.saving = false;
        self.feedback.capture(result, DEFAULT_FALLBACK)?;

        self.cancel_edit();
        self.load().await
    }

    /// Delete an entry; entries without an id are ignored
    pub async fn delete(&mut self, entry: &Progress) -> ConsoleResult<()> {
        let Some(id) = entry.id else {
            return Ok(());
        };

        self.saving = true;
        let result = self.api.clients().delete_progress(id).await;
        self.saving = false;
        self.feedback.capture(result, DEFAULT_FALLBACK)?;
        self.load().await
    }
}
