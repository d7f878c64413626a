//! Sessions page
//!
//! The status select works on labels ("En progreso"); only canonical codes
//! ("EN_PROGRESO") are ever sent. Date-time inputs hold local wall-clock
//! values and are submitted as typed.

use super::{invalid_form, Feedback, FormStatus, DEFAULT_FALLBACK};
use crate::api::ApiClient;
use crate::error::{ConsoleError, ConsoleResult};
use chrono::{DateTime, Duration, Local, TimeZone};
use fitware_shared::datetime::{iso_to_local_input, parse_local_input, to_local_input};
use fitware_shared::validation::{
    parse_number, validate_id, validate_min_count, validate_required, FieldErrors,
    DEFAULT_SESSION_EXERCISE_STATUS,
};
use fitware_shared::{code_to_label, Session, SessionExercise, SessionPayload, SessionStatus};
use serde::Serialize;
use tracing::{debug, info};

pub const MSG_CREATED: &str = "Sesión creada correctamente.";
pub const MSG_UPDATED: &str = "Sesión actualizada correctamente.";
pub const MSG_DELETED: &str = "Sesión eliminada correctamente.";
pub const MSG_EXERCISE_ASSIGNED: &str = "Ejercicio asignado a la sesión.";
pub const MSG_EXERCISE_REMOVED: &str = "Ejercicio retirado de la sesión.";
pub const MSG_INVALID_STATUS: &str = "Estado inválido.";

// ============================================================================
// Forms
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionForm {
    pub cliente_cedula: String,
    /// Status label as shown in the select
    pub estado: String,
    /// `YYYY-MM-DDTHH:mm`, local time
    pub fecha_inicio: String,
    pub fecha_fin: String,
    pub gasto_calorico: String,
}

/// Session form values that passed the local checks
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSession {
    pub client_id: String,
    pub status_label: String,
    pub start: String,
    pub end: String,
    pub calories: f64,
}

impl SessionForm {
    /// Fill the form from a server session
    pub fn from_session(session: &Session) -> Self {
        let raw_status = session
            .estado_descripcion
            .as_deref()
            .unwrap_or(session.estado.as_str());
        Self {
            cliente_cedula: session.client_id().unwrap_or_default().to_string(),
            estado: code_to_label(Some(raw_status)).unwrap_or_default(),
            fecha_inicio: iso_to_local_input(session.fecha_inicio.as_deref()).unwrap_or_default(),
            fecha_fin: iso_to_local_input(session.fecha_fin.as_deref()).unwrap_or_default(),
            gasto_calorico: session
                .gasto_calorico
                .map(|g| g.to_string())
                .unwrap_or_default(),
        }
    }

    /// Blank form starting at `now` and ending one hour later
    pub fn starting_at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let later = now.clone() + Duration::hours(1);
        Self {
            fecha_inicio: to_local_input(now),
            fecha_fin: to_local_input(&later),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<ValidSession, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("clienteCedula", validate_required(&self.cliente_cedula));
        errors.check("estado", validate_required(&self.estado));
        errors.check("fechaInicio", local_input_field(&self.fecha_inicio));
        errors.check("fechaFin", local_input_field(&self.fecha_fin));
        let calories = errors.check(
            "gastoCalorico",
            parse_number(&self.gasto_calorico).and_then(|value| {
                if value < 0.0 {
                    Err("Debe ser mayor o igual a 0".to_string())
                } else {
                    Ok(value)
                }
            }),
        );

        match calories {
            Some(calories) if errors.is_empty() => Ok(ValidSession {
                client_id: self.cliente_cedula.trim().to_string(),
                status_label: self.estado.clone(),
                start: self.fecha_inicio.clone(),
                end: self.fecha_fin.clone(),
                calories,
            }),
            _ => Err(errors),
        }
    }
}

fn local_input_field(value: &str) -> Result<(), String> {
    validate_required(value)?;
    parse_local_input(value)
        .map(|_| ())
        .map_err(|_| "Debe ser una fecha y hora válida".to_string())
}

impl ValidSession {
    /// Translate the label and build the wire body; unknown labels fail
    pub fn into_payload(self) -> Result<SessionPayload, ConsoleError> {
        let status = self.status_label.parse::<SessionStatus>().map_err(|err| {
            debug!(error = %err, "Rejected session status");
            ConsoleError::Validation(MSG_INVALID_STATUS.to_string())
        })?;
        Ok(SessionPayload {
            estado: status.code().to_string(),
            fecha_inicio: Some(self.start).filter(|s| !s.is_empty()),
            fecha_fin: Some(self.end).filter(|s| !s.is_empty()),
            gasto_calorico: Some(self.calories),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionExerciseForm {
    pub ejercicio_id: String,
    pub repeticiones: String,
    pub series: String,
    pub estado: String,
}

impl Default for SessionExerciseForm {
    fn default() -> Self {
        Self {
            ejercicio_id: String::new(),
            repeticiones: String::new(),
            series: String::new(),
            estado: DEFAULT_SESSION_EXERCISE_STATUS.to_string(),
        }
    }
}

/// Validated exercise assignment
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub exercise_id: i64,
    pub repetitions: u32,
    pub sets: u32,
    pub status: String,
}

impl SessionExerciseForm {
    pub fn validate(&self) -> Result<Assignment, FieldErrors> {
        let mut errors = FieldErrors::new();
        let exercise_id = errors.check("ejercicioId", validate_id(&self.ejercicio_id));
        let repetitions = errors.check("repeticiones", validate_min_count(&self.repeticiones, 1));
        let sets = errors.check("series", validate_min_count(&self.series, 1));
        errors.check("estado", validate_required(&self.estado));

        match (exercise_id, repetitions, sets) {
            (Some(exercise_id), Some(repetitions), Some(sets)) if errors.is_empty() => {
                Ok(Assignment {
                    exercise_id,
                    repetitions,
                    sets,
                    status: self.estado.clone(),
                })
            }
            _ => Err(errors),
        }
    }
}

// ============================================================================
// Page
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionsPage {
    #[serde(skip)]
    api: ApiClient,
    /// Client filter; empty lists every session
    pub client_filter: String,
    pub sessions: Vec<Session>,
    pub exercises: Vec<SessionExercise>,
    pub selected: Option<Session>,
    pub form: SessionForm,
    pub form_status: FormStatus,
    pub exercise_form: SessionExerciseForm,
    pub exercise_status: FormStatus,
    pub status_options: Vec<&'static str>,
    pub loading_sessions: bool,
    pub loading_exercises: bool,
    pub saving: bool,
    pub feedback: Feedback,
}

impl SessionsPage {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            client_filter: String::new(),
            sessions: Vec::new(),
            exercises: Vec::new(),
            selected: None,
            form: SessionForm::default(),
            form_status: FormStatus::default(),
            exercise_form: SessionExerciseForm::default(),
            exercise_status: FormStatus::default(),
            status_options: SessionStatus::labels().to_vec(),
            loading_sessions: false,
            loading_exercises: false,
            saving: false,
            feedback: Feedback::default(),
        }
    }

    /// Fetch sessions, backfilling `clienteCedula` from the nested client
    pub async fn load_sessions(&mut self) -> ConsoleResult<()> {
        self.loading_sessions = true;
        let filter = Some(self.client_filter.trim()).filter(|f| !f.is_empty());
        let result = self.api.sessions().list(filter).await;
        self.loading_sessions = false;
        let sessions = self.feedback.capture(result, DEFAULT_FALLBACK)?;
        self.sessions = sessions
            .into_iter()
            .map(|session| session.with_client_id(""))
            .collect();
        Ok(())
    }

    /// Apply a client filter and reload
    pub async fn filter(&mut self, client_id: &str) -> ConsoleResult<()> {
        self.client_filter = client_id.to_string();
        self.load_sessions().await
    }

    /// Select a session, fill the form and load its exercises
    pub async fn select(&mut self, session: &Session) -> ConsoleResult<()> {
        self.selected = Some(session.clone());
        self.form = SessionForm::from_session(session);
        self.form_status.reset();
        self.exercise_form = SessionExerciseForm::default();
        self.exercise_status.reset();
        debug!(session_id = ?session.id, status = %self.form.estado, "Session selected");
        self.load_exercises().await
    }

    /// Clear the selection and pre-fill a one-hour slot starting now
    pub fn start_creation(&mut self) {
        self.start_creation_at(&Local::now());
    }

    pub fn start_creation_at<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) {
        self.selected = None;
        self.form = SessionForm::starting_at(now);
        self.form_status.reset();
        self.exercise_form = SessionExerciseForm::default();
        self.exercise_status.reset();
    }

    pub async fn load_exercises(&mut self) -> ConsoleResult<()> {
        let Some(session_id) = self.selected.as_ref().and_then(|s| s.id) else {
            return Ok(());
        };

        self.loading_exercises = true;
        let result = self.api.sessions().list_exercises(session_id).await;
        self.loading_exercises = false;
        self.exercises = self.feedback.capture(result, DEFAULT_FALLBACK)?;
        Ok(())
    }

    /// Create or update the session, then reload and re-select it
    pub async fn save(&mut self) -> ConsoleResult<()> {
        let valid = match self.form.validate() {
            Ok(valid) => valid,
            Err(errors) => {
                self.form_status.mark_all_touched(&errors);
                return Err(invalid_form(&errors));
            }
        };

        self.feedback.clear();
        let client_id = valid.client_id.clone();
        let payload = match valid.into_payload() {
            Ok(payload) => payload,
            Err(err) => {
                self.feedback.fail(MSG_INVALID_STATUS);
                return Err(err);
            }
        };

        let editing_id = self.selected.as_ref().and_then(|s| s.id);
        self.saving = true;
        let result = match editing_id {
            Some(id) => {
                self.api
                    .sessions()
                    .update(id, &payload, Some(&client_id))
                    .await
            }
            None => self.api.sessions().create(&client_id, &payload).await,
        };
        self.saving = false;
        let saved = self.feedback.capture(result, DEFAULT_FALLBACK)?;

        info!(session_id = ?saved.id, status = %payload.estado, client = %client_id, "Session saved");
        self.feedback
            .succeed(if editing_id.is_some() { MSG_UPDATED } else { MSG_CREATED });
        self.load_sessions().await?;

        let normalized = saved.with_client_id(&client_id);
        self.select(&normalized).await
    }

    pub async fn delete(&mut self, session: &Session) -> ConsoleResult<()> {
        let Some(id) = session.id else {
            return Ok(());
        };

        self.saving = true;
        let result = self.api.sessions().delete(id).await;
        self.saving = false;
        self.feedback.capture(result, DEFAULT_FALLBACK)?;

        self.feedback.succeed(MSG_DELETED);
        self.selected = None;
        self.exercises.clear();
        self.load_sessions().await
    }

    /// Assign the exercise in the exercise form to the selected session
    pub async fn assign_exercise(&mut self) -> ConsoleResult<()> {
        let session_id = self.selected.as_ref().and_then(|s| s.id);
        let validated = self.exercise_form.validate();
        let (session_id, assignment) = match (session_id, validated) {
            (Some(session_id), Ok(assignment)) => (session_id, assignment),
            (_, Err(errors)) => {
                self.exercise_status.mark_all_touched(&errors);
                return Err(invalid_form(&errors));
            }
            (None, Ok(_)) => {
                self.exercise_status.touched = true;
                return Err(ConsoleError::Validation(
                    "Selecciona una sesión antes de asignar ejercicios".to_string(),
                ));
            }
        };

        self.saving = true;
        let result = self
            .api
            .sessions()
            .assign_exercise(
                session_id,
                assignment.exercise_id,
                assignment.repetitions,
                assignment.sets,
                &assignment.status,
            )
            .await;
        self.saving = false;
        self.feedback.capture(result, DEFAULT_FALLBACK)?;

        self.feedback.succeed(MSG_EXERCISE_ASSIGNED);
        self.exercise_form = SessionExerciseForm::default();
        self.exercise_status.reset();
        self.load_exercises().await
    }

    pub async fn remove_exercise(&mut self, item: &SessionExercise) -> ConsoleResult<()> {
        let Some(id) = item.id else {
            return Ok(());
        };

        self.saving = true;
        let result = self.api.sessions().remove_exercise(id).await;
        self.saving = false;
        self.feedback.capture(result, DEFAULT_FALLBACK)?;

        self.feedback.succeed(MSG_EXERCISE_REMOVED);
        self.load_exercises().await
    }
}
