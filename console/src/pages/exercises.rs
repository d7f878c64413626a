//! Exercise catalogue page

use super::{invalid_form, Feedback, FormStatus};
use crate::api::ApiClient;
use crate::error::ConsoleResult;
use fitware_shared::filter::filter_exercises;
use fitware_shared::validation::{
    validate_min_length, validate_one_of, validate_required, FieldErrors, VALID_EXERCISE_TYPES,
};
use fitware_shared::Exercise;
use serde::Serialize;

pub const FALLBACK: &str = "Ocurrió un error inesperado. Intenta de nuevo.";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseForm {
    pub nombre: String,
    pub descripcion: String,
    pub tipo: String,
    pub equipamiento: String,
}

impl ExerciseForm {
    pub fn validate(&self) -> Result<Exercise, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("nombre", validate_min_length(&self.nombre, 3));
        errors.check("descripcion", validate_min_length(&self.descripcion, 5));
        errors.check("tipo", validate_one_of(&self.tipo, VALID_EXERCISE_TYPES));
        errors.check("equipamiento", validate_required(&self.equipamiento));

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Exercise {
            id: None,
            nombre: self.nombre.clone(),
            descripcion: self.descripcion.clone(),
            tipo: self.tipo.clone(),
            equipamiento: self.equipamiento.clone(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExercisesPage {
    #[serde(skip)]
    api: ApiClient,
    pub exercises: Vec<Exercise>,
    pub filtered: Vec<Exercise>,
    pub search_term: String,
    pub form: ExerciseForm,
    pub form_status: FormStatus,
    pub editing_id: Option<i64>,
    pub loading: bool,
    pub saving: bool,
    pub feedback: Feedback,
}

impl ExercisesPage {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            exercises: Vec::new(),
            filtered: Vec::new(),
            search_term: String::new(),
            form: ExerciseForm::default(),
            form_status: FormStatus::default(),
            editing_id: None,
            loading: false,
            saving: false,
            feedback: Feedback::default(),
        }
    }

    pub async fn load(&mut self) -> ConsoleResult<()> {
        self.loading = true;
        self.feedback.error = None;
        let result = self.api.exercises().list().await;
        self.loading = false;
        self.exercises = self.feedback.capture(result, FALLBACK)?;
        self.search_term.clear();
        self.filtered = self.exercises.clone();
        Ok(())
    }

    /// Filter the full list by name or type
    pub fn search(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.filtered = filter_exercises(&self.exercises, term)
            .into_iter()
            .cloned()
            .collect();
    }

    pub fn edit(&mut self, exercise: &Exercise) {
        self.editing_id = exercise.id;
        self.form = ExerciseForm {
            nombre: exercise.nombre.clone(),
            descripcion: exercise.descripcion.clone(),
            tipo: exercise.tipo.clone(),
            equipamiento: exercise.equipamiento.clone(),
        };
        self.form_status.reset();
    }

    pub fn cancel_edit(&mut self) {
        self.editing_id = None;
        self.form = ExerciseForm::default();
        self.form_status.reset();
    }

    pub async fn save(&mut self) -> ConsoleResult<()> {
        let payload = match self.form.validate() {
            Ok(payload) => payload,
            Err(errors) => {
                self.form_status.mark_all_touched(&errors);
                return Err(invalid_form(&errors));
            }
        };

        self.saving = true;
        let result = match self.editing_id {
            Some(id) => self.api.exercises().update(id, &payload).await,
            None => self.api.exercises().create(&payload).await,
        };
        self.saving = false;
        self.feedback.capture(result, FALLBACK)?;

        self.cancel_edit();
        self.load().await
    }

    pub async fn delete(&mut self, id: Option<i64>) -> ConsoleResult<()> {
        let Some(id) = id else {
            return Ok(());
        };

        self.saving = true;
        let result = self.api.exercises().delete(id).await;
        self.saving = false;
        self.feedback.capture(result, FALLBACK)?;
        self.load().await
    }
}
