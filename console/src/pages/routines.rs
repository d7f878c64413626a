//! Routines page
//!
//! Three nested levels: routines, the meal plans of the selected routine,
//! and the foods of the selected plan. Deleting a plan or a food and adding
//! a food update the local lists directly instead of reloading.

use super::{invalid_form, Feedback, FormStatus, DEFAULT_FALLBACK};
use crate::api::ApiClient;
use crate::error::{ConsoleError, ConsoleResult};
use fitware_shared::datetime::parse_date_input;
use fitware_shared::validation::{
    validate_id, validate_min_count, validate_one_of, validate_required, FieldErrors, VALID_MEALS,
};
use fitware_shared::{MealPlan, MealPlanPayload, PlanFood, Routine, RoutinePayload};
use serde::Serialize;
use tracing::info;

pub const MSG_ROUTINE_CREATED: &str = "Rutina creada correctamente.";
pub const MSG_ROUTINE_UPDATED: &str = "Rutina actualizada correctamente.";
pub const MSG_ROUTINE_DELETED: &str = "Rutina eliminada.";
pub const MSG_PLAN_CREATED: &str = "Plan creado correctamente.";
pub const MSG_PLAN_UPDATED: &str = "Plan actualizado correctamente.";
pub const MSG_PLAN_DELETED: &str = "Plan eliminado.";
pub const MSG_FOOD_ADDED: &str = "Alimento agregado al plan.";
pub const MSG_FOOD_DELETED: &str = "Alimento eliminado.";

// ============================================================================
// Forms
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineForm {
    pub entrenador_cedula: String,
    pub nombre: String,
    pub objetivo: String,
    pub duracion_semanas: String,
}

impl RoutineForm {
    /// Returns the coach identifier alongside the body
    pub fn validate(&self) -> Result<(String, RoutinePayload), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("entrenadorCedula", validate_required(&self.entrenador_cedula));
        errors.check("nombre", validate_required(&self.nombre));
        errors.check("objetivo", validate_required(&self.objetivo));
        let weeks = errors.check("duracionSemanas", validate_min_count(&self.duracion_semanas, 1));

        match weeks {
            Some(duracion_semanas) if errors.is_empty() => Ok((
                self.entrenador_cedula.clone(),
                RoutinePayload {
                    nombre: self.nombre.clone(),
                    objetivo: self.objetivo.clone(),
                    duracion_semanas,
                },
            )),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanForm {
    pub nombre: String,
    pub descripcion: String,
    pub duracion_dias: String,
    pub fecha_inicio: String,
    pub fecha_fin: String,
}

impl PlanForm {
    pub fn validate(&self) -> Result<MealPlanPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("nombre", validate_required(&self.nombre));
        errors.check("descripcion", validate_required(&self.descripcion));
        let days = errors.check("duracionDias", validate_min_count(&self.duracion_dias, 1));
        errors.check("fechaInicio", date_field(&self.fecha_inicio));
        errors.check("fechaFin", date_field(&self.fecha_fin));

        match days {
            Some(duracion_dias) if errors.is_empty() => Ok(MealPlanPayload {
                nombre: self.nombre.clone(),
                descripcion: self.descripcion.clone(),
                duracion_dias,
                fecha_inicio: self.fecha_inicio.clone(),
                fecha_fin: self.fecha_fin.clone(),
            }),
            _ => Err(errors),
        }
    }
}

fn date_field(value: &str) -> Result<(), String> {
    validate_required(value)?;
    parse_date_input(value)
        .map(|_| ())
        .map_err(|_| "Debe ser una fecha válida".to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodForm {
    pub alimento_id: String,
    /// Unit-bearing quantity, sent verbatim
    pub cantidad: String,
    pub comida_del_dia: String,
}

/// Validated food attachment
#[derive(Debug, Clone, PartialEq)]
pub struct FoodAttachment {
    pub food_id: i64,
    pub quantity: String,
    pub meal: String,
}

impl FoodForm {
    pub fn validate(&self) -> Result<FoodAttachment, FieldErrors> {
        let mut errors = FieldErrors::new();
        let food_id = errors.check("alimentoId", validate_id(&self.alimento_id));
        errors.check("cantidad", validate_required(&self.cantidad));
        errors.check("comidaDelDia", validate_one_of(&self.comida_del_dia, VALID_MEALS));

        match food_id {
            Some(food_id) if errors.is_empty() => Ok(FoodAttachment {
                food_id,
                quantity: self.cantidad.clone(),
                meal: self.comida_del_dia.clone(),
            }),
            _ => Err(errors),
        }
    }
}

// ============================================================================
// Page
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutinesPage {
    #[serde(skip)]
    api: ApiClient,
    pub routines: Vec<Routine>,
    pub plans: Vec<MealPlan>,
    pub foods: Vec<PlanFood>,
    pub selected_routine: Option<Routine>,
    pub selected_plan: Option<MealPlan>,
    pub editing_routine: bool,
    pub editing_plan: bool,
    pub routine_form: RoutineForm,
    pub plan_form: PlanForm,
    pub food_form: FoodForm,
    pub routine_status: FormStatus,
    pub plan_status: FormStatus,
    pub food_status: FormStatus,
    pub meals: Vec<&'static str>,
    pub loading_routines: bool,
    pub loading_plans: bool,
    pub loading_foods: bool,
    pub saving: bool,
    pub feedback: Feedback,
}

impl RoutinesPage {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            routines: Vec::new(),
            plans: Vec::new(),
            foods: Vec::new(),
            selected_routine: None,
            selected_plan: None,
            editing_routine: false,
            editing_plan: false,
            routine_form: RoutineForm::default(),
            plan_form: PlanForm::default(),
            food_form: FoodForm::default(),
            routine_status: FormStatus::default(),
            plan_status: FormStatus::default(),
            food_status: FormStatus::default(),
            meals: VALID_MEALS.to_vec(),
            loading_routines: false,
            loading_plans: false,
            loading_foods: false,
            saving: false,
            feedback: Feedback::default(),
        }
    }

    // ------------------------------------------------------------------------
    // Routines
    // ------------------------------------------------------------------------

    pub async fn load_routines(&mut self) -> ConsoleResult<()> {
        self.loading_routines = true;
        self.feedback.error = None;
        let result = self.api.routines().list(None).await;
        self.loading_routines = false;
        self.routines = self.feedback.capture(result, DEFAULT_FALLBACK)?;
        Ok(())
    }

    /// Select a routine and load its plans
    pub async fn select_routine(&mut self, routine: &Routine) -> ConsoleResult<()> {
        self.selected_routine = Some(routine.clone());
        self.selected_plan = None;
        self.plans.clear();
        self.foods.clear();
        self.plan_form = PlanForm::default();
        self.food_form = FoodForm::default();
        self.editing_plan = false;
        self.load_plans().await
    }

    /// Select a routine and fill the routine form for editing
    pub async fn edit_routine(&mut self, routine: &Routine) -> ConsoleResult<()> {
        self.editing_routine = true;
        self.feedback.success = None;
        self.routine_form = RoutineForm {
            entrenador_cedula: routine.coach_id().unwrap_or_default().to_string(),
            nombre: routine.nombre.clone(),
            objetivo: routine.objetivo.clone(),
            duracion_semanas: routine.duracion_semanas.to_string(),
        };
        self.routine_status.reset();
        self.select_routine(routine).await
    }

    pub fn cancel_routine_edit(&mut self) {
        self.editing_routine = false;
        self.routine_form = RoutineForm::default();
        self.routine_status.reset();
    }

    pub async fn save_routine(&mut self) -> ConsoleResult<()> {
        self.feedback.success = None;
        let (coach_id, payload) = match self.routine_form.validate() {
            Ok(valid) => valid,
            Err(errors) => {
                self.routine_status.mark_all_touched(&errors);
                return Err(invalid_form(&errors));
            }
        };

        let editing_id = self
            .selected_routine
            .as_ref()
            .and_then(|r| r.id)
            .filter(|_| self.editing_routine);

        self.saving = true;
        let result = match editing_id {
            Some(id) => {
                self.api
                    .routines()
                    .update(id, &payload, Some(&coach_id))
                    .await
            }
            None => self.api.routines().create(&coach_id, &payload).await,
        };
        self.saving = false;
        let routine = self.feedback.capture(result, DEFAULT_FALLBACK)?;

        info!(routine_id = ?routine.id, coach = %coach_id, "Routine saved");
        self.feedback.succeed(if self.editing_routine {
            MSG_ROUTINE_UPDATED
        } else {
            MSG_ROUTINE_CREATED
        });
        self.cancel_routine_edit();
        self.load_routines().await?;
        if routine.id.is_some() {
            self.select_routine(&routine).await?;
        }
        Ok(())
    }

    pub async fn delete_routine(&mut self, routine: &Routine) -> ConsoleResult<()> {
        let Some(id) = routine.id else {
            return Ok(());
        };

        self.saving = true;
        let result = self.api.routines().delete(id).await;
        self.saving = false;
        self.feedback.capture(result, DEFAULT_FALLBACK)?;

        self.feedback.succeed(MSG_ROUTINE_DELETED);
        self.selected_routine = None;
        self.selected_plan = None;
        self.editing_routine = false;
        self.load_routines().await
    }

    // ------------------------------------------------------------------------
    // Plans
    // ------------------------------------------------------------------------

    /// Load the plans of the selected routine
    pub async fn load_plans(&mut self) -> ConsoleResult<()> {
        let Some(routine_id) = self.selected_routine.as_ref().and_then(|r| r.id) else {
            return Ok(());
        };

        self.loading_plans = true;
        let result = self.api.routines().list_plans(Some(routine_id)).await;
        self.loading_plans = false;
        self.plans = self.feedback.capture(result, DEFAULT_FALLBACK)?;
        Ok(())
    }

    /// Select a plan and load its foods
    pub async fn select_plan(&mut self, plan: &MealPlan) -> ConsoleResult<()> {
        self.selected_plan = Some(plan.clone());
        self.food_form = FoodForm::default();
        self.editing_plan = false;
        self.load_foods().await
    }

    /// Select a plan for editing, filling the plan form
    pub async fn edit_plan(&mut self, plan: &MealPlan) -> ConsoleResult<()> {
        self.selected_plan = Some(plan.clone());
        self.editing_plan = true;
        self.plan_form = PlanForm {
            nombre: plan.nombre.clone(),
            descripcion: plan.descripcion.clone(),
            duracion_dias: plan.duracion_dias.to_string(),
            fecha_inicio: plan.fecha_inicio.clone(),
            fecha_fin: plan.fecha_fin.clone(),
        };
        self.plan_status.reset();
        self.load_foods().await
    }

    pub fn cancel_plan_edit(&mut self) {
        self.editing_plan = false;
        self.plan_form = PlanForm::default();
        self.plan_status.reset();
    }

    /// Create a plan under the selected routine, or update the edited plan
    pub async fn save_plan(&mut self) -> ConsoleResult<()> {
        let routine_id = self.selected_routine.as_ref().and_then(|r| r.id);
        let validated = self.plan_form.validate();
        let (routine_id, payload) = match (routine_id, validated) {
            (Some(routine_id), Ok(payload)) => (routine_id, payload),
            (_, Err(errors)) => {
                self.plan_status.mark_all_touched(&errors);
                return Err(invalid_form(&errors));
            }
            (None, Ok(_)) => {
                self.plan_status.touched = true;
                return Err(ConsoleError::Validation(
                    "Selecciona una rutina antes de guardar el plan".to_string(),
                ));
            }
        };

        let editing_id = self
            .selected_plan
            .as_ref()
            .and_then(|p| p.id)
            .filter(|_| self.editing_plan);

        self.saving = true;
        let result = match editing_id {
            Some(id) => {
                self.api
                    .routines()
                    .update_plan(id, &payload, Some(routine_id))
                    .await
            }
            None => self.api.routines().create_plan(routine_id, &payload).await,
        };
        self.saving = false;
        let plan = self.feedback.capture(result, DEFAULT_FALLBACK)?;

        self.feedback.succeed(if self.editing_plan {
            MSG_PLAN_UPDATED
        } else {
            MSG_PLAN_CREATED
        });
        self.cancel_plan_edit();
        self.load_plans().await?;
        if plan.id.is_some() {
            self.select_plan(&plan).await?;
        }
        Ok(())
    }

    /// Delete a plan and drop it from the local list
    pub async fn delete_plan(&mut self, plan: &MealPlan) -> ConsoleResult<()> {
        let Some(id) = plan.id else {
            return Ok(());
        };

        self.saving = true;
        let result = self.api.routines().delete_plan(id).await;
        self.saving = false;
        self.feedback.capture(result, DEFAULT_FALLBACK)?;

        self.feedback.succeed(MSG_PLAN_DELETED);
        self.plans.retain(|p| p.id != Some(id));
        if self.selected_plan.as_ref().and_then(|p| p.id) == Some(id) {
            self.selected_plan = None;
            self.foods.clear();
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Foods
    // ------------------------------------------------------------------------

    pub async fn load_foods(&mut self) -> ConsoleResult<()> {
        let Some(plan_id) = self.selected_plan.as_ref().and_then(|p| p.id) else {
            return Ok(());
        };

        self.loading_foods = true;
        let result = self.api.routines().list_plan_foods(plan_id).await;
        self.loading_foods = false;
        self.foods = self.feedback.capture(result, DEFAULT_FALLBACK)?;
        Ok(())
    }

    /// Attach a food to the selected plan and append the server's record
    pub async fn add_food(&mut self) -> ConsoleResult<()> {
        let plan_id = self.selected_plan.as_ref().and_then(|p| p.id);
        let validated = self.food_form.validate();
        let (plan_id, attachment) = match (plan_id, validated) {
            (Some(plan_id), Ok(attachment)) => (plan_id, attachment),
            (_, Err(errors)) => {
                self.food_status.mark_all_touched(&errors);
                return Err(invalid_form(&errors));
            }
            (None, Ok(_)) => {
                self.food_status.touched = true;
                return Err(ConsoleError::Validation(
                    "Selecciona un plan antes de agregar alimentos".to_string(),
                ));
            }
        };

        self.saving = true;
        let result = self
            .api
            .routines()
            .add_plan_food(
                plan_id,
                attachment.food_id,
                &attachment.quantity,
                &attachment.meal,
            )
            .await;
        self.saving = false;
        let food = self.feedback.capture(result, DEFAULT_FALLBACK)?;

        self.feedback.succeed(MSG_FOOD_ADDED);
        self.foods.push(food);
        self.food_form = FoodForm::default();
        self.food_status.reset();
        Ok(())
    }

    /// Delete a food and drop it from the local list
    pub async fn delete_food(&mut self, food: &PlanFood) -> ConsoleResult<()> {
        let Some(id) = food.id else {
            return Ok(());
        };

        self.saving = true;
        let result = self.api.routines().delete_plan_food(id).await;
        self.saving = false;
        self.feedback.capture(result, DEFAULT_FALLBACK)?;

        self.feedback.succeed(MSG_FOOD_DELETED);
        self.foods.retain(|f| f.id != Some(id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page() -> RoutinesPage {
        RoutinesPage::new(ApiClient::new("http://127.0.0.1:9/api", None).unwrap())
    }

    #[test]
    fn test_routine_form_requires_positive_weeks() {
        let form = RoutineForm {
            entrenador_cedula: "1020".to_string(),
            nombre: "Fuerza base".to_string(),
            objetivo: "Hipertrofia".to_string(),
            duracion_semanas: "0".to_string(),
        };
        assert!(form.validate().unwrap_err().has("duracionSemanas"));

        let (coach, payload) = RoutineForm {
            duracion_semanas: "8".to_string(),
            ..form
        }
        .validate()
        .unwrap();
        assert_eq!(coach, "1020");
        assert_eq!(payload.duracion_semanas, 8);
    }

    #[test]
    fn test_plan_form_checks_dates() {
        let form = PlanForm {
            nombre: "Déficit".to_string(),
            descripcion: "Plan bajo en calorías".to_string(),
            duracion_dias: "30".to_string(),
            fecha_inicio: "2024-05-01".to_string(),
            fecha_fin: "31/05/2024".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.has("fechaFin"));
        assert!(!errors.has("fechaInicio"));
    }

    #[test]
    fn test_food_form_checks_meal() {
        let form = FoodForm {
            alimento_id: "12".to_string(),
            cantidad: "200 g".to_string(),
            comida_del_dia: "Merienda".to_string(),
        };
        assert!(form.validate().unwrap_err().has("comidaDelDia"));

        let attachment = FoodForm {
            comida_del_dia: "Cena".to_string(),
            ..form
        }
        .validate()
        .unwrap();
        assert_eq!(attachment.food_id, 12);
        assert_eq!(attachment.quantity, "200 g");
    }

    #[tokio::test]
    async fn test_edit_routine_prefills_coach_from_nested_record() {
        let mut page = page();
        let routine: Routine = serde_json::from_value(json!({
            "nombre": "Movilidad",
            "objetivo": "Flexibilidad",
            "duracionSemanas": 4,
            "entrenador": { "usuarioCedula": "445566" }
        }))
        .unwrap();

        // No id, so no plans are requested
        page.edit_routine(&routine).await.unwrap();
        assert!(page.editing_routine);
        assert_eq!(page.routine_form.entrenador_cedula, "445566");
        assert_eq!(page.routine_form.duracion_semanas, "4");
    }

    #[tokio::test]
    async fn test_add_food_without_plan_is_rejected() {
        let mut page = page();
        page.food_form = FoodForm {
            alimento_id: "3".to_string(),
            cantidad: "1 taza".to_string(),
            comida_del_dia: "Desayuno".to_string(),
        };
        assert!(matches!(
            page.add_food().await,
            Err(ConsoleError::Validation(_))
        ));
        assert!(page.food_status.touched);
    }
}
