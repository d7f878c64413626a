//! Routines, their meal plans and the foods assigned to each plan
//!
//! Adding a food is an attach operation: food id, quantity and meal travel
//! in the path and query string and the request has no body.

use super::{ApiClient, Query};
use crate::error::ConsoleResult;
use fitware_shared::{MealPlan, MealPlanPayload, PlanFood, Routine, RoutinePayload};
use reqwest::Method;

const ROUTINES: &str = "rutinas";
const PLANS: &str = "planes";
const FOODS: &str = "alimentos";

pub struct RoutinesApi<'a> {
    api: &'a ApiClient,
}

impl<'a> RoutinesApi<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    // ========================================================================
    // Routines
    // ========================================================================

    /// `GET /rutinas`, optionally filtered by coach
    pub async fn list(&self, coach_id: Option<&str>) -> ConsoleResult<Vec<Routine>> {
        self.api.get_json(&[ROUTINES], &coach_query(coach_id)).await
    }

    pub async fn get_routine(&self, id: i64) -> ConsoleResult<Routine> {
        self.api.get_json(&[ROUTINES, &id.to_string()], &[]).await
    }

    /// `POST /rutinas/{coachId}`
    pub async fn create(&self, coach_id: &str, payload: &RoutinePayload) -> ConsoleResult<Routine> {
        self.api
            .send_json(Method::POST, &[ROUTINES, coach_id], &[], payload)
            .await
    }

    /// `PUT /rutinas/{id}?entrenadorCedula=`
    pub async fn update(
        &self,
        id: i64,
        payload: &RoutinePayload,
        coach_id: Option<&str>,
    ) -> ConsoleResult<Routine> {
        self.api
            .send_json(
                Method::PUT,
                &[ROUTINES, &id.to_string()],
                &coach_query(coach_id),
                payload,
            )
            .await
    }

    pub async fn delete(&self, id: i64) -> ConsoleResult<()> {
        self.api.delete(&[ROUTINES, &id.to_string()]).await
    }

    // ========================================================================
    // Meal plans
    // ========================================================================

    /// `GET /rutinas/planes?rutinaId=`
    pub async fn list_plans(&self, routine_id: Option<i64>) -> ConsoleResult<Vec<MealPlan>> {
        self.api
            .get_json(&[ROUTINES, PLANS], &routine_query(routine_id))
            .await
    }

    pub async fn get_plan(&self, id: i64) -> ConsoleResult<MealPlan> {
        self.api
            .get_json(&[ROUTINES, PLANS, &id.to_string()], &[])
            .await
    }

    /// `POST /rutinas/{routineId}/planes`
    pub async fn create_plan(
        &self,
        routine_id: i64,
        payload: &MealPlanPayload,
    ) -> ConsoleResult<MealPlan> {
        self.api
            .send_json(
                Method::POST,
                &[ROUTINES, &routine_id.to_string(), PLANS],
                &[],
                payload,
            )
            .await
    }

    /// `PUT /rutinas/planes/{id}?rutinaId=`
    pub async fn update_plan(
        &self,
        id: i64,
        payload: &MealPlanPayload,
        routine_id: Option<i64>,
    ) -> ConsoleResult<MealPlan> {
        self.api
            .send_json(
                Method::PUT,
                &[ROUTINES, PLANS, &id.to_string()],
                &routine_query(routine_id),
                payload,
            )
            .await
    }

    pub async fn delete_plan(&self, id: i64) -> ConsoleResult<()> {
        self.api
            .delete(&[ROUTINES, PLANS, &id.to_string()])
            .await
    }

    // ========================================================================
    // Plan foods
    // ========================================================================

    /// `GET /rutinas/planes/{planId}/alimentos`
    pub async fn list_plan_foods(&self, plan_id: i64) -> ConsoleResult<Vec<PlanFood>> {
        self.api
            .get_json(&[ROUTINES, PLANS, &plan_id.to_string(), FOODS], &[])
            .await
    }

    pub async fn get_plan_food(&self, id: i64) -> ConsoleResult<PlanFood> {
        self.api
            .get_json(&[ROUTINES, PLANS, FOODS, &id.to_string()], &[])
            .await
    }

    /// `POST /rutinas/planes/{planId}/alimentos/{foodId}?cantidad=&comida=`
    pub async fn add_plan_food(
        &self,
        plan_id: i64,
        food_id: i64,
        quantity: &str,
        meal: &str,
    ) -> ConsoleResult<PlanFood> {
        let query: Query = vec![
            ("cantidad", quantity.to_string()),
            ("comida", meal.to_string()),
        ];
        self.api
            .send_empty(
                Method::POST,
                &[ROUTINES, PLANS, &plan_id.to_string(), FOODS, &food_id.to_string()],
                &query,
            )
            .await
    }

    /// `PUT /rutinas/planes/alimentos/{id}`; zero ids are left out of the query
    pub async fn update_plan_food(
        &self,
        id: i64,
        payload: &PlanFood,
        plan_id: Option<i64>,
        food_id: Option<i64>,
    ) -> ConsoleResult<PlanFood> {
        let mut query: Query = Vec::new();
        if let Some(plan_id) = plan_id.filter(|id| *id != 0) {
            query.push(("planId", plan_id.to_string()));
        }
        if let Some(food_id) = food_id.filter(|id| *id != 0) {
            query.push(("alimentoId", food_id.to_string()));
        }
        self.api
            .send_json(
                Method::PUT,
                &[ROUTINES, PLANS, FOODS, &id.to_string()],
                &query,
                payload,
            )
            .await
    }

    pub async fn delete_plan_food(&self, id: i64) -> ConsoleResult<()> {
        self.api
            .delete(&[ROUTINES, PLANS, FOODS, &id.to_string()])
            .await
    }
}

fn coach_query(coach_id: Option<&str>) -> Query {
    coach_id
        .filter(|id| !id.is_empty())
        .map(|id| vec![("entrenadorCedula", id.to_string())])
        .unwrap_or_default()
}

fn routine_query(routine_id: Option<i64>) -> Query {
    routine_id
        .map(|id| vec![("rutinaId", id.to_string())])
        .unwrap_or_default()
}
