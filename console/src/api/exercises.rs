use super::ApiClient;
use crate::error::ConsoleResult;
use fitware_shared::Exercise;
use reqwest::Method;

const EXERCISES: &str = "ejercicios";

/// Exercise catalogue, plain CRUD on `/ejercicios`
pub struct ExercisesApi<'a> {
    api: &'a ApiClient,
}

impl<'a> ExercisesApi<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> ConsoleResult<Vec<Exercise>> {
        self.api.get_json(&[EXERCISES], &[]).await
    }

    pub async fn get(&self, id: i64) -> ConsoleResult<Exercise> {
        self.api.get_json(&[EXERCISES, &id.to_string()], &[]).await
    }

    pub async fn create(&self, exercise: &Exercise) -> ConsoleResult<Exercise> {
        self.api
            .send_json(Method::POST, &[EXERCISES], &[], exercise)
            .await
    }

    pub async fn update(&self, id: i64, exercise: &Exercise) -> ConsoleResult<Exercise> {
        self.api
            .send_json(Method::PUT, &[EXERCISES, &id.to_string()], &[], exercise)
            .await
    }

    pub async fn delete(&self, id: i64) -> ConsoleResult<()> {
        self.api.delete(&[EXERCISES, &id.to_string()]).await
    }
}
