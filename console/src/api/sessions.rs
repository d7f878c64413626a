//! Training sessions and their exercise assignments
//!
//! Assigning an exercise sends everything in the query string with an empty
//! body. Partial updates of an assignment send only the supplied parameters
//! with a `{}` body.

use super::{ApiClient, Query};
use crate::error::ConsoleResult;
use fitware_shared::{Session, SessionExercise, SessionExerciseChanges, SessionPayload};
use reqwest::Method;
use serde_json::json;

const SESSIONS: &str = "sesiones";
const EXERCISES: &str = "ejercicios";

pub struct SessionsApi<'a> {
    api: &'a ApiClient,
}

impl<'a> SessionsApi<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// `GET /sesiones?clienteCedula=`; an empty id means no filter
    pub async fn list(&self, client_id: Option<&str>) -> ConsoleResult<Vec<Session>> {
        self.api.get_json(&[SESSIONS], &client_query(client_id)).await
    }

    pub async fn get_session(&self, id: i64) -> ConsoleResult<Session> {
        self.api.get_json(&[SESSIONS, &id.to_string()], &[]).await
    }

    /// `POST /sesiones/{clientId}`
    pub async fn create(&self, client_id: &str, payload: &SessionPayload) -> ConsoleResult<Session> {
        self.api
            .send_json(Method::POST, &[SESSIONS, client_id], &[], payload)
            .await
    }

    /// `PUT /sesiones/{id}?clienteCedula=`
    pub async fn update(
        &self,
        id: i64,
        payload: &SessionPayload,
        client_id: Option<&str>,
    ) -> ConsoleResult<Session> {
        self.api
            .send_json(
                Method::PUT,
                &[SESSIONS, &id.to_string()],
                &client_query(client_id),
                payload,
            )
            .await
    }

    pub async fn delete(&self, id: i64) -> ConsoleResult<()> {
        self.api.delete(&[SESSIONS, &id.to_string()]).await
    }

    // ========================================================================
    // Session exercises
    // ========================================================================

    pub async fn list_exercises(&self, session_id: i64) -> ConsoleResult<Vec<SessionExercise>> {
        self.api
            .get_json(&[SESSIONS, &session_id.to_string(), EXERCISES], &[])
            .await
    }

    pub async fn get_session_exercise(&self, id: i64) -> ConsoleResult<SessionExercise> {
        self.api
            .get_json(&[SESSIONS, EXERCISES, &id.to_string()], &[])
            .await
    }

    /// `POST /sesiones/{sessionId}/ejercicios/{exerciseId}?repeticiones=&series=&estado=`
    pub async fn assign_exercise(
        &self,
        session_id: i64,
        exercise_id: i64,
        repetitions: u32,
        sets: u32,
        status: &str,
    ) -> ConsoleResult<SessionExercise> {
        let query: Query = vec![
            ("repeticiones", repetitions.to_string()),
            ("series", sets.to_string()),
            ("estado", status.to_string()),
        ];
        self.api
            .send_empty(
                Method::POST,
                &[
                    SESSIONS,
                    &session_id.to_string(),
                    EXERCISES,
                    &exercise_id.to_string(),
                ],
                &query,
            )
            .await
    }

    /// `PUT /sesiones/ejercicios/{id}` with only the supplied fields
    pub async fn update_session_exercise(
        &self,
        id: i64,
        changes: &SessionExerciseChanges,
    ) -> ConsoleResult<SessionExercise> {
        self.api
            .send_json(
                Method::PUT,
                &[SESSIONS, EXERCISES, &id.to_string()],
                &changes_query(changes),
                &json!({}),
            )
            .await
    }

    pub async fn remove_exercise(&self, id: i64) -> ConsoleResult<()> {
        self.api
            .delete(&[SESSIONS, EXERCISES, &id.to_string()])
            .await
    }
}

fn client_query(client_id: Option<&str>) -> Query {
    client_id
        .filter(|id| !id.is_empty())
        .map(|id| vec![("clienteCedula", id.to_string())])
        .unwrap_or_default()
}

fn changes_query(changes: &SessionExerciseChanges) -> Query {
    let mut query: Query = Vec::new();
    if let Some(exercise_id) = changes.ejercicio_id {
        query.push(("ejercicioId", exercise_id.to_string()));
    }
    if let Some(repetitions) = changes.repeticiones {
        query.push(("repeticiones", repetitions.to_string()));
    }
    if let Some(sets) = changes.series {
        query.push(("series", sets.to_string()));
    }
    if let Some(status) = &changes.estado {
        query.push(("estado", status.clone()));
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changes_query_only_sends_supplied_fields() {
        let changes = SessionExerciseChanges {
            series: Some(4),
            estado: Some("Completado".to_string()),
            ..Default::default()
        };
        assert_eq!(
            changes_query(&changes),
            vec![
                ("series", "4".to_string()),
                ("estado", "Completado".to_string())
            ]
        );
        assert!(changes_query(&SessionExerciseChanges::default()).is_empty());
    }

    #[test]
    fn test_client_query_skips_empty_filter() {
        assert!(client_query(Some("")).is_empty());
        assert_eq!(
            client_query(Some("123456")),
            vec![("clienteCedula", "123456".to_string())]
        );
    }
}
