//! Integration tests for the exercise catalogue page

mod common;

use common::TestApi;
use fitware_console::error::ConsoleError;
use fitware_console::pages::exercises::{ExerciseForm, FALLBACK};
use fitware_console::pages::ExercisesPage;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn squat() -> Value {
    json!({
        "id": 1,
        "nombre": "Sentadilla",
        "descripcion": "Sentadilla libre con barra",
        "tipo": "Fuerza",
        "equipamiento": "Barra"
    })
}

fn rowing_form() -> ExerciseForm {
    ExerciseForm {
        nombre: "Remo".to_string(),
        descripcion: "Remo sentado en máquina".to_string(),
        tipo: "Fuerza".to_string(),
        equipamiento: "Máquina".to_string(),
    }
}

async fn mount_list(t: &TestApi, body: Value) {
    Mock::given(method("GET"))
        .and(path("/api/ejercicios"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&t.server)
        .await;
}

#[tokio::test]
async fn test_create_posts_then_reloads() {
    let t = TestApi::new().await;
    mount_list(&t, json!([squat()])).await;

    Mock::given(method("POST"))
        .and(path("/api/ejercicios"))
        .and(body_json(json!({
            "nombre": "Remo",
            "descripcion": "Remo sentado en máquina",
            "tipo": "Fuerza",
            "equipamiento": "Máquina"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 2,
            "nombre": "Remo",
            "descripcion": "Remo sentado en máquina",
            "tipo": "Fuerza",
            "equipamiento": "Máquina"
        })))
        .expect(1)
        .mount(&t.server)
        .await;

    let mut page = ExercisesPage::new(t.api.clone());
    page.form = rowing_form();
    page.save().await.unwrap();

    assert_eq!(page.form, ExerciseForm::default());
    assert!(page.editing_id.is_none());
    assert!(!page.saving);
    assert_eq!(page.exercises.len(), 1);
    assert_eq!(page.filtered.len(), 1);

    let requests = t.requests().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].method.as_str(), "GET");
}

#[tokio::test]
async fn test_edit_puts_by_id() {
    let t = TestApi::new().await;
    mount_list(&t, json!([squat()])).await;

    Mock::given(method("PUT"))
        .and(path("/api/ejercicios/1"))
        .and(body_json(json!({
            "nombre": "Sentadilla",
            "descripcion": "Sentadilla frontal con barra",
            "tipo": "Fuerza",
            "equipamiento": "Barra"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(squat()))
        .expect(1)
        .mount(&t.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/ejercicios"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&t.server)
        .await;

    let mut page = ExercisesPage::new(t.api.clone());
    page.load().await.unwrap();
    let existing = page.exercises[0].clone();
    page.edit(&existing);
    assert_eq!(page.editing_id, Some(1));

    page.form.descripcion = "Sentadilla frontal con barra".to_string();
    page.save().await.unwrap();
    assert!(page.editing_id.is_none());
}

#[tokio::test]
async fn test_save_failure_without_message_uses_fallback() {
    let t = TestApi::new().await;

    Mock::given(method("POST"))
        .and(path("/api/ejercicios"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&t.server)
        .await;

    let mut page = ExercisesPage::new(t.api.clone());
    page.form = rowing_form();
    let err = page.save().await.unwrap_err();

    assert!(matches!(err, ConsoleError::Request { status: 500, .. }));
    assert_eq!(page.feedback.error.as_deref(), Some(FALLBACK));
    assert!(!page.saving);
    // form kept so the user can retry
    assert_eq!(page.form, rowing_form());
    assert_eq!(t.requests().await.len(), 1);
}

#[tokio::test]
async fn test_invalid_form_never_reaches_server() {
    let t = TestApi::new().await;

    let mut page = ExercisesPage::new(t.api.clone());
    page.form = ExerciseForm {
        tipo: "Yoga".to_string(),
        ..rowing_form()
    };
    let err = page.save().await.unwrap_err();

    assert!(matches!(err, ConsoleError::Validation(_)));
    assert!(page.form_status.touched);
    assert!(t.requests().await.is_empty());
}

#[tokio::test]
async fn test_delete_then_reload() {
    let t = TestApi::new().await;
    mount_list(&t, json!([])).await;

    Mock::given(method("DELETE"))
        .and(path("/api/ejercicios/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&t.server)
        .await;

    let mut page = ExercisesPage::new(t.api.clone());
    page.exercises = vec![serde_json::from_value(squat()).unwrap()];
    page.delete(Some(1)).await.unwrap();

    assert!(page.exercises.is_empty());
    let requests = t.requests().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method.as_str(), "DELETE");
    assert_eq!(requests[1].method.as_str(), "GET");
}

#[tokio::test]
async fn test_delete_failure_keeps_list() {
    let t = TestApi::new().await;

    Mock::given(method("DELETE"))
        .and(path("/api/ejercicios/1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&t.server)
        .await;

    let mut page = ExercisesPage::new(t.api.clone());
    page.exercises = vec![serde_json::from_value(squat()).unwrap()];
    assert!(page.delete(Some(1)).await.is_err());

    assert_eq!(page.feedback.error.as_deref(), Some(FALLBACK));
    assert_eq!(page.exercises.len(), 1);
    assert_eq!(t.requests().await.len(), 1);
}

#[tokio::test]
async fn test_delete_without_id_is_noop() {
    let t = TestApi::new().await;

    let mut page = ExercisesPage::new(t.api.clone());
    page.delete(None).await.unwrap();
    assert!(t.requests().await.is_empty());
}

#[tokio::test]
async fn test_load_tolerates_null_columns() {
    let t = TestApi::new().await;
    mount_list(
        &t,
        json!([
            squat(),
            { "id": 2, "nombre": "Trote", "descripcion": null, "tipo": "Cardio", "equipamiento": null }
        ]),
    )
    .await;

    let mut page = ExercisesPage::new(t.api.clone());
    page.load().await.unwrap();

    assert_eq!(page.exercises.len(), 2);
    assert_eq!(page.exercises[1].descripcion, "");
    assert!(page.feedback.error.is_none());
}
