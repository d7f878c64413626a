//! Integration tests for request plumbing shared by every resource client

mod common;

use common::TestApi;
use fitware_console::api::REQUEST_ID_HEADER;
use fitware_console::error::ConsoleError;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, ResponseTemplate};

const FALLBACK: &str = "No se pudo completar la operación.";

#[tokio::test]
async fn test_each_request_gets_its_own_id() {
    let t = TestApi::new().await;

    Mock::given(method("GET"))
        .and(path("/api/ejercicios"))
        .and(header_exists(REQUEST_ID_HEADER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&t.server)
        .await;

    t.api.exercises().list().await.unwrap();
    t.api.exercises().list().await.unwrap();

    let ids: Vec<Uuid> = t
        .requests()
        .await
        .iter()
        .map(|r| {
            let value = r.headers.get(REQUEST_ID_HEADER).unwrap().to_str().unwrap();
            Uuid::parse_str(value).unwrap()
        })
        .collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let t = TestApi::with_token("s3cr3t").await;

    Mock::given(method("GET"))
        .and(path("/api/ejercicios/3"))
        .and(header("authorization", "Bearer s3cr3t"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "nombre": "Remo",
            "descripcion": "Remo con barra",
            "tipo": "Fuerza",
            "equipamiento": "Barra"
        })))
        .expect(1)
        .mount(&t.server)
        .await;

    let exercise = t.api.exercises().get(3).await.unwrap();
    assert_eq!(exercise.nombre, "Remo");
}

#[tokio::test]
async fn test_error_message_is_extracted() {
    let t = TestApi::new().await;

    Mock::given(method("DELETE"))
        .and(path("/api/ejercicios/3"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "El ejercicio está asignado a una sesión",
            "error": "Bad Request",
            "status": 400
        })))
        .mount(&t.server)
        .await;

    let err = t.api.exercises().delete(3).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(
        err.user_message(FALLBACK),
        "El ejercicio está asignado a una sesión"
    );
}

#[tokio::test]
async fn test_missing_or_empty_message_falls_back() {
    let t = TestApi::new().await;

    Mock::given(method("GET"))
        .and(path("/api/ejercicios"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "" })))
        .mount(&t.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/clientes"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&t.server)
        .await;

    let err = t.api.exercises().list().await.unwrap_err();
    assert_eq!(err.user_message(FALLBACK), FALLBACK);

    let err = t.api.clients().list().await.unwrap_err();
    assert!(matches!(err, ConsoleError::Request { status: 502, message: None }));
    assert_eq!(err.user_message(FALLBACK), FALLBACK);
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let t = TestApi::new().await;

    Mock::given(method("GET"))
        .and(path("/api/ejercicios"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&t.server)
        .await;

    let err = t.api.exercises().list().await.unwrap_err();
    assert!(matches!(err, ConsoleError::Decode(_)));
    assert_eq!(err.user_message(FALLBACK), FALLBACK);
}

#[tokio::test]
async fn test_identifier_is_percent_encoded() {
    let t = TestApi::new().await;

    Mock::given(method("GET"))
        .and(path("/api/clientes/AB%2012"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "usuarioCedula": "AB 12",
            "fechaRegistro": "2024-01-10",
            "pesoInicial": 70.5,
            "alturaInicial": 1.8
        })))
        .expect(1)
        .mount(&t.server)
        .await;

    let record = t.api.clients().get("AB 12").await.unwrap();
    assert_eq!(record.usuario_cedula.as_deref(), Some("AB 12"));
}
