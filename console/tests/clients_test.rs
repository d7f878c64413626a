//! Integration tests for the clients and client progress pages

mod common;

use common::{client_json, TestApi};
use fitware_console::error::ConsoleError;
use fitware_console::pages::clients::{ClientForm, FALLBACK, MSG_REGISTERED, MSG_UPDATED};
use fitware_console::pages::{ClientProgressPage, ClientsPage};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn filled_form() -> ClientForm {
    ClientForm {
        cedula: "123456".to_string(),
        nombre: "Ana".to_string(),
        apellidos: "García".to_string(),
        fecha_nacimiento: "1990-04-12".to_string(),
        telefono: "3001234567".to_string(),
        genero: "Femenino".to_string(),
        fecha_registro: "2024-01-10".to_string(),
        peso_inicial: "62.5".to_string(),
        altura_inicial: "1.65".to_string(),
    }
}

#[tokio::test]
async fn test_register_sends_nested_payload() {
    let t = TestApi::new().await;

    Mock::given(method("POST"))
        .and(path("/api/clientes"))
        .and(body_json(json!({
            "usuario": {
                "cedula": "123456",
                "nombre": "Ana",
                "apellidos": "García",
                "fechaNacimiento": "1990-04-12",
                "telefono": "3001234567",
                "genero": "Femenino"
            },
            "cliente": {
                "usuarioCedula": "123456",
                "fechaRegistro": "2024-01-10",
                "pesoInicial": 62.5,
                "alturaInicial": 1.65
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(client_json("123456", "Ana", "García")))
        .expect(1)
        .mount(&t.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/clientes"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([client_json("123456", "Ana", "García")])),
        )
        .mount(&t.server)
        .await;

    let mut page = ClientsPage::new(t.api.clone());
    page.form = filled_form();
    page.save().await.unwrap();

    assert_eq!(page.feedback.success.as_deref(), Some(MSG_REGISTERED));
    assert_eq!(page.form, ClientForm::default());
    assert_eq!(page.clients.len(), 1);
}

#[tokio::test]
async fn test_load_normalizes_legacy_records() {
    let t = TestApi::new().await;

    Mock::given(method("GET"))
        .and(path("/api/clientes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "cedula": "555555",
                "nombre": "Eva",
                "apellidos": "Ruiz",
                "fechaNacimiento": "1985-02-01",
                "telefono": "3110000000",
                "genero": "Femenino",
                "fechaRegistro": "2023-11-02",
                "pesoInicial": 60.5,
                "alturaInicial": 1.6
            },
            client_json("123456", "Ana", "García")
        ])))
        .mount(&t.server)
        .await;

    let mut page = ClientsPage::new(t.api.clone());
    page.load().await.unwrap();

    let legacy = &page.clients[0];
    assert_eq!(legacy.usuario_cedula, "555555");
    assert_eq!(legacy.usuario.cedula, "555555");
    assert_eq!(legacy.usuario.nombre, "Eva");

    page.filter("ruiz");
    assert_eq!(page.filtered.len(), 1);
    assert_eq!(page.filtered[0].usuario.apellidos, "Ruiz");
}

#[tokio::test]
async fn test_edit_updates_by_natural_key() {
    let t = TestApi::new().await;

    Mock::given(method("PUT"))
        .and(path("/api/clientes/123456"))
        .respond_with(ResponseTemplate::new(200).set_body_json(client_json("123456", "Ana", "Gómez")))
        .expect(1)
        .mount(&t.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/clientes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&t.server)
        .await;

    let client = serde_json::from_value(client_json("123456", "Ana", "García")).unwrap();
    let client = fitware_shared::normalize_client(client);

    let mut page = ClientsPage::new(t.api.clone());
    page.edit(&client);
    page.form.apellidos = "Gómez".to_string();
    page.save().await.unwrap();

    assert_eq!(page.feedback.success.as_deref(), Some(MSG_UPDATED));
    assert!(!page.edit_mode);
}

#[tokio::test]
async fn test_server_message_becomes_banner() {
    let t = TestApi::new().await;

    Mock::given(method("POST"))
        .and(path("/api/clientes"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "La cédula ya está registrada" })),
        )
        .mount(&t.server)
        .await;

    let mut page = ClientsPage::new(t.api.clone());
    page.form = filled_form();
    let err = page.save().await.unwrap_err();

    assert!(matches!(err, ConsoleError::Request { status: 409, .. }));
    assert_eq!(
        page.feedback.error.as_deref(),
        Some("La cédula ya está registrada")
    );
    // The form is kept for correction
    assert_eq!(page.form, filled_form());
}

#[tokio::test]
async fn test_delete_without_message_uses_fallback() {
    let t = TestApi::new().await;

    Mock::given(method("DELETE"))
        .and(path("/api/clientes/123456"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&t.server)
        .await;

    let client = serde_json::from_value(client_json("123456", "Ana", "García")).unwrap();
    let client = fitware_shared::normalize_client(client);

    let mut page = ClientsPage::new(t.api.clone());
    assert!(page.delete(&client).await.is_err());
    assert_eq!(page.feedback.error.as_deref(), Some(FALLBACK));
}

#[tokio::test]
async fn test_progress_create_and_update_paths() {
    let t = TestApi::new().await;
    let entry = json!({
        "id": 9,
        "fecha": "2024-05-01",
        "peso": 68.2,
        "imc": 22.4,
        "observaciones": "Buen avance"
    });

    Mock::given(method("GET"))
        .and(path("/api/clientes/123456/progreso"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([entry.clone()])))
        .mount(&t.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/clientes/123456/progreso"))
        .and(body_json(json!({
            "fecha": "2024-05-01",
            "peso": 68.2,
            "imc": 22.4,
            "observaciones": "Buen avance"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(entry.clone()))
        .expect(1)
        .mount(&t.server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/clientes/progreso/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(entry.clone()))
        .expect(1)
        .mount(&t.server)
        .await;

    let mut page = ClientProgressPage::open(t.api.clone(), "123456").unwrap();
    page.load().await.unwrap();
    assert_eq!(page.entries.len(), 1);

    page.form.fecha = "2024-05-01".to_string();
    page.form.peso = "68.2".to_string();
    page.form.imc = "22.4".to_string();
    page.form.observaciones = "Buen avance".to_string();
    page.save().await.unwrap();

    let existing = page.entries[0].clone();
    page.edit(&existing);
    page.form.peso = "67.9".to_string();
    page.save().await.unwrap();
    assert!(page.editing.is_none());
}

#[tokio::test]
async fn test_progress_delete_then_reload() {
    let t = TestApi::new().await;

    Mock::given(method("GET"))
        .and(path("/api/clientes/123456/progreso"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&t.server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/clientes/progreso/9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&t.server)
        .await;

    let mut page = ClientProgressPage::open(t.api.clone(), "123456").unwrap();
    page.entries = vec![serde_json::from_value(json!({
        "id": 9,
        "fecha": "2024-05-01",
        "peso": 68.2,
        "imc": null
    }))
    .unwrap()];
    let entry = page.entries[0].clone();
    page.delete(&entry).await.unwrap();

    assert!(page.entries.is_empty());
    let requests = t.requests().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method.as_str(), "DELETE");
    assert_eq!(requests[1].url.path(), "/api/clientes/123456/progreso");
}

#[tokio::test]
async fn test_load_tolerates_null_client_columns() {
    let t = TestApi::new().await;
    let mut partial = client_json("654321", "Luis", "Pérez");
    partial["pesoInicial"] = serde_json::Value::Null;
    partial["usuario"]["telefono"] = serde_json::Value::Null;

    Mock::given(method("GET"))
        .and(path("/api/clientes"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([client_json("123456", "Ana", "García"), partial])),
        )
        .mount(&t.server)
        .await;

    let mut page = ClientsPage::new(t.api.clone());
    page.load().await.unwrap();

    assert_eq!(page.clients.len(), 2);
    assert_eq!(page.clients[1].peso_inicial, 0.0);
    assert_eq!(page.clients[1].usuario.telefono, "");
}
