//! Common test utilities for integration tests
//!
//! Each test gets its own mock API server; the console client is pointed at
//! its `/api` root.

#![allow(dead_code)]

use fitware_console::api::ApiClient;
use secrecy::SecretString;
use serde_json::Value;
use wiremock::MockServer;

/// Mock backend plus a client bound to it
pub struct TestApi {
    pub server: MockServer,
    pub api: ApiClient,
}

impl TestApi {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let api = ApiClient::new(&format!("{}/api", server.uri()), None)
            .expect("mock server uri is a valid base url");
        Self { server, api }
    }

    /// Client that sends `Authorization: Bearer {token}`
    pub async fn with_token(token: &str) -> Self {
        let server = MockServer::start().await;
        let secret = SecretString::new(token.to_string());
        let api = ApiClient::new(&format!("{}/api", server.uri()), Some(&secret))
            .expect("mock server uri is a valid base url");
        Self { server, api }
    }

    /// All requests received so far
    pub async fn requests(&self) -> Vec<wiremock::Request> {
        self.server
            .received_requests()
            .await
            .expect("request recording is enabled")
    }

    /// Values of `key` in the query of the `index`-th request, in order
    pub async fn query_values(&self, index: usize, key: &str) -> Vec<String> {
        let requests = self.requests().await;
        requests[index]
            .url
            .query_pairs()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
            .collect()
    }
}

/// Normalized-shape client record as the server returns it
pub fn client_json(cedula: &str, nombre: &str, apellidos: &str) -> Value {
    serde_json::json!({
        "usuarioCedula": cedula,
        "fechaRegistro": "2024-01-10",
        "pesoInicial": 62.5,
        "alturaInicial": 1.65,
        "usuario": {
            "cedula": cedula,
            "nombre": nombre,
            "apellidos": apellidos,
            "fechaNacimiento": "1990-04-12",
            "telefono": "3001234567",
            "genero": "Femenino"
        }
    })
}
