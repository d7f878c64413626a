//! Clients and client progress
//!
//! Clients are addressed by their natural key (`cedula`), never by a
//! generated id. Progress entries use their own numeric id.

use super::ApiClient;
use crate::error::ConsoleResult;
use fitware_shared::{ClientRecord, ClientRegistration, Progress};
use reqwest::Method;

const CLIENTS: &str = "clientes";
const PROGRESS: &str = "progreso";

pub struct ClientsApi<'a> {
    api: &'a ApiClient,
}

impl<'a> ClientsApi<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// `GET /clientes`; records come back in whichever shape the server uses
    pub async fn list(&self) -> ConsoleResult<Vec<ClientRecord>> {
        self.api.get_json(&[CLIENTS], &[]).await
    }

    pub async fn get(&self, cedula: &str) -> ConsoleResult<ClientRecord> {
        self.api.get_json(&[CLIENTS, cedula], &[]).await
    }

    pub async fn register(&self, payload: &ClientRegistration) -> ConsoleResult<ClientRecord> {
        self.api
            .send_json(Method::POST, &[CLIENTS], &[], payload)
            .await
    }

    pub async fn update(
        &self,
        cedula: &str,
        payload: &ClientRegistration,
    ) -> ConsoleResult<ClientRecord> {
        self.api
            .send_json(Method::PUT, &[CLIENTS, cedula], &[], payload)
            .await
    }

    pub async fn delete(&self, cedula: &str) -> ConsoleResult<()> {
        self.api.delete(&[CLIENTS, cedula]).await
    }

    pub async fn list_progress(&self, cedula: &str) -> ConsoleResult<Vec<Progress>> {
        self.api.get_json(&[CLIENTS, cedula, PROGRESS], &[]).await
    }

    pub async fn add_progress(&self, cedula: &str, entry: &Progress) -> ConsoleResult<Progress> {
        self.api
            .send_json(Method::POST, &[CLIENTS, cedula, PROGRESS], &[], entry)
            .await
    }

    /// `PUT /clientes/progreso/{id}`
    pub async fn update_progress(&self, id: i64, entry: &Progress) -> ConsoleResult<Progress> {
        let id = id.to_string();
        self.api
            .send_json(Method::PUT, &[CLIENTS, PROGRESS, &id], &[], entry)
            .await
    }

    pub async fn delete_progress(&self, id: i64) -> ConsoleResult<()> {
        let id = id.to_string();
        self.api.delete(&[CLIENTS, PROGRESS, &id]).await
    }
}
