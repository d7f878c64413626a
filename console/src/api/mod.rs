//! Resource clients for the Fitware HTTP API
//!
//! [`ApiClient`] owns the connection pool, the base URL and the auth header.
//! Each resource gets a thin borrowed view (`api.clients()`,
//! `api.sessions()`, ...) that maps method calls onto fixed URL templates.
//!
//! Every request carries a fresh `x-request-id`. Non-success responses become
//! [`ConsoleError::Request`] with the body's `message` field when present.
//! There is no retry, backoff or timeout.

pub mod clients;
pub mod exercises;
pub mod reports;
pub mod routines;
pub mod sessions;

pub use clients::ClientsApi;
pub use exercises::ExercisesApi;
pub use reports::ReportsApi;
pub use routines::RoutinesApi;
pub use sessions::SessionsApi;

use crate::config::ApiConfig;
use crate::error::{ConsoleError, ConsoleResult};
use fitware_shared::ErrorResponse;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Method, Response, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Query string pairs; repeated keys are kept in order
pub type Query = Vec<(&'static str, String)>;

/// HTTP client bound to one API root
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    auth: Option<HeaderValue>,
}

impl ApiClient {
    /// Create a client for `base_url`, e.g. `http://localhost:8080/api`
    pub fn new(base_url: &str, auth_token: Option<&SecretString>) -> ConsoleResult<Self> {
        let base = Url::parse(base_url.trim())
            .map_err(|e| ConsoleError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;

        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(ConsoleError::InvalidBaseUrl(base_url.to_string()));
        }

        let auth = match auth_token {
            Some(token) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                    .map_err(|_| {
                        ConsoleError::Validation("auth token is not a valid header value".to_string())
                    })?;
                value.set_sensitive(true);
                Some(value)
            }
            None => None,
        };

        Ok(Self {
            http: reqwest::Client::new(),
            base,
            auth,
        })
    }

    pub fn from_config(config: &ApiConfig) -> ConsoleResult<Self> {
        Self::new(&config.base_url, config.auth_token.as_ref())
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn clients(&self) -> ClientsApi<'_> {
        ClientsApi::new(self)
    }

    pub fn exercises(&self) -> ExercisesApi<'_> {
        ExercisesApi::new(self)
    }

    pub fn routines(&self) -> RoutinesApi<'_> {
        RoutinesApi::new(self)
    }

    pub fn sessions(&self) -> SessionsApi<'_> {
        SessionsApi::new(self)
    }

    pub fn reports(&self) -> ReportsApi<'_> {
        ReportsApi::new(self)
    }

    // ========================================================================
    // Request helpers
    // ========================================================================

    /// Append path segments to the base URL, percent-encoding each one
    pub(crate) fn url(&self, segments: &[&str]) -> ConsoleResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ConsoleError::InvalidBaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn execute(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&'static str, String)],
        body: Option<Value>,
    ) -> ConsoleResult<Response> {
        let url = self.url(segments)?;
        let request_id = Uuid::new_v4();

        debug!(
            method = %method,
            path = %url.path(),
            request_id = %request_id,
            "Sending API request"
        );

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(REQUEST_ID_HEADER, request_id.to_string());

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(auth) = &self.auth {
            request = request.header(AUTHORIZATION, auth.clone());
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&text)
            .ok()
            .and_then(|body| body.message)
            .filter(|m| !m.is_empty());

        warn!(
            method = %method,
            path = %url.path(),
            request_id = %request_id,
            status = status.as_u16(),
            message = message.as_deref().unwrap_or(""),
            "API request failed"
        );

        Err(ConsoleError::Request {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ConsoleResult<T> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// GET and decode a JSON body
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&'static str, String)],
    ) -> ConsoleResult<T> {
        let response = self.execute(Method::GET, segments, query, None).await?;
        Self::decode(response).await
    }

    /// Send a JSON body and decode the JSON reply
    pub(crate) async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&'static str, String)],
        body: &B,
    ) -> ConsoleResult<T> {
        let body = serde_json::to_value(body)?;
        let response = self.execute(method, segments, query, Some(body)).await?;
        Self::decode(response).await
    }

    /// Send a request with no body, payload carried in the query string
    pub(crate) async fn send_empty<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&'static str, String)],
    ) -> ConsoleResult<T> {
        let response = self.execute(method, segments, query, None).await?;
        Self::decode(response).await
    }

    /// DELETE, ignoring any reply body
    pub(crate) async fn delete(&self, segments: &[&str]) -> ConsoleResult<()> {
        self.execute(Method::DELETE, segments, &[], None).await?;
        Ok(())
    }

    /// GET a binary body
    pub(crate) async fn get_bytes(
        &self,
        segments: &[&str],
        query: &[(&'static str, String)],
    ) -> ConsoleResult<Vec<u8>> {
        let response = self.execute(Method::GET, segments, query, None).await?;
        Ok(response.bytes().await?.to_vec())
    }
}
