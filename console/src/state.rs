//! Console state management
//!
//! Shared resources every page needs: the API client and the loaded
//! configuration. Cloning is cheap; the config sits behind an `Arc` and the
//! HTTP client is internally reference counted.

use crate::api::ApiClient;
use crate::config::ConsoleConfig;
use crate::error::ConsoleResult;
use std::sync::Arc;

/// Shared console state
#[derive(Debug, Clone)]
pub struct ConsoleState {
    /// Resource clients bound to the configured API root
    pub api: ApiClient,
    /// Console configuration
    pub config: Arc<ConsoleConfig>,
}

impl ConsoleState {
    /// Build the state, creating the HTTP client from `config.api`
    pub fn new(config: ConsoleConfig) -> ConsoleResult<Self> {
        let api = ApiClient::from_config(&config.api)?;
        Ok(Self {
            api,
            config: Arc::new(config),
        })
    }

    #[inline]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    #[inline]
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }
}
