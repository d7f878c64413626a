//! Configuration management for the Fitware console
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: FW__)

use crate::error::{ConsoleError, ConsoleResult};
use secrecy::SecretString;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use tracing::warn;

/// Default API root, the `/api` path of a local backend
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Console configuration
#[derive(Debug, Deserialize)]
pub struct ConsoleConfig {
    pub api: ApiConfig,
    pub reports: ReportsConfig,
}

/// Remote API configuration
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Bearer token attached to every request when set
    #[serde(default)]
    pub auth_token: Option<SecretString>,
}

/// Report export configuration
#[derive(Debug, Deserialize)]
pub struct ReportsConfig {
    /// Directory where downloaded PDFs are written
    pub output_dir: PathBuf,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                auth_token: None,
            },
            reports: ReportsConfig {
                output_dir: PathBuf::from("."),
            },
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with FW__ prefix
    pub fn load() -> ConsoleResult<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("reports.output_dir", ".")?
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // Override with environment variables (FW__ prefix)
            // e.g., FW__API__BASE_URL=https://fitware.example/api sets api.base_url
            .add_source(config::Environment::with_prefix("FW").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }

    /// Validate configuration for production deployment
    ///
    /// Plain HTTP is refused unless the API runs on the same host.
    pub fn validate_production(&self) -> ConsoleResult<()> {
        let url = self.api.base_url.trim();
        if url.starts_with("https://") {
            return Ok(());
        }

        if is_local(url) {
            warn!(base_url = %url, "API base URL is local plain HTTP - ensure this is intentional for production");
            return Ok(());
        }

        Err(ConsoleError::Config(config::ConfigError::Message(format!(
            "api.base_url must use https in production, got {}",
            url
        ))))
    }
}

fn is_local(url: &str) -> bool {
    let rest = url.strip_prefix("http://").unwrap_or(url);
    let host = rest.split(['/', ':']).next().unwrap_or_default();
    matches!(host, "localhost" | "127.0.0.1")
}
