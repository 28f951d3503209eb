//! Shared configuration structures.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use domain::DEFAULT_NOTIFICATION_TIMEOUT_MS;

use crate::error::{AppError, AppResult};

/// API base used when running against a local development server.
pub const DEFAULT_DEV_API_BASE_URL: &str = "http://localhost:4000";

/// Default per-request timeout for the HTTP adapter.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30000;

/// Deployment environment, selects how the API base URL is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    fn from_str_lossy(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Base URL every relative API path is resolved against
    pub api_base_url: String,
    /// How long a notification stays visible
    pub notification_timeout_ms: u64,
    /// Per-request timeout for remote calls
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            api_base_url: DEFAULT_DEV_API_BASE_URL.to_string(),
            notification_timeout_ms: DEFAULT_NOTIFICATION_TIMEOUT_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Development falls back to the local API server. Production has no
    /// same-origin page to inherit from, so `API_BASE_URL` must be set.
    pub fn from_env() -> AppResult<Self> {
        Self::from_env_with(None)
    }

    /// Load configuration from the environment, with `api_base_url` taking
    /// precedence over `API_BASE_URL` when given.
    pub fn from_env_with(api_base_url: Option<String>) -> AppResult<Self> {
        Self::from_vars(|key| env::var(key).ok(), api_base_url)
    }

    fn from_vars<F>(var: F, api_base_url: Option<String>) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = var("APP_ENV")
            .map(|v| Environment::from_str_lossy(&v))
            .unwrap_or_default();

        let api_base_url = match (api_base_url.or_else(|| var("API_BASE_URL")), environment) {
            (Some(url), _) => url,
            (None, Environment::Development) => DEFAULT_DEV_API_BASE_URL.to_string(),
            (None, Environment::Production) => {
                return Err(AppError::config(
                    "API_BASE_URL must be set in production",
                ))
            }
        };

        Ok(Self {
            environment,
            api_base_url,
            notification_timeout_ms: var("NOTIFICATION_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_NOTIFICATION_TIMEOUT_MS),
            request_timeout_ms: var("REQUEST_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
        })
    }

    /// Build a config pointing at an explicit API base.
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    /// Resolve a relative API path against the base URL.
    pub fn api_url(&self, path: &str) -> String {
        let base = self.api_base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    pub fn notification_timeout(&self) -> Duration {
        Duration::from_millis(self.notification_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
