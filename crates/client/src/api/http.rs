//! Reqwest-backed implementation of the auth API.
//!
//! Owns transport details only: URL resolution, the cookie jar that carries
//! the session, status mapping and JSON decoding.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use common::{AppError, AppResult, ClientConfig};
use domain::{Credentials, Registration, User};

use super::{AuthApi, LOGIN_PATH, LOGOUT_PATH, PROFILE_PATH, REGISTER_PATH};

/// HTTP client for the ConferenceHub API.
pub struct HttpAuthApi {
    client: Client,
    config: ClientConfig,
    base: Url,
    jar: Arc<Jar>,
}

impl HttpAuthApi {
    /// Build a client with a cookie jar and the configured request timeout.
    pub fn new(config: ClientConfig) -> AppResult<Self> {
        let base = Url::parse(&config.api_base_url).map_err(|e| {
            AppError::config(format!("Invalid API base URL {}: {}", config.api_base_url, e))
        })?;
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(jar.clone())
            .timeout(config.request_timeout())
            .build()?;
        debug!("HTTP client ready for {}", base);
        Ok(Self {
            client,
            config,
            base,
            jar,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Cookies the API would receive, as a `Cookie` header value.
    pub fn session_cookies(&self) -> Option<String> {
        self.jar
            .cookies(&self.base)
            .and_then(|value| value.to_str().ok().map(str::to_string))
            .filter(|cookies| !cookies.is_empty())
    }

    /// Put cookies saved by [`HttpAuthApi::session_cookies`] back in the jar.
    pub fn restore_cookies(&self, cookies: &str) {
        for pair in cookies.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            self.jar.add_cookie_str(pair, &self.base);
        }
        debug!("Session cookies restored for {}", self.base);
    }

    fn url(&self, path: &str) -> String {
        self.config.api_url(path)
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, credentials: Credentials) -> AppResult<User> {
        debug!("POST {}", LOGIN_PATH);
        let response = self
            .client
            .post(self.url(LOGIN_PATH))
            .json(&credentials)
            .send()
            .await?;
        read_json(response).await
    }

    async fn register(&self, registration: Registration) -> AppResult<()> {
        debug!("POST {}", REGISTER_PATH);
        let response = self
            .client
            .post(self.url(REGISTER_PATH))
            .json(&registration)
            .send()
            .await?;
        ensure_success(response).await
    }

    async fn profile(&self) -> AppResult<Option<User>> {
        debug!("GET {}", PROFILE_PATH);
        let response = self.client.get(self.url(PROFILE_PATH)).send().await?;

        // An expired or missing cookie is an anonymous session, not a failure.
        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        read_json(response).await
    }

    async fn logout(&self) -> AppResult<()> {
        debug!("POST {}", LOGOUT_PATH);
        let response = self.client.post(self.url(LOGOUT_PATH)).send().await?;
        ensure_success(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        return Err(map_status_error(status, &body));
    }
    decode_body(&body)
}

async fn ensure_success(response: Response) -> AppResult<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.bytes().await?;
    Err(map_status_error(status, &body))
}

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> AppResult<T> {
    serde_json::from_slice(body).map_err(|e| AppError::Decode(e.to_string()))
}

/// Error bodies look like `{ "error": "Email already registered" }`. Anything
/// else keeps only the status code.
fn map_status_error(status: StatusCode, body: &[u8]) -> AppError {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| value.get("error").and_then(Value::as_str).map(str::to_string))
        .filter(|msg| !msg.trim().is_empty());

    match message {
        Some(msg) => AppError::Remote(msg),
        None => AppError::Status(status.as_u16()),
    }
}
