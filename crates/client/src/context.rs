//! Application context for dependency injection.
//!
//! Built once at the application root and handed to every page controller.
//! Dropping the last clone tears down the session and notification state,
//! including any pending notification timer.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::info;

use common::{AppResult, ClientConfig};

use crate::api::AuthApi;
use crate::notification::NotificationCenter;
use crate::session::{SessionState, SessionStore};

pub const LOGOUT_MESSAGE: &str = "You have been logged out";

/// Shared client state.
#[derive(Clone)]
pub struct AppContext {
    config: ClientConfig,
    api: Arc<dyn AuthApi>,
    session: SessionStore,
    notifications: NotificationCenter,
}

impl AppContext {
    /// Create a context around an existing API implementation.
    pub fn new(config: ClientConfig, api: Arc<dyn AuthApi>) -> Self {
        let notifications = NotificationCenter::new(config.notification_timeout());
        Self {
            config,
            api,
            session: SessionStore::new(),
            notifications,
        }
    }

    /// Kick off the one-time profile fetch.
    pub fn start(&self) -> JoinHandle<SessionState> {
        info!("Restoring session from {}", self.config.api_base_url);
        self.session.spawn_load(self.api.clone())
    }

    /// End the session remotely, then locally.
    pub async fn logout(&self) -> AppResult<()> {
        self.api.logout().await?;
        self.session.clear();
        self.notifications.info(LOGOUT_MESSAGE);
        Ok(())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api(&self) -> Arc<dyn AuthApi> {
        self.api.clone()
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }
}
