//! Session persistence between CLI runs.
//!
//! Each command runs in a fresh process, so the cookie jar is written to a
//! small file after login and read back before any request is made.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use common::{AppError, AppResult, ClientConfig};

use crate::api::HttpAuthApi;
use crate::context::AppContext;

/// File holding the saved `Cookie` header value.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved cookies, `None` if nothing was saved.
    pub async fn load(&self) -> AppResult<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let cookies = contents.trim();
                Ok((!cookies.is_empty()).then(|| cookies.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error("read", e)),
        }
    }

    pub async fn save(&self, cookies: &str) -> AppResult<()> {
        tokio::fs::write(&self.path, cookies)
            .await
            .map_err(|e| self.io_error("write", e))?;
        debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    /// Delete the file. Missing is fine.
    pub async fn remove(&self) -> AppResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!("Session file {} removed", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error("remove", e)),
        }
    }

    fn io_error(&self, action: &str, e: std::io::Error) -> AppError {
        AppError::internal(format!(
            "Failed to {} session file {}: {}",
            action,
            self.path.display(),
            e
        ))
    }
}

/// Application context wired to the HTTP API and the saved session.
pub struct CliSession {
    api: Arc<HttpAuthApi>,
    ctx: AppContext,
    file: SessionFile,
}

impl CliSession {
    /// Build the HTTP client and put any saved cookies back in its jar.
    pub async fn open(config: ClientConfig, file: SessionFile) -> AppResult<Self> {
        let api = Arc::new(HttpAuthApi::new(config.clone())?);
        if let Some(cookies) = file.load().await? {
            api.restore_cookies(&cookies);
        }
        let ctx = AppContext::new(config, api.clone());
        Ok(Self { api, ctx, file })
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    /// Write the current cookies out, or drop the file if there are none.
    pub async fn persist(&self) -> AppResult<()> {
        match self.api.session_cookies() {
            Some(cookies) => self.file.save(&cookies).await,
            None => self.file.remove().await,
        }
    }

    /// Forget the saved session.
    pub async fn forget(&self) -> AppResult<()> {
        self.file.remove().await
    }
}
