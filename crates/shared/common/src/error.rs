//! Unified error handling for the client core.
//!
//! Two families of failures reach the user: local validation errors, which
//! never leave the page, and remote errors returned by the API. Transport and
//! decoding failures are folded into the remote family with a generic message.

use domain::DomainError;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Local
    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("A submission is already in progress")]
    SubmitInProgress,

    // Remote
    #[error("{0}")]
    Remote(String),

    #[error("Request failed with status {0}")]
    Status(u16),

    #[cfg(feature = "http")]
    #[error("HTTP transport error")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    Decode(String),

    // Setup
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error")]
    Internal(String),
}

impl AppError {
    /// Get error code for logs and the CLI
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::SubmitInProgress => "SUBMIT_IN_PROGRESS",
            AppError::Remote(_) => "REMOTE_ERROR",
            AppError::Status(_) => "HTTP_STATUS",
            #[cfg(feature = "http")]
            AppError::Http(_) => "TRANSPORT_ERROR",
            AppError::Decode(_) => "DECODE_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// True for errors raised before any remote call was issued.
    pub fn is_local(&self) -> bool {
        matches!(self, AppError::Validation { .. } | AppError::SubmitInProgress)
    }

    /// Message supplied by the server, if the API returned one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AppError::Remote(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    /// Field that failed local validation.
    pub fn invalid_field(&self) -> Option<&str> {
        match self {
            AppError::Validation { field, .. } => Some(field.as_str()),
            _ => None,
        }
    }

    /// Get user-facing message, using `fallback` when the error carries
    /// nothing fit to show (transport, decoding, bare status codes).
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Validation { message, .. } => message.clone(),
            AppError::Remote(msg) => msg.clone(),
            AppError::SubmitInProgress => self.to_string(),

            #[cfg(feature = "http")]
            AppError::Http(e) => {
                tracing::error!("HTTP transport error: {:?}", e);
                fallback.to_string()
            }
            AppError::Decode(msg) => {
                tracing::error!("Decode error: {}", msg);
                fallback.to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                fallback.to_string()
            }
            _ => fallback.to_string(),
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UnknownUserType(value) => AppError::Validation {
                field: "userType".to_string(),
                message: format!("Unknown user type: {}", value),
            },
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn remote(msg: impl Into<String>) -> Self {
        AppError::Remote(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
