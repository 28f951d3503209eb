//! Domain-level errors.
//!
//! These errors represent business rule violations on domain values.
//! They are independent of infrastructure concerns (HTTP, UI).

use thiserror::Error;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Unknown account type
    #[error("Unknown user type: {0}")]
    UnknownUserType(String),
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
