//! Domain layer - Core marketplace entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Types here are shared between the client core and the HTTP adapter.

pub mod constants;
pub mod error;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use user::{Credentials, Registration, User, UserType};
