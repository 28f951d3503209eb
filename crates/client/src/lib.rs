//! ConferenceHub client core
//!
//! Session and notification state shared by the client, the form validation
//! pipeline, and the login/register page controllers built on top of them.
//!
//! # Modules
//!
//! - **validation**: ordered rule sets evaluated by a pure `validate`
//! - **notification**: single-slot notification with timed auto-dismiss
//! - **session**: identity fetched once at startup, replaced on login
//! - **pages**: login and register submit workflows
//! - **api**: remote auth endpoints, with a reqwest implementation
//! - **context**: root object wiring the above together
//! - **search**: header search form to query string
//! - **cli** / **commands**: the `conferencehub` binary
//!
//! # CLI Usage
//!
//! ```bash
//! conferencehub login --email jane@example.com --password secret1
//! conferencehub register --name Jane --email jane@example.com --password secret1 --user-type host
//! conferencehub whoami
//! conferencehub logout
//! conferencehub search --location Lisbon --guests 4
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod context;
pub mod notification;
pub mod pages;
pub mod search;
pub mod session;
pub mod validation;

// Re-export commonly used types at crate root
pub use api::{AuthApi, HttpAuthApi};
pub use context::AppContext;
pub use notification::{Notification, NotificationCenter, NotificationKind};
pub use pages::{LoginPage, RegisterPage, SubmitStatus};
pub use session::{SessionState, SessionStore};
pub use validation::{validate, FieldRule, FormData, RuleSet, ValidationResult};
