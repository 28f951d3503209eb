//! Remote authentication API.
//!
//! Page controllers and the session store only see the [`AuthApi`] trait;
//! [`HttpAuthApi`] is the reqwest-backed implementation.

mod http;

use async_trait::async_trait;

use common::AppResult;
use domain::{Credentials, Registration, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

pub use http::HttpAuthApi;

/// Login endpoint
pub const LOGIN_PATH: &str = "/login";

/// Registration endpoint
pub const REGISTER_PATH: &str = "/register";

/// Current-session profile endpoint
pub const PROFILE_PATH: &str = "/profile";

/// Logout endpoint
pub const LOGOUT_PATH: &str = "/logout";

/// Authentication endpoints consumed by the client.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a session; returns the logged-in user
    async fn login(&self, credentials: Credentials) -> AppResult<User>;

    /// Create an account
    async fn register(&self, registration: Registration) -> AppResult<()>;

    /// Fetch the user behind the current session cookie, `None` if anonymous
    async fn profile(&self) -> AppResult<Option<User>>;

    /// End the current session
    async fn logout(&self) -> AppResult<()>;
}
