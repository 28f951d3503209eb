//! Login page controller.

use std::sync::Arc;

use once_cell::sync::Lazy;
use tokio::sync::watch;
use tracing::info;

use common::AppResult;
use domain::{Credentials, User};

use super::{NoFocus, PageState, SubmitStatus};
use crate::api::AuthApi;
use crate::context::AppContext;
use crate::notification::NotificationCenter;
use crate::session::SessionStore;
use crate::validation::{FieldRule, FocusTarget, FormData, RuleSet};

pub const LOGIN_SUCCESS_MESSAGE: &str = "Successfully logged in";
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please check your credentials.";

static LOGIN_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new()
        .field("email", FieldRule::required().message("Email is required"))
        .field("password", FieldRule::required().message("Password is required"))
});

/// Values typed into the login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    fn to_form_data(&self) -> FormData {
        FormData::from([("email", &self.email), ("password", &self.password)])
    }
}

/// Drives the login form: validate, call the API, then update the session.
pub struct LoginPage {
    api: Arc<dyn AuthApi>,
    session: SessionStore,
    notifications: NotificationCenter,
    state: PageState<LoginForm>,
}

impl LoginPage {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            api: ctx.api(),
            session: ctx.session().clone(),
            notifications: ctx.notifications().clone(),
            state: PageState::new(),
        }
    }

    pub fn set_email(&self, email: impl Into<String>) {
        let email = email.into();
        self.state.update_form(|form| form.email = email);
    }

    pub fn set_password(&self, password: impl Into<String>) {
        let password = password.into();
        self.state.update_form(|form| form.password = password);
    }

    pub fn form(&self) -> LoginForm {
        self.state.form()
    }

    pub fn status(&self) -> SubmitStatus {
        self.state.status()
    }

    /// Error text shown beside the form, if any
    pub fn error(&self) -> Option<String> {
        self.state.status().error().map(str::to_string)
    }

    /// True once a login succeeded and the page should navigate home
    pub fn should_redirect(&self) -> bool {
        self.state.status() == SubmitStatus::Succeeded
    }

    pub fn watch_status(&self) -> watch::Receiver<SubmitStatus> {
        self.state.subscribe()
    }

    pub async fn submit(&self) -> AppResult<User> {
        self.submit_focused(&mut NoFocus).await
    }

    /// Submit, moving focus to the first invalid field on validation failure.
    pub async fn submit_focused<T>(&self, focus: &mut T) -> AppResult<User>
    where
        T: FocusTarget + Send + ?Sized,
    {
        let form = self.state.form();
        let _in_flight = self.state.start(&form.to_form_data(), &LOGIN_RULES, focus)?;

        let result = self
            .api
            .login(Credentials {
                email: form.email,
                password: form.password,
            })
            .await;
        let user = self.state.finish(result, LOGIN_FAILED_MESSAGE)?;

        info!(user_id = user.id, "User logged in");
        self.session.set_current_user(user.clone());
        self.notifications.success(LOGIN_SUCCESS_MESSAGE);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use common::{AppError, ClientConfig};
    use domain::UserType;
    use mockall::predicate::function;

    use crate::api::MockAuthApi;
    use crate::notification::NotificationKind;

    fn user() -> User {
        User {
            id: 1,
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            user_type: UserType::Client,
        }
    }

    fn page(api: MockAuthApi) -> (AppContext, LoginPage) {
        let ctx = AppContext::new(ClientConfig::default(), Arc::new(api));
        let page = LoginPage::new(&ctx);
        (ctx, page)
    }

    #[tokio::test]
    async fn test_empty_email_never_calls_api() {
        let mut api = MockAuthApi::new();
        api.expect_login().never();
        let (ctx, page) = page(api);

        page.set_password("secret");
        let err = page.submit().await.unwrap_err();

        assert!(err.is_local());
        assert_eq!(page.error().as_deref(), Some("Email is required"));
        assert_eq!(ctx.session().current_user(), None);
        assert!(!ctx.notifications().is_showing());
    }

    #[tokio::test]
    async fn test_successful_login_updates_session_and_notifies() {
        let mut api = MockAuthApi::new();
        api.expect_login()
            .with(function(|c: &Credentials| {
                c.email == "ana@example.com" && c.password == "secret"
            }))
            .times(1)
            .returning(|_| Ok(user()));
        let (ctx, page) = page(api);

        page.set_email("ana@example.com");
        page.set_password("secret");
        let logged_in = page.submit().await.unwrap();

        assert_eq!(logged_in, user());
        assert_eq!(ctx.session().current_user(), Some(user()));
        assert!(page.should_redirect());

        let note = ctx.notifications().current().unwrap();
        assert_eq!(note.message, LOGIN_SUCCESS_MESSAGE);
        assert_eq!(note.kind, NotificationKind::Success);
    }

    #[tokio::test]
    async fn test_server_error_message_is_shown_and_form_kept() {
        let mut api = MockAuthApi::new();
        api.expect_login()
            .times(1)
            .returning(|_| Err(AppError::remote("Wrong password")));
        let (ctx, page) = page(api);

        page.set_email("ana@example.com");
        page.set_password("nope");
        assert!(page.submit().await.is_err());

        assert_eq!(page.error().as_deref(), Some("Wrong password"));
        assert_eq!(page.form().password, "nope");
        assert_eq!(ctx.session().current_user(), None);
        assert!(!page.should_redirect());
    }

    #[tokio::test]
    async fn test_opaque_failure_uses_fallback() {
        let mut api = MockAuthApi::new();
        api.expect_login().returning(|_| Err(AppError::Status(500)));
        let (_ctx, page) = page(api);

        page.set_email("ana@example.com");
        page.set_password("secret");
        let _ = page.submit().await;

        assert_eq!(page.error().as_deref(), Some(LOGIN_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_retry_after_failure_is_allowed() {
        let mut api = MockAuthApi::new();
        let mut seq = mockall::Sequence::new();
        api.expect_login()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::remote("Wrong password")));
        api.expect_login()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(user()));
        let (_ctx, page) = page(api);

        page.set_email("ana@example.com");
        page.set_password("secret");
        assert!(page.submit().await.is_err());
        assert!(page.submit().await.is_ok());
        assert_eq!(page.error(), None);
    }
}
