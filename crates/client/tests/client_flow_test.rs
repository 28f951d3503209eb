//! End-to-end tests for the client core.
//!
//! These tests use a fake auth API with artificial latency so the session,
//! notification and page state can be observed while calls are in flight.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use client_lib::pages::{LOGIN_SUCCESS_MESSAGE, REGISTER_SUCCESS_MESSAGE};
use client_lib::validation::FocusTarget;
use client_lib::{
    AppContext, AuthApi, LoginPage, NotificationKind, RegisterPage, SessionState, SubmitStatus,
};
use common::{AppError, AppResult, ClientConfig};
use domain::{Credentials, Registration, User, UserType};

// =============================================================================
// Fake API
// =============================================================================

/// Fake auth API: one known account, fixed latency on every call.
struct FakeAuthApi {
    latency: Duration,
    logged_in: Option<User>,
    login_calls: AtomicUsize,
    register_calls: AtomicUsize,
    registered: Mutex<Vec<Registration>>,
}

impl FakeAuthApi {
    fn new(latency: Duration) -> Self {
        Self {
            latency,
            logged_in: None,
            login_calls: AtomicUsize::new(0),
            register_calls: AtomicUsize::new(0),
            registered: Mutex::new(Vec::new()),
        }
    }

    fn with_session(mut self, user: User) -> Self {
        self.logged_in = Some(user);
        self
    }
}

fn ana() -> User {
    User {
        id: 42,
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        user_type: UserType::Host,
    }
}

#[async_trait]
impl AuthApi for FakeAuthApi {
    async fn login(&self, credentials: Credentials) -> AppResult<User> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        sleep(self.latency).await;
        if credentials.email == "ana@example.com" && credentials.password == "secret1" {
            Ok(ana())
        } else {
            Err(AppError::remote("Invalid email or password"))
        }
    }

    async fn register(&self, registration: Registration) -> AppResult<()> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        sleep(self.latency).await;
        if registration.email == "ana@example.com" {
            return Err(AppError::remote("Email already registered"));
        }
        self.registered.lock().unwrap().push(registration);
        Ok(())
    }

    async fn profile(&self) -> AppResult<Option<User>> {
        sleep(self.latency).await;
        Ok(self.logged_in.clone())
    }

    async fn logout(&self) -> AppResult<()> {
        Ok(())
    }
}

fn context(api: Arc<FakeAuthApi>) -> AppContext {
    AppContext::new(ClientConfig::default(), api)
}

// =============================================================================
// Session
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_session_unknown_until_profile_resolves() {
    let api = Arc::new(FakeAuthApi::new(Duration::from_millis(200)).with_session(ana()));
    let ctx = context(api);

    let load = ctx.start();
    sleep(Duration::from_millis(100)).await;
    assert!(!ctx.session().is_ready());
    assert_eq!(ctx.session().state(), SessionState::Unknown);

    let state = load.await.unwrap();
    assert!(ctx.session().is_ready());
    assert_eq!(state, SessionState::Authenticated(ana()));
    assert_eq!(ctx.session().current_user(), Some(ana()));
}

#[tokio::test(start_paused = true)]
async fn test_anonymous_session_then_login() {
    let api = Arc::new(FakeAuthApi::new(Duration::from_millis(50)));
    let ctx = context(api.clone());

    let _load = ctx.start();
    assert_eq!(ctx.session().wait_ready().await, SessionState::Anonymous);

    let page = LoginPage::new(&ctx);
    page.set_email("ana@example.com");
    page.set_password("secret1");
    page.submit().await.unwrap();

    assert_eq!(ctx.session().current_user(), Some(ana()));
    assert_eq!(api.login_calls.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_duplicate_submit_is_rejected_while_in_flight() {
    let api = Arc::new(FakeAuthApi::new(Duration::from_millis(500)));
    let ctx = context(api.clone());
    let page = Arc::new(LoginPage::new(&ctx));
    page.set_email("ana@example.com");
    page.set_password("secret1");

    let first = tokio::spawn({
        let page = page.clone();
        async move { page.submit().await }
    });
    sleep(Duration::from_millis(10)).await;
    assert_eq!(page.status(), SubmitStatus::Submitting);

    let second = page.submit().await;
    assert!(matches!(second, Err(AppError::SubmitInProgress)));

    assert!(first.await.unwrap().is_ok());
    assert_eq!(api.login_calls.load(Ordering::SeqCst), 1);
    assert_eq!(page.status(), SubmitStatus::Succeeded);
}

#[tokio::test(start_paused = true)]
async fn test_login_notification_expires() {
    let api = Arc::new(FakeAuthApi::new(Duration::from_millis(10)));
    let ctx = context(api);
    let page = LoginPage::new(&ctx);
    page.set_email("ana@example.com");
    page.set_password("secret1");
    page.submit().await.unwrap();

    let note = ctx.notifications().current().unwrap();
    assert_eq!(note.message, LOGIN_SUCCESS_MESSAGE);
    assert_eq!(note.kind, NotificationKind::Success);

    sleep(Duration::from_millis(3001)).await;
    assert_eq!(ctx.notifications().current(), None);
}

#[derive(Default)]
struct Surface {
    focused: Option<String>,
}

impl FocusTarget for Surface {
    fn focus_field(&mut self, field: &str) {
        self.focused = Some(field.to_string());
    }
}

#[tokio::test(start_paused = true)]
async fn test_invalid_login_focuses_field_and_skips_api() {
    let api = Arc::new(FakeAuthApi::new(Duration::from_millis(10)));
    let ctx = context(api.clone());
    let page = LoginPage::new(&ctx);
    page.set_email("ana@example.com");

    let mut surface = Surface::default();
    let err = page.submit_focused(&mut surface).await.unwrap_err();

    assert_eq!(err.to_string(), "Password is required");
    assert_eq!(surface.focused.as_deref(), Some("password"));
    assert_eq!(api.login_calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        page.status(),
        SubmitStatus::Invalid {
            field: "password".to_string(),
            message: "Password is required".to_string(),
        }
    );
}

// =============================================================================
// Register
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_register_then_login_notifications_replace_each_other() {
    let api = Arc::new(FakeAuthApi::new(Duration::from_millis(10)));
    let ctx = context(api.clone());

    let register = RegisterPage::new(&ctx);
    register.set_name("Bo");
    register.set_email("bo@example.com");
    register.set_password("secret1");
    register.submit().await.unwrap();
    assert_eq!(
        ctx.notifications().current().unwrap().message,
        REGISTER_SUCCESS_MESSAGE
    );
    assert_eq!(api.registered.lock().unwrap()[0].user_type, UserType::Client);

    sleep(Duration::from_millis(2000)).await;

    let login = LoginPage::new(&ctx);
    login.set_email("ana@example.com");
    login.set_password("secret1");
    login.submit().await.unwrap();

    // Register's timer would have cleared the slot at 3000ms.
    sleep(Duration::from_millis(1500)).await;
    assert_eq!(
        ctx.notifications().current().unwrap().message,
        LOGIN_SUCCESS_MESSAGE
    );
}

#[tokio::test(start_paused = true)]
async fn test_register_conflict_keeps_form_for_correction() {
    let api = Arc::new(FakeAuthApi::new(Duration::from_millis(10)));
    let ctx = context(api.clone());

    let page = RegisterPage::new(&ctx);
    page.set_name("Ana");
    page.set_email("ana@example.com");
    page.set_password("secret1");

    assert!(page.submit().await.is_err());
    assert_eq!(page.error().as_deref(), Some("Email already registered"));
    assert_eq!(page.form().name, "Ana");

    page.set_email("ana2@example.com");
    page.submit().await.unwrap();
    assert_eq!(api.register_calls.load(Ordering::SeqCst), 2);
    assert!(page.form().email.is_empty());
}
