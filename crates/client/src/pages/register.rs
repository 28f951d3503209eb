//! Registration page controller.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tokio::sync::watch;
use tracing::info;

use common::AppResult;
use domain::{Registration, UserType, MIN_PASSWORD_LENGTH};

use super::{NoFocus, PageState, SubmitStatus};
use crate::api::AuthApi;
use crate::context::AppContext;
use crate::notification::NotificationCenter;
use crate::validation::{FieldRule, FocusTarget, FormData, RuleSet};

pub const REGISTER_SUCCESS_MESSAGE: &str = "Registration successful, you can go to login.";
pub const REGISTER_FAILED_MESSAGE: &str = "Registration failed. Please try again later.";

static PASSWORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^.{{{},}}$", MIN_PASSWORD_LENGTH)).expect("password pattern is valid")
});

static REGISTER_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new()
        .field("name", FieldRule::required().message("Name is required"))
        .field("email", FieldRule::required().message("Email is required"))
        .field(
            "password",
            FieldRule::required()
                .message("Password is required")
                .pattern(
                    PASSWORD_PATTERN.clone(),
                    format!(
                        "Password must be at least {} characters long",
                        MIN_PASSWORD_LENGTH
                    ),
                ),
        )
});

/// Values typed into the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub user_type: UserType,
}

impl RegisterForm {
    fn to_form_data(&self) -> FormData {
        FormData::from([
            ("name", &self.name),
            ("email", &self.email),
            ("password", &self.password),
        ])
    }
}

/// Drives the registration form. Success clears the text fields and shows a
/// notification; the session is left alone until the user logs in.
pub struct RegisterPage {
    api: Arc<dyn AuthApi>,
    notifications: NotificationCenter,
    state: PageState<RegisterForm>,
}

impl RegisterPage {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            api: ctx.api(),
            notifications: ctx.notifications().clone(),
            state: PageState::new(),
        }
    }

    pub fn set_name(&self, name: impl Into<String>) {
        let name = name.into();
        self.state.update_form(|form| form.name = name);
    }

    pub fn set_email(&self, email: impl Into<String>) {
        let email = email.into();
        self.state.update_form(|form| form.email = email);
    }

    pub fn set_password(&self, password: impl Into<String>) {
        let password = password.into();
        self.state.update_form(|form| form.password = password);
    }

    pub fn set_user_type(&self, user_type: UserType) {
        self.state.update_form(|form| form.user_type = user_type);
    }

    pub fn form(&self) -> RegisterForm {
        self.state.form()
    }

    pub fn status(&self) -> SubmitStatus {
        self.state.status()
    }

    pub fn error(&self) -> Option<String> {
        self.state.status().error().map(str::to_string)
    }

    pub fn watch_status(&self) -> watch::Receiver<SubmitStatus> {
        self.state.subscribe()
    }

    pub async fn submit(&self) -> AppResult<()> {
        self.submit_focused(&mut NoFocus).await
    }

    pub async fn submit_focused<T>(&self, focus: &mut T) -> AppResult<()>
    where
        T: FocusTarget + Send + ?Sized,
    {
        let form = self.state.form();
        let _in_flight = self
            .state
            .start(&form.to_form_data(), &REGISTER_RULES, focus)?;

        let result = self
            .api
            .register(Registration {
                name: form.name,
                email: form.email.clone(),
                password: form.password,
                user_type: form.user_type,
            })
            .await;
        self.state.finish(result, REGISTER_FAILED_MESSAGE)?;

        info!(email = %form.email, user_type = %form.user_type, "User registered");
        self.notifications.success(REGISTER_SUCCESS_MESSAGE);
        self.state.update_form(|form| {
            form.name.clear();
            form.email.clear();
            form.password.clear();
        });
        Ok(())
    }
}
