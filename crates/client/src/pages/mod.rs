//! Page controllers for the authentication forms.
//!
//! Every submission walks the same state machine:
//! `Idle -> Validating -> (Invalid | Submitting) -> (Succeeded | Failed)`.
//! Invalid input never reaches the API. While a submission is in flight a
//! second trigger is rejected with [`AppError::SubmitInProgress`].

mod login;
mod register;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, warn};

use common::{AppError, AppResult};

use crate::validation::{validate_and_focus, FocusTarget, FormData, RuleSet};

pub use login::{LoginForm, LoginPage, LOGIN_FAILED_MESSAGE, LOGIN_SUCCESS_MESSAGE};
pub use register::{
    RegisterForm, RegisterPage, REGISTER_FAILED_MESSAGE, REGISTER_SUCCESS_MESSAGE,
};

/// Where a page is in its submit workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Validating,
    /// Local validation failed; nothing was sent
    Invalid { field: String, message: String },
    Submitting,
    Succeeded,
    /// The API call failed; the form is left as it was
    Failed { message: String },
}

impl SubmitStatus {
    /// Error text to show beside the form, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            SubmitStatus::Invalid { message, .. } | SubmitStatus::Failed { message } => {
                Some(message.as_str())
            }
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmitStatus::Submitting)
    }
}

/// Focus target that ignores focus requests, for headless callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFocus;

impl FocusTarget for NoFocus {
    fn focus_field(&mut self, _field: &str) {}
}

/// Form values plus submit bookkeeping shared by the page controllers.
pub(crate) struct PageState<F> {
    form: Mutex<F>,
    status: watch::Sender<SubmitStatus>,
    in_flight: AtomicBool,
}

/// Marks a submission as in flight until dropped.
pub(crate) struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl<F: Clone + Default> PageState<F> {
    pub(crate) fn new() -> Self {
        let (status, _) = watch::channel(SubmitStatus::Idle);
        Self {
            form: Mutex::new(F::default()),
            status,
            in_flight: AtomicBool::new(false),
        }
    }

    fn lock_form(&self) -> MutexGuard<'_, F> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn form(&self) -> F {
        self.lock_form().clone()
    }

    pub(crate) fn update_form(&self, update: impl FnOnce(&mut F)) {
        update(&mut self.lock_form());
    }

    pub(crate) fn status(&self) -> SubmitStatus {
        self.status.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<SubmitStatus> {
        self.status.subscribe()
    }

    fn set_status(&self, status: SubmitStatus) {
        debug!(?status, "Submit status changed");
        self.status.send_replace(status);
    }

    /// Claim the page, validate, and move to `Submitting`.
    ///
    /// The returned guard must be held until the remote call completes.
    pub(crate) fn start<T>(
        &self,
        data: &FormData,
        rules: &RuleSet,
        focus: &mut T,
    ) -> AppResult<InFlight<'_>>
    where
        T: FocusTarget + ?Sized,
    {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            debug!("Submit ignored, previous submission still in flight");
            return Err(AppError::SubmitInProgress);
        }
        let guard = InFlight {
            flag: &self.in_flight,
        };

        self.set_status(SubmitStatus::Validating);
        if let Err(err) = validate_and_focus(data, rules, focus).into_result() {
            if let AppError::Validation { field, message } = &err {
                self.set_status(SubmitStatus::Invalid {
                    field: field.clone(),
                    message: message.clone(),
                });
            }
            return Err(err);
        }

        self.set_status(SubmitStatus::Submitting);
        Ok(guard)
    }

    /// Record the remote outcome. Failures keep the form untouched.
    pub(crate) fn finish<T>(&self, result: AppResult<T>, fallback: &str) -> AppResult<T> {
        match result {
            Ok(value) => {
                self.set_status(SubmitStatus::Succeeded);
                Ok(value)
            }
            Err(err) => {
                let message = err.user_message(fallback);
                warn!(code = err.code(), "Submission failed: {}", message);
                self.set_status(SubmitStatus::Failed { message });
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::validation::FieldRule;

    #[derive(Debug, Clone, Default)]
    struct Form;

    fn rules() -> RuleSet {
        RuleSet::new().field("email", FieldRule::required().message("Email is required"))
    }

    #[test]
    fn test_start_rejects_invalid_and_releases_guard() {
        let state = PageState::<Form>::new();
        let err = state
            .start(&FormData::new(), &rules(), &mut NoFocus)
            .err()
            .unwrap();

        assert_eq!(err.invalid_field(), Some("email"));
        assert_eq!(state.status().error(), Some("Email is required"));
        assert!(!state.in_flight.load(Ordering::SeqCst));
    }

    #[test]
    fn test_second_start_while_in_flight_is_rejected() {
        let state = PageState::<Form>::new();
        let data = FormData::from([("email", "a@b.com")]);

        let guard = state.start(&data, &rules(), &mut NoFocus).unwrap();
        assert!(state.status().is_submitting());

        let second = state.start(&data, &rules(), &mut NoFocus);
        assert!(matches!(second, Err(AppError::SubmitInProgress)));
        assert!(state.status().is_submitting());

        drop(guard);
        assert!(state.start(&data, &rules(), &mut NoFocus).is_ok());
    }

    #[test]
    fn test_finish_uses_fallback_for_opaque_errors() {
        let state = PageState::<Form>::new();
        let result: AppResult<()> = state.finish(Err(AppError::Status(500)), "Try again");

        assert!(result.is_err());
        assert_eq!(
            state.status(),
            SubmitStatus::Failed {
                message: "Try again".to_string()
            }
        );
    }
}
