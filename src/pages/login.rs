//! Login/signup page orchestration.
//!
//! DESIGN
//! ======
//! `AuthFormController` owns every piece of transient form state (fields,
//! errors, touched set, password visibility, submit phase) behind one lock that
//! is never held across an `.await`. The network call is the only suspension
//! point, so input events and mode toggles may interleave with a pending
//! submit; a second submit during that window is refused, not queued.
//!
//! Validation runs in two layers before anything reaches the service: a blunt
//! "email and password present" check, then the per-field rules.
//!
//! ERROR HANDLING
//! ==============
//! Failures never escape `submit`. They are routed to a field (or the form)
//! by keyword, mirrored in an error toast, and returned as
//! `SubmitOutcome::Rejected` for callers that want to branch on them.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::error::{AuthFormError, ErrorCode};
use crate::net::api::AuthService;
use crate::net::types::{LoginRequest, SignupRequest};
use crate::state::form::{AuthForm, ErrorKey, Field, FieldErrors, FormFields, Mode, SubmitPhase};
use crate::state::toast::{ToastKind, ToastState, Toaster};
use crate::util::redirect::{DEFAULT_AFTER_AUTH, DEFAULT_ALREADY_AUTHENTICATED, Location, resolve_redirect};
use crate::util::validate::{self, CREDENTIALS_REQUIRED, PASSWORDS_MISMATCH};

/// Delay between the success toast and the redirect.
pub const NAVIGATE_DELAY: Duration = Duration::from_millis(1500);

pub const LOGIN_SUCCESS: &str = "Login successful!";
pub const SIGNUP_SUCCESS: &str = "Account created successfully!";
pub const AUTH_FAILED: &str = "Authentication failed. Please try again.";
pub const UNKNOWN_ERROR: &str = "An error occurred. Please try again.";
pub const REQUIRED_PLACEHOLDER: &str = "Required*";

/// Router seam used for post-auth redirects.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Result of one press of the submit button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A request is already in flight; nothing changed.
    Busy,
    /// Rejected locally or by the service. Errors and toast are already set.
    Rejected(AuthFormError),
    /// Authenticated; navigation to `redirect_to` is scheduled.
    Success { redirect_to: String },
}

enum PendingRequest {
    Login(LoginRequest),
    Signup(SignupRequest),
}

struct Prepared {
    request: PendingRequest,
    mode: Mode,
    generation: u64,
}

pub struct AuthFormController<S: ?Sized, N: ?Sized> {
    service: Arc<S>,
    navigator: Arc<N>,
    location: Location,
    form: Mutex<AuthForm>,
    in_flight: AtomicBool,
    toaster: Toaster,
    navigate_delay: Duration,
}

impl<S, N> AuthFormController<S, N>
where
    S: AuthService + ?Sized + 'static,
    N: Navigator + ?Sized + 'static,
{
    #[must_use]
    pub fn new(service: Arc<S>, navigator: Arc<N>) -> Self {
        Self {
            service,
            navigator,
            location: Location::default(),
            form: Mutex::new(AuthForm::default()),
            in_flight: AtomicBool::new(false),
            toaster: Toaster::new(),
            navigate_delay: NAVIGATE_DELAY,
        }
    }

    /// Where the page was opened from; feeds redirect resolution.
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    #[must_use]
    pub fn with_mode(self, mode: Mode) -> Self {
        *self.lock() = AuthForm::new(mode);
        self
    }

    // -------------------------------------------------------------------------
    // Input events
    // -------------------------------------------------------------------------

    /// Apply a keystroke. Ignored (returns `false`) while inputs are disabled.
    pub fn set_field(&self, field: Field, value: impl Into<String>) -> bool {
        if self.inputs_disabled() {
            return false;
        }
        self.lock().input(field, value);
        true
    }

    /// Switch between login and signup, wiping all form state.
    pub fn toggle_mode(&self) {
        let mut form = self.lock();
        form.toggle_mode();
        tracing::debug!(mode = form.mode.as_str(), "auth mode toggled");
    }

    /// Returns the new visibility, or `None` while inputs are disabled.
    pub fn toggle_password_visibility(&self) -> Option<bool> {
        if self.inputs_disabled() {
            return None;
        }
        let mut form = self.lock();
        form.show_password = !form.show_password;
        Some(form.show_password)
    }

    /// Run the per-field rules and store their errors.
    pub fn validate_form(&self) -> bool {
        let mut form = self.lock();
        match validate::validate_form(form.mode, &form.fields) {
            Ok(()) => {
                form.errors.clear();
                true
            }
            Err(errors) => {
                form.errors = errors;
                false
            }
        }
    }

    /// Redirect away from the form when a session already exists.
    ///
    /// Returns the target when navigation was requested.
    pub fn redirect_if_authenticated(&self) -> Option<String> {
        if !self.service.is_authenticated() {
            return None;
        }
        let target = self
            .location
            .redirect_param()
            .unwrap_or_else(|| DEFAULT_ALREADY_AUTHENTICATED.to_owned());
        tracing::info!(%target, "already authenticated, leaving login page");
        self.navigator.navigate(&target);
        Some(target)
    }

    // -------------------------------------------------------------------------
    // Submit
    // -------------------------------------------------------------------------

    pub async fn submit(&self) -> SubmitOutcome {
        if self.service.is_loading() {
            tracing::debug!("submit ignored while the service is loading");
            return SubmitOutcome::Busy;
        }
        let Some(_flight) = FlightGuard::acquire(&self.in_flight, &self.form) else {
            tracing::debug!("submit ignored while a request is in flight");
            return SubmitOutcome::Busy;
        };

        match self.prepare() {
            Ok(prepared) => self.dispatch(prepared).await,
            Err(err) => SubmitOutcome::Rejected(err),
        }
    }

    /// Local checks. On rejection the errors (and toast, if any) are already set.
    fn prepare(&self) -> Result<Prepared, AuthFormError> {
        let mut form = self.lock();
        form.submitted = true;
        form.phase = SubmitPhase::Validating;
        form.errors.clear();

        if form.fields.email.is_empty() || form.fields.password.is_empty() {
            form.errors.insert(ErrorKey::Form, CREDENTIALS_REQUIRED);
            form.phase = SubmitPhase::Failed;
            return Err(AuthFormError::Validation(form.errors.clone()));
        }

        if form.mode == Mode::Signup && form.fields.password != form.fields.confirm_password {
            form.errors = [(Field::ConfirmPassword, PASSWORDS_MISMATCH), (Field::Password, PASSWORDS_MISMATCH)]
                .into_iter()
                .collect();
            form.phase = SubmitPhase::Failed;
            drop(form);
            self.toaster.show(PASSWORDS_MISMATCH, ToastKind::Error);
            return Err(AuthFormError::CredentialMismatch);
        }

        if let Err(errors) = validate::validate_form(form.mode, &form.fields) {
            tracing::debug!(count = errors.len(), "form rejected by field rules");
            form.errors = errors.clone();
            form.phase = SubmitPhase::Failed;
            return Err(AuthFormError::Validation(errors));
        }

        form.phase = SubmitPhase::Submitting;
        Ok(Prepared { request: build_request(form.mode, &form.fields), mode: form.mode, generation: form.generation })
    }

    async fn dispatch(&self, prepared: Prepared) -> SubmitOutcome {
        let Prepared { request, mode, generation } = prepared;
        tracing::info!(mode = mode.as_str(), "submitting credentials");

        let result = match &request {
            PendingRequest::Login(credentials) => self.service.login(credentials).await,
            PendingRequest::Signup(registration) => self.service.signup(registration).await,
        };

        match result {
            Ok(result) if result.success => self.finish_success(mode, generation),
            Ok(_) => self.finish_failure(AuthFormError::Service(AUTH_FAILED.to_owned()), generation),
            Err(err) => {
                tracing::error!(error = %err, mode = mode.as_str(), "authentication error");
                let message = err.to_string();
                let err = if message.trim().is_empty() {
                    AuthFormError::Unknown(UNKNOWN_ERROR.to_owned())
                } else if err.retryable() {
                    AuthFormError::Unavailable(message)
                } else {
                    AuthFormError::Service(message)
                };
                self.finish_failure(err, generation)
            }
        }
    }

    fn finish_success(&self, mode: Mode, generation: u64) -> SubmitOutcome {
        {
            let mut form = self.lock();
            if form.generation == generation {
                form.phase = SubmitPhase::Success;
            }
        }
        let message = match mode {
            Mode::Login => LOGIN_SUCCESS,
            Mode::Signup => SIGNUP_SUCCESS,
        };
        self.toaster.show(message, ToastKind::Success);

        let target = resolve_redirect(&self.location, DEFAULT_AFTER_AUTH);
        let navigator = Arc::clone(&self.navigator);
        let delay = self.navigate_delay;
        let path = target.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.navigate(&path);
        });

        tracing::info!(mode = mode.as_str(), %target, "authenticated");
        SubmitOutcome::Success { redirect_to: target }
    }

    fn finish_failure(&self, err: AuthFormError, generation: u64) -> SubmitOutcome {
        let message = err.to_string();
        let key = validate::classify_error(&message);
        {
            let mut form = self.lock();
            if form.generation == generation {
                form.errors = FieldErrors::new();
                form.errors.insert(key, message.clone());
                form.phase = SubmitPhase::Failed;
            } else {
                tracing::debug!("mode changed during request, dropping field errors");
            }
        }
        tracing::warn!(field = key.name(), %message, "authentication rejected");
        self.toaster.show(message, ToastKind::Error);
        SubmitOutcome::Rejected(err)
    }

    // -------------------------------------------------------------------------
    // Read side
    // -------------------------------------------------------------------------

    /// Copy of the full form state.
    #[must_use]
    pub fn snapshot(&self) -> AuthForm {
        self.lock().clone()
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.lock().mode
    }

    #[must_use]
    pub fn fields(&self) -> FormFields {
        self.lock().fields.clone()
    }

    #[must_use]
    pub fn errors(&self) -> FieldErrors {
        self.lock().errors.clone()
    }

    #[must_use]
    pub fn phase(&self) -> SubmitPhase {
        self.lock().phase
    }

    #[must_use]
    pub fn show_password(&self) -> bool {
        self.lock().show_password
    }

    #[must_use]
    pub fn toast(&self) -> ToastState {
        self.toaster.current()
    }

    #[must_use]
    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }

    /// Touched by the user, or implicated by a submit attempt.
    #[must_use]
    pub fn is_touched(&self, field: Field) -> bool {
        let form = self.lock();
        form.submitted || form.touched.contains(&field)
    }

    #[must_use]
    pub fn is_required(&self, field: Field) -> bool {
        field.required_in(self.mode())
    }

    #[must_use]
    pub fn placeholder(&self, field: Field) -> &'static str {
        let form = self.lock();
        if form.submitted && form.fields.get(field).is_empty() { REQUIRED_PLACEHOLDER } else { field.label() }
    }

    #[must_use]
    pub fn inputs_disabled(&self) -> bool {
        self.service.is_loading()
    }

    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        match (self.mode(), self.service.is_loading()) {
            (Mode::Login, false) => "Login",
            (Mode::Signup, false) => "Sign Up",
            (Mode::Login, true) => "Signing In...",
            (Mode::Signup, true) => "Creating Account...",
        }
    }

    fn lock(&self) -> MutexGuard<'_, AuthForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Owns the in-flight flag for one submit. Dropping it, including when the
/// submit future is cancelled mid-request, clears the flag and returns an
/// abandoned `Submitting` phase to `Idle`.
struct FlightGuard<'a> {
    flag: &'a AtomicBool,
    form: &'a Mutex<AuthForm>,
}

impl<'a> FlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool, form: &'a Mutex<AuthForm>) -> Option<Self> {
        if flag.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some(Self { flag, form })
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        let mut form = self.form.lock().unwrap_or_else(PoisonError::into_inner);
        if form.phase == SubmitPhase::Submitting {
            tracing::debug!("submit cancelled before the service answered");
            form.phase = SubmitPhase::Idle;
        }
        drop(form);
        self.flag.store(false, Ordering::Release);
    }
}

fn build_request(mode: Mode, fields: &FormFields) -> PendingRequest {
    match mode {
        Mode::Login => PendingRequest::Login(LoginRequest {
            email: fields.email.trim().to_owned(),
            password: fields.password.clone(),
        }),
        Mode::Signup => PendingRequest::Signup(SignupRequest {
            first_name: fields.first_name.trim().to_owned(),
            last_name: fields.last_name.trim().to_owned(),
            email: fields.email.trim().to_owned(),
            password: fields.password.clone(),
            confirm_password: fields.confirm_password.clone(),
        }),
    }
}
