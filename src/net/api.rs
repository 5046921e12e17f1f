//! User API client: the `AuthService` seam and its HTTP implementation.
//!
//! DESIGN
//! ======
//! The form controller only sees [`AuthService`]. [`HttpAuthService`] talks to
//! `POST /api/users/login` and `POST /api/users/register`, keeps the loading
//! flag up for the duration of each request, and remembers the session on
//! success. Response parsing is split into pure functions for testability.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx answers become `ServiceError::Rejected` carrying the server's own
//! message when the body has one, so the controller can route it to a field.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use serde::Deserialize;

use super::types::{AuthResult, ErrorBody, LoginRequest, SignupRequest, User};
use crate::config::AuthClientConfig;
use crate::error::ServiceError;

pub const LOGIN_PATH: &str = "/api/users/login";
pub const REGISTER_PATH: &str = "/api/users/register";

/// Remote authentication collaborator consumed by the form controller.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, credentials: &LoginRequest) -> Result<AuthResult, ServiceError>;

    async fn signup(&self, registration: &SignupRequest) -> Result<AuthResult, ServiceError>;

    /// Whether a session is currently held.
    fn is_authenticated(&self) -> bool;

    /// Whether a request is in flight.
    fn is_loading(&self) -> bool;
}

/// Session captured from a successful login or signup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpAuthService {
    http: reqwest::Client,
    config: AuthClientConfig,
    loading: AtomicBool,
    session: Mutex<Option<Session>>,
}

impl HttpAuthService {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: AuthClientConfig) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ServiceError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config, loading: AtomicBool::new(false), session: Mutex::new(None) })
    }

    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Drop the stored session.
    pub fn logout(&self) {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    async fn post<B: serde::Serialize + Sync>(&self, path: &str, body: &B) -> Result<AuthResult, ServiceError> {
        let _loading = LoadingGuard::raise(&self.loading);
        let url = self.config.endpoint(path);

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(transport_error)?;

        if !(200..300).contains(&status) {
            tracing::warn!(%url, status, "user API rejected request");
            return Err(parse_error(status, &text));
        }

        let result = parse_response(&text)?;
        if result.success {
            *self.session.lock().unwrap_or_else(PoisonError::into_inner) =
                Some(Session { token: result.token.clone(), user: result.user.clone() });
        }
        Ok(result)
    }
}

#[async_trait::async_trait]
impl AuthService for HttpAuthService {
    async fn login(&self, credentials: &LoginRequest) -> Result<AuthResult, ServiceError> {
        self.post(LOGIN_PATH, credentials).await
    }

    async fn signup(&self, registration: &SignupRequest) -> Result<AuthResult, ServiceError> {
        self.post(REGISTER_PATH, registration).await
    }

    fn is_authenticated(&self) -> bool {
        self.session.lock().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }
}

/// Holds the loading flag up until dropped, including on early return.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// =============================================================================
// PARSING
// =============================================================================

#[derive(Deserialize)]
struct RawAuthResult {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<User>,
}

/// Parse a 2xx body. A missing `success` flag is inferred from the presence
/// of a token or user.
fn parse_response(body: &str) -> Result<AuthResult, ServiceError> {
    let raw: RawAuthResult = serde_json::from_str(body).map_err(|e| ServiceError::Decode(e.to_string()))?;
    let success = raw.success.unwrap_or(raw.token.is_some() || raw.user.is_some());
    Ok(AuthResult { success, message: raw.message, token: raw.token, user: raw.user })
}

fn parse_error(status: u16, body: &str) -> ServiceError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| request_failed_message(status));
    ServiceError::Rejected { status, message }
}

/// Drops the URL: `/api/users/...` in the message would classify as an email error.
fn transport_error(err: reqwest::Error) -> ServiceError {
    ServiceError::Transport(err.without_url().to_string())
}

fn request_failed_message(status: u16) -> String {
    format!("request failed: {status}")
}
