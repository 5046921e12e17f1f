//! Error taxonomy for the auth form and its service collaborator.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is recovered at the controller boundary and turned into a
//! field-level or whole-form message plus a toast. These types exist so callers
//! (the CLI, tests) can match on what happened instead of parsing strings.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::state::form::FieldErrors;

/// Stable machine-readable code for an error variant.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

// =============================================================================
// FORM ERRORS
// =============================================================================

/// Why a submit attempt was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthFormError {
    /// Local validation failed; nothing was sent.
    #[error("form validation failed ({} field(s))", .0.len())]
    Validation(FieldErrors),

    /// `password` and `confirmPassword` differ on signup.
    #[error("Passwords do not match")]
    CredentialMismatch,

    /// The user API rejected the request or answered without success.
    #[error("{0}")]
    Service(String),

    /// The user API could not be reached or failed on its side.
    #[error("{0}")]
    Unavailable(String),

    /// Anything the service surfaced without a usable message.
    #[error("{0}")]
    Unknown(String),
}

impl ErrorCode for AuthFormError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "E_VALIDATION",
            Self::CredentialMismatch => "E_CREDENTIAL_MISMATCH",
            Self::Service(_) => "E_SERVICE",
            Self::Unavailable(_) => "E_UNAVAILABLE",
            Self::Unknown(_) => "E_UNKNOWN",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

// =============================================================================
// SERVICE ERRORS
// =============================================================================

/// Errors produced by an [`AuthService`](crate::net::api::AuthService).
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The HTTP request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The API answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The response body was not the expected JSON.
    #[error("invalid response: {0}")]
    Decode(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// A fake or custom service reporting a plain failure message.
    #[error("{0}")]
    Unsuccessful(String),
}

impl ErrorCode for ServiceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "E_TRANSPORT",
            Self::Rejected { .. } => "E_REJECTED",
            Self::Decode(_) => "E_DECODE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::Unsuccessful(_) => "E_UNSUCCESSFUL",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Rejected { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// CONFIG ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base URL `{value}`: {reason}")]
    InvalidBaseUrl { value: String, reason: String },
    #[error("invalid value for {var}: `{value}`")]
    InvalidNumber { var: &'static str, value: String },
}
