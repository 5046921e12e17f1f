use super::*;

#[test]
fn auth_form_error_codes_are_stable() {
    assert_eq!(AuthFormError::Validation(FieldErrors::default()).error_code(), "E_VALIDATION");
    assert_eq!(AuthFormError::CredentialMismatch.error_code(), "E_CREDENTIAL_MISMATCH");
    assert_eq!(AuthFormError::Service("x".into()).error_code(), "E_SERVICE");
    assert_eq!(AuthFormError::Unavailable("x".into()).error_code(), "E_UNAVAILABLE");
    assert_eq!(AuthFormError::Unknown("x".into()).error_code(), "E_UNKNOWN");
}

#[test]
fn only_unavailable_service_is_retryable() {
    assert!(!AuthFormError::CredentialMismatch.retryable());
    assert!(!AuthFormError::Validation(FieldErrors::default()).retryable());
    assert!(!AuthFormError::Service("User not found".into()).retryable());
    assert!(AuthFormError::Unavailable("request failed: 503".into()).retryable());
}

#[test]
fn credential_mismatch_displays_user_message() {
    assert_eq!(AuthFormError::CredentialMismatch.to_string(), "Passwords do not match");
}

#[test]
fn rejected_service_error_displays_server_message() {
    let err = ServiceError::Rejected { status: 401, message: "Invalid password".into() };
    assert_eq!(err.to_string(), "Invalid password");
    assert_eq!(err.error_code(), "E_REJECTED");
    assert!(!err.retryable());
}

#[test]
fn server_side_statuses_are_retryable() {
    assert!(ServiceError::Rejected { status: 503, message: String::new() }.retryable());
    assert!(ServiceError::Rejected { status: 429, message: String::new() }.retryable());
    assert!(ServiceError::Transport("reset".into()).retryable());
    assert!(!ServiceError::Decode("eof".into()).retryable());
}
