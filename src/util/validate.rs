//! Client-side validation rules for the auth form.
//!
//! Pure functions only; the controller decides when to run them and where the
//! messages land.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use crate::state::form::{ErrorKey, Field, FieldErrors, FormFields, Mode};

pub const FIRST_NAME_REQUIRED: &str = "First name is required";
pub const LAST_NAME_REQUIRED: &str = "Last name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Email must contain '@' and '.' with '.' coming after '@'";
pub const PASSWORD_REQUIRED: &str = "Password is required";
/// Reported for every password rule failure, not just the length rule.
pub const PASSWORD_INVALID: &str = "Password must be at least 8 characters long";
pub const CREDENTIALS_REQUIRED: &str = "Email and password are required";
pub const PASSWORDS_MISMATCH: &str = "Passwords do not match";

const MIN_PASSWORD_LEN: usize = 8;
const PASSWORD_SPECIALS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

/// Loose shape check: `@` not first, last `.` after it, and not trailing.
#[must_use]
pub fn validate_email(value: &str) -> bool {
    let Some(at) = value.find('@') else {
        return false;
    };
    let Some(dot) = value.rfind('.') else {
        return false;
    };
    at > 0 && dot > at && dot + 1 < value.len()
}

/// At least 8 UTF-16 code units with upper, lower, digit and one special
/// character. Length is counted the way a browser counts `input.value.length`,
/// so a non-BMP character such as an emoji counts twice.
#[must_use]
pub fn validate_password(value: &str) -> bool {
    value.encode_utf16().count() >= MIN_PASSWORD_LEN
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

/// Per-field rules for `mode`. Every failing field is reported.
///
/// # Errors
///
/// Returns the collected messages when any rule fails.
pub fn validate_form(mode: Mode, fields: &FormFields) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if mode == Mode::Signup {
        if fields.first_name.trim().is_empty() {
            errors.insert(Field::FirstName, FIRST_NAME_REQUIRED);
        }
        if fields.last_name.trim().is_empty() {
            errors.insert(Field::LastName, LAST_NAME_REQUIRED);
        }
    }

    if fields.email.trim().is_empty() {
        errors.insert(Field::Email, EMAIL_REQUIRED);
    } else if !validate_email(&fields.email) {
        errors.insert(Field::Email, EMAIL_INVALID);
    }

    if fields.password.is_empty() {
        errors.insert(Field::Password, PASSWORD_REQUIRED);
    } else if !validate_password(&fields.password) {
        errors.insert(Field::Password, PASSWORD_INVALID);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Pick the input a server error message belongs to.
///
/// Case-insensitive substring match, first hit wins: `email`/`user`, then
/// `password`, then `match`. Anything else is a whole-form error. This routes
/// e.g. "User not found" to the email input.
#[must_use]
pub fn classify_error(message: &str) -> ErrorKey {
    let lower = message.to_lowercase();
    if lower.contains("email") || lower.contains("user") {
        ErrorKey::Field(Field::Email)
    } else if lower.contains("password") {
        ErrorKey::Field(Field::Password)
    } else if lower.contains("match") {
        ErrorKey::Field(Field::ConfirmPassword)
    } else {
        ErrorKey::Form
    }
}
