//! Form field state for the login/signup card.
//!
//! DESIGN
//! ======
//! Plain data types with explicit mutation methods. The controller in
//! `pages::login` owns one instance of each behind a single lock, so every
//! transition (input, submit, mode toggle) is applied atomically.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Which card the user is looking at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Login,
    Signup,
}

impl Mode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Signup,
            Self::Signup => Self::Login,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Signup => "signup",
        }
    }
}

/// Named inputs on the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    pub const ALL: [Self; 5] = [Self::FirstName, Self::LastName, Self::Email, Self::Password, Self::ConfirmPassword];

    /// Wire/input name (`firstName`, `confirmPassword`, ...).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
        }
    }

    /// Placeholder shown while the field is not flagged as required.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email Address",
            Self::Password => "Password",
            Self::ConfirmPassword => "Confirm Password",
        }
    }

    /// Whether the field is shown and required in `mode`.
    #[must_use]
    pub fn required_in(self, mode: Mode) -> bool {
        match self {
            Self::Email | Self::Password => true,
            Self::FirstName | Self::LastName | Self::ConfirmPassword => mode == Mode::Signup,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// FIELDS
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl FormFields {
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
        };
        *slot = value.into();
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Key of an error message: a single input, or the whole form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKey {
    Field(Field),
    Form,
}

impl ErrorKey {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Field(field) => field.name(),
            Self::Form => "form",
        }
    }
}

impl From<Field> for ErrorKey {
    fn from(field: Field) -> Self {
        Self::Field(field)
    }
}

/// Messages keyed by field, plus the `form` sentinel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<ErrorKey, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<ErrorKey>, message: impl Into<String>) {
        self.0.insert(key.into(), message.into());
    }

    #[must_use]
    pub fn get(&self, key: impl Into<ErrorKey>) -> Option<&str> {
        self.0.get(&key.into()).map(String::as_str)
    }

    pub fn remove(&mut self, key: impl Into<ErrorKey>) -> Option<String> {
        self.0.remove(&key.into())
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ErrorKey, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl<K: Into<ErrorKey>, V: Into<String>> FromIterator<(K, V)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Fields the user has typed into since the last reset.
pub type TouchedFields = BTreeSet<Field>;

// =============================================================================
// SUBMIT PHASE
// =============================================================================

/// Where the current submit attempt stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Success,
    Failed,
}

/// Complete mutable state of the auth card.
#[derive(Clone, Debug, Default)]
pub struct AuthForm {
    pub mode: Mode,
    pub fields: FormFields,
    pub errors: FieldErrors,
    pub touched: TouchedFields,
    pub show_password: bool,
    pub submitted: bool,
    pub phase: SubmitPhase,
    /// Bumped on every mode toggle so in-flight results can tell they are stale.
    pub generation: u64,
}

impl AuthForm {
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self { mode, ..Self::default() }
    }

    /// Store an input value, mark it touched and drop its error.
    pub fn input(&mut self, field: Field, value: impl Into<String>) {
        self.fields.set(field, value);
        self.touched.insert(field);
        self.errors.remove(field);
    }

    /// Flip the mode and reset everything else in one step.
    pub fn toggle_mode(&mut self) {
        *self = Self {
            mode: self.mode.toggled(),
            generation: self.generation.wrapping_add(1),
            ..Self::default()
        };
    }
}
