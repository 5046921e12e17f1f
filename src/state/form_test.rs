use super::*;

// =============================================================
// Mode / Field
// =============================================================

#[test]
fn mode_defaults_to_login_and_toggles() {
    assert_eq!(Mode::default(), Mode::Login);
    assert_eq!(Mode::Login.toggled(), Mode::Signup);
    assert_eq!(Mode::Signup.toggled(), Mode::Login);
}

#[test]
fn field_names_use_wire_casing() {
    let names: Vec<&str> = Field::ALL.iter().map(|f| f.name()).collect();
    assert_eq!(names, ["firstName", "lastName", "email", "password", "confirmPassword"]);
}

#[test]
fn signup_only_fields_are_not_required_on_login() {
    assert!(Field::Email.required_in(Mode::Login));
    assert!(Field::Password.required_in(Mode::Login));
    assert!(!Field::FirstName.required_in(Mode::Login));
    assert!(!Field::ConfirmPassword.required_in(Mode::Login));
    assert!(Field::LastName.required_in(Mode::Signup));
    assert!(Field::ConfirmPassword.required_in(Mode::Signup));
}

// =============================================================
// FieldErrors
// =============================================================

#[test]
fn field_errors_keep_form_sentinel_separate() {
    let mut errors = FieldErrors::new();
    errors.insert(Field::Email, "bad email");
    errors.insert(ErrorKey::Form, "whole form");
    assert_eq!(errors.get(Field::Email), Some("bad email"));
    assert_eq!(errors.get(ErrorKey::Form), Some("whole form"));
    assert_eq!(errors.len(), 2);
    assert_eq!(ErrorKey::Form.name(), "form");
}

#[test]
fn field_errors_collect_from_pairs() {
    let errors: FieldErrors = [(Field::Password, "x"), (Field::ConfirmPassword, "x")].into_iter().collect();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.get(Field::ConfirmPassword), Some("x"));
}

// =============================================================
// AuthForm
// =============================================================

#[test]
fn input_marks_touched_and_clears_only_that_error() {
    let mut form = AuthForm::new(Mode::Signup);
    form.errors.insert(Field::Email, "Email is required");
    form.errors.insert(Field::Password, "Password is required");

    form.input(Field::Email, "a@b.com");

    assert_eq!(form.fields.email, "a@b.com");
    assert!(form.touched.contains(&Field::Email));
    assert_eq!(form.errors.get(Field::Email), None);
    assert_eq!(form.errors.get(Field::Password), Some("Password is required"));
}

#[test]
fn toggle_mode_resets_everything_but_flips_mode() {
    let mut form = AuthForm::new(Mode::Signup);
    form.input(Field::FirstName, "Ada");
    form.input(Field::Email, "ada@");
    form.errors.insert(ErrorKey::Form, "nope");
    form.show_password = true;
    form.submitted = true;
    form.phase = SubmitPhase::Failed;

    form.toggle_mode();

    assert_eq!(form.mode, Mode::Login);
    assert_eq!(form.fields, FormFields::default());
    assert!(form.errors.is_empty());
    assert!(form.touched.is_empty());
    assert!(!form.show_password);
    assert!(!form.submitted);
    assert_eq!(form.phase, SubmitPhase::Idle);
    assert_eq!(form.generation, 1);
}
