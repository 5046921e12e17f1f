use super::*;

#[test]
fn signup_request_serializes_camel_case() {
    let req = SignupRequest {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: "ada@example.com".into(),
        password: "Abcdefg1!".into(),
        confirm_password: "Abcdefg1!".into(),
    };
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["firstName"], "Ada");
    assert_eq!(json["lastName"], "Lovelace");
    assert_eq!(json["confirmPassword"], "Abcdefg1!");
}

#[test]
fn user_accepts_mongo_id_alias() {
    let user: User = serde_json::from_str(r#"{"_id":"64f0","firstName":"Ada","email":"ada@example.com"}"#).unwrap();
    assert_eq!(user.id.as_deref(), Some("64f0"));
    assert_eq!(user.first_name.as_deref(), Some("Ada"));
    assert_eq!(user.last_name, None);
}

#[test]
fn auth_result_optional_fields_default() {
    let result: AuthResult = serde_json::from_str(r#"{"success":true}"#).unwrap();
    assert_eq!(result, AuthResult::ok());
}

#[test]
fn error_body_prefers_message_then_error() {
    let body: ErrorBody = serde_json::from_str(r#"{"message":"User not found","error":"x"}"#).unwrap();
    assert_eq!(body.into_message().as_deref(), Some("User not found"));
    let body: ErrorBody = serde_json::from_str(r#"{"error":"Invalid password"}"#).unwrap();
    assert_eq!(body.into_message().as_deref(), Some("Invalid password"));
    let body: ErrorBody = serde_json::from_str(r#"{"message":"  "}"#).unwrap();
    assert_eq!(body.into_message(), None);
}
