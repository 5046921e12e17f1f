use super::*;

#[test]
fn query_param_decodes_value() {
    assert_eq!(query_param("?redirect=%2Fcourses%3Fid%3D7", "redirect"), Some("/courses?id=7".to_owned()));
    assert_eq!(query_param("a=1&redirect=/x", "redirect"), Some("/x".to_owned()));
}

#[test]
fn query_param_missing_or_empty_is_none() {
    assert_eq!(query_param("", "redirect"), None);
    assert_eq!(query_param("?other=1", "redirect"), None);
    assert_eq!(query_param("?redirect=", "redirect"), None);
}

#[test]
fn return_url_wins_over_query() {
    let location = Location { return_url: Some("/courses".into()), query: Some("redirect=/profile".into()) };
    assert_eq!(resolve_redirect(&location, DEFAULT_AFTER_AUTH), "/courses");
}

#[test]
fn query_used_when_no_return_url() {
    let location = Location::with_query("?redirect=/profile");
    assert_eq!(resolve_redirect(&location, DEFAULT_AFTER_AUTH), "/profile");
}

#[test]
fn empty_return_url_falls_through() {
    let location = Location { return_url: Some(String::new()), query: Some("redirect=/profile".into()) };
    assert_eq!(resolve_redirect(&location, DEFAULT_AFTER_AUTH), "/profile");
}

#[test]
fn default_when_nothing_supplied() {
    assert_eq!(resolve_redirect(&Location::default(), DEFAULT_AFTER_AUTH), "/dashboard");
    assert_eq!(resolve_redirect(&Location::default(), DEFAULT_ALREADY_AUTHENTICATED), "/");
}
