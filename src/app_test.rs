use super::*;

#[test]
fn route_for_matches_known_paths() {
    assert_eq!(route_for("/"), Route::Landing);
    assert_eq!(route_for(""), Route::Landing);
    assert_eq!(route_for("/login"), Route::Login);
    assert_eq!(route_for("/login/"), Route::Login);
    assert_eq!(route_for("/login?redirect=/x"), Route::Login);
    assert_eq!(route_for("/dashboard"), Route::NotFound);
    assert_eq!(route_for("/loginx"), Route::NotFound);
}

#[test]
fn anonymous_users_see_login() {
    assert_eq!(resolve_route("/login", false), RouteDecision::Render(Route::Login));
    assert_eq!(resolve_route("/", false), RouteDecision::Render(Route::Landing));
}

#[test]
fn authenticated_login_visit_redirects() {
    assert_eq!(resolve_route("/login", true), RouteDecision::Redirect("/".to_owned()));
    assert_eq!(resolve_route("/login?redirect=/courses", true), RouteDecision::Redirect("/courses".to_owned()));
    assert_eq!(
        resolve_route("/login?redirect=%2Fcourses#top", true),
        RouteDecision::Redirect("/courses".to_owned())
    );
}

#[test]
fn authenticated_users_still_see_landing() {
    assert_eq!(resolve_route("/", true), RouteDecision::Render(Route::Landing));
}
