//! Route surface for the site shell.
//!
//! ARCHITECTURE
//! ============
//! Two public routes: `/` (landing) and `/login` (auth card). Authenticated
//! visitors to `/login` are bounced to `?redirect=` or `/`. Rendering lives
//! elsewhere; this module only decides what a path resolves to.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use crate::util::redirect::{DEFAULT_ALREADY_AUTHENTICATED, query_param};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    NotFound,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    Render(Route),
    Redirect(String),
}

/// Match a path (query string and trailing slash ignored).
#[must_use]
pub fn route_for(path: &str) -> Route {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    match trimmed {
        "" => Route::Landing,
        "/login" => Route::Login,
        _ => Route::NotFound,
    }
}

/// Resolve a full request target (`/login?redirect=/x`) for the current session.
#[must_use]
pub fn resolve_route(target: &str, is_authenticated: bool) -> RouteDecision {
    let route = route_for(target);
    if route == Route::Login && is_authenticated {
        let query = target.split_once('?').map_or("", |(_, q)| q);
        let query = query.split('#').next().unwrap_or_default();
        let to = query_param(query, "redirect").unwrap_or_else(|| DEFAULT_ALREADY_AUTHENTICATED.to_owned());
        return RouteDecision::Redirect(to);
    }
    RouteDecision::Render(route)
}
