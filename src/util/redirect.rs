//! Post-auth redirect target resolution.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guarded pages send users to `/login` with either a `returnUrl` in
//! navigation state or a `?redirect=` query parameter. Both the submit path
//! and the already-authenticated route guard resolve the target here.

#[cfg(test)]
#[path = "redirect_test.rs"]
mod redirect_test;

/// Default target after a successful login or signup.
pub const DEFAULT_AFTER_AUTH: &str = "/dashboard";
/// Default target when an authenticated user lands on `/login`.
pub const DEFAULT_ALREADY_AUTHENTICATED: &str = "/";

/// Where the login page was opened from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    /// Return URL handed over by the navigating page, if any.
    pub return_url: Option<String>,
    /// Raw query string, with or without the leading `?`.
    pub query: Option<String>,
}

impl Location {
    #[must_use]
    pub fn with_query(query: impl Into<String>) -> Self {
        Self { return_url: None, query: Some(query.into()) }
    }

    /// The URL-decoded `redirect` query parameter, when present and non-empty.
    #[must_use]
    pub fn redirect_param(&self) -> Option<String> {
        self.query.as_deref().and_then(|q| query_param(q, "redirect"))
    }
}

/// First value of `key` in a query string, URL-decoded. Empty values count as absent.
#[must_use]
pub fn query_param(query: &str, key: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

/// Return URL, then `?redirect=`, then `default`.
#[must_use]
pub fn resolve_redirect(location: &Location, default: &str) -> String {
    location
        .return_url
        .clone()
        .filter(|url| !url.is_empty())
        .or_else(|| location.redirect_param())
        .unwrap_or_else(|| default.to_owned())
}
