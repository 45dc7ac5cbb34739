//! Route paths and link builders.

#[cfg(test)]
#[path = "route_test.rs"]
mod route_test;

use crate::state::auth_form::AuthMode;

pub const HOME: &str = "/";
pub const ABOUT: &str = "/about";
pub const CONTACT: &str = "/contact";
pub const AUTH: &str = "/auth";
pub const DASHBOARD: &str = "/dashboard";
pub const PREDICT: &str = "/predict";
pub const RESULTS: &str = "/results";
pub const ACCOUNT: &str = "/account";

/// Where the auth gate sends visitors without a session.
pub const LOGIN_REDIRECT: &str = "/auth?mode=login";
pub const SIGNUP: &str = "/auth?mode=signup";

#[must_use]
pub fn auth_href(mode: AuthMode) -> &'static str {
    match mode {
        AuthMode::Login => LOGIN_REDIRECT,
        AuthMode::Signup => SIGNUP,
    }
}

/// Detail link for one assessment.
#[must_use]
pub fn results_href(id: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
    format!("{RESULTS}?id={encoded}")
}
