//! Route-guard decisions.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ProtectedRoute` and `AdminRoute` render whatever `evaluate` returns for
//! the current auth state. Guards keep no state of their own, so the
//! decision is recomputed on every auth change.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::config::ClientConfig;
use crate::state::auth::AuthState;

/// Query parameter carrying the location to return to after login.
pub const RETURN_TO_PARAM: &str = "from";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardKind {
    /// Any authenticated user.
    Authenticated,
    /// Authenticated users with the admin role.
    Admin,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Session state still settling; show a placeholder.
    Loading,
    /// Not authenticated; go to login and come back to `from`.
    RedirectLogin { from: String },
    /// Authenticated but not allowed here; go to the dashboard.
    RedirectForbidden,
    Render,
}

/// Decide what a guard of `kind` shows for `state` at `attempted`.
pub fn evaluate(state: &AuthState, kind: GuardKind, attempted: &str) -> GuardOutcome {
    if state.is_loading() {
        return GuardOutcome::Loading;
    }
    if !state.is_authenticated() {
        return GuardOutcome::RedirectLogin { from: attempted.to_owned() };
    }
    if kind == GuardKind::Admin && !state.is_admin() {
        return GuardOutcome::RedirectForbidden;
    }
    GuardOutcome::Render
}

/// Navigation target for a redirect outcome, `None` otherwise.
pub fn redirect_target(outcome: &GuardOutcome, config: &ClientConfig) -> Option<String> {
    match outcome {
        GuardOutcome::RedirectLogin { from } => Some(login_url(&config.login_path, from)),
        GuardOutcome::RedirectForbidden => Some(config.dashboard_path.clone()),
        GuardOutcome::Loading | GuardOutcome::Render => None,
    }
}

/// Join router pathname and query into the location a guard protects.
pub fn attempted_location(pathname: &str, search: &str) -> String {
    let query = search.trim_start_matches('?');
    if query.is_empty() {
        pathname.to_owned()
    } else {
        format!("{pathname}?{query}")
    }
}

/// `login_path?from=<attempted>`; the bare login path if nothing to return to.
pub fn login_url(login_path: &str, from: &str) -> String {
    if from.is_empty() || from == login_path {
        return login_path.to_owned();
    }
    format!("{login_path}?{RETURN_TO_PARAM}={}", encode_query_value(from))
}

/// Where to go after a successful login: the recorded `from` if it is a
/// local path, else the dashboard.
pub fn post_login_target(from: Option<&str>, config: &ClientConfig) -> String {
    match from {
        Some(path) if is_local_path(path) && path != config.login_path => path.to_owned(),
        _ => config.dashboard_path.clone(),
    }
}

/// Same-origin absolute path with no backslash (browsers read `\` as `/`).
fn is_local_path(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.first() == Some(&b'/') && !matches!(bytes.get(1), Some(b'/' | b'\\')) && !path.contains('\\')
}

/// Percent-encode everything outside the RFC 3986 unreserved set plus `/`.
fn encode_query_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~' | b'/') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
