use super::*;
use crate::net::types::User;
use crate::state::auth::PersistedAuth;

fn signed_in(role: &str) -> AuthState {
    let mut state = AuthState::default();
    state.login(User {
        id: "u1".to_owned(),
        role: role.to_owned(),
        username: "vega".to_owned(),
        profile: serde_json::Map::new(),
    });
    state
}

fn loading() -> AuthState {
    let mut state = AuthState::default();
    state.begin_session_check();
    state
}

// =============================================================
// evaluate
// =============================================================

#[test]
fn loading_state_shows_placeholder_for_both_guards() {
    let state = loading();
    assert_eq!(evaluate(&state, GuardKind::Authenticated, "/reports"), GuardOutcome::Loading);
    assert_eq!(evaluate(&state, GuardKind::Admin, "/admin"), GuardOutcome::Loading);
}

#[test]
fn unauthenticated_redirects_to_login_with_location() {
    let state = AuthState::default();
    assert_eq!(
        evaluate(&state, GuardKind::Authenticated, "/reports/weekly"),
        GuardOutcome::RedirectLogin { from: "/reports/weekly".to_owned() }
    );
    assert_eq!(
        evaluate(&state, GuardKind::Admin, "/admin"),
        GuardOutcome::RedirectLogin { from: "/admin".to_owned() }
    );
}

#[test]
fn authenticated_member_renders_basic_route() {
    assert_eq!(evaluate(&signed_in("member"), GuardKind::Authenticated, "/"), GuardOutcome::Render);
}

#[test]
fn member_on_admin_route_is_forbidden_not_sent_to_login() {
    let outcome = evaluate(&signed_in("member"), GuardKind::Admin, "/admin");
    assert_eq!(outcome, GuardOutcome::RedirectForbidden);
    assert_eq!(redirect_target(&outcome, &ClientConfig::default()).as_deref(), Some("/"));
}

#[test]
fn admin_renders_admin_route() {
    assert_eq!(evaluate(&signed_in("admin"), GuardKind::Admin, "/admin"), GuardOutcome::Render);
}

#[test]
fn restored_snapshot_renders_before_reconciliation() {
    let state = AuthState::from_snapshot(PersistedAuth {
        user: signed_in("member").user().cloned(),
        is_authenticated: true,
    });
    assert_eq!(evaluate(&state, GuardKind::Authenticated, "/"), GuardOutcome::Render);
}

// =============================================================
// Redirect targets
// =============================================================

#[test]
fn redirect_target_is_none_for_non_redirects() {
    let cfg = ClientConfig::default();
    assert_eq!(redirect_target(&GuardOutcome::Loading, &cfg), None);
    assert_eq!(redirect_target(&GuardOutcome::Render, &cfg), None);
}

#[test]
fn login_redirect_carries_encoded_location() {
    let outcome = GuardOutcome::RedirectLogin { from: "/reports/daily?day=2024-01-02&team=a b".to_owned() };
    assert_eq!(
        redirect_target(&outcome, &ClientConfig::default()).as_deref(),
        Some("/login?from=/reports/daily%3Fday%3D2024-01-02%26team%3Da%20b")
    );
}

#[test]
fn login_url_skips_empty_or_login_origin() {
    assert_eq!(login_url("/login", ""), "/login");
    assert_eq!(login_url("/login", "/login"), "/login");
}

#[test]
fn post_login_target_accepts_only_local_paths() {
    let cfg = ClientConfig::default();
    assert_eq!(post_login_target(Some("/leaderboard"), &cfg), "/leaderboard");
    assert_eq!(post_login_target(Some("https://evil.test"), &cfg), "/");
    assert_eq!(post_login_target(Some("//evil.test"), &cfg), "/");
    assert_eq!(post_login_target(Some("/login"), &cfg), "/");
    assert_eq!(post_login_target(None, &cfg), "/");
}

#[test]
fn post_login_target_rejects_backslash_paths() {
    let cfg = ClientConfig::default();
    assert_eq!(post_login_target(Some("/\\evil.example"), &cfg), "/");
    assert_eq!(post_login_target(Some("\\\\evil.example"), &cfg), "/");
    assert_eq!(post_login_target(Some("/reports\\..\\admin"), &cfg), "/");
    assert_eq!(post_login_target(Some("/reports/daily?day=1"), &cfg), "/reports/daily?day=1");
}

#[test]
fn attempted_location_joins_query_with_single_question_mark() {
    assert_eq!(attempted_location("/reports", ""), "/reports");
    assert_eq!(attempted_location("/reports", "day=1"), "/reports?day=1");
    assert_eq!(attempted_location("/reports", "?day=1"), "/reports?day=1");
}
