use super::*;
use crate::net::types::User;
use crate::state::auth::PersistedAuth;
use futures::executor::block_on;
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

fn user(id: &str, role: &str) -> User {
    User {
        id: id.to_owned(),
        role: role.to_owned(),
        username: format!("{id}-name"),
        profile: serde_json::Map::new(),
    }
}

fn signed_in(role: &str) -> RwSignal<AuthState> {
    RwSignal::new(AuthState::from_snapshot(PersistedAuth { user: Some(user("u1", role)), is_authenticated: true }))
}

/// Pending on first poll so concurrent callers interleave.
#[derive(Default)]
struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            return Poll::Ready(());
        }
        self.0 = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

#[derive(Default)]
struct FakeApi {
    me: RefCell<Option<Result<Option<User>, ApiError>>>,
    login_error: Option<ApiError>,
    logout_fails: bool,
    me_calls: Cell<u32>,
    logout_calls: Cell<u32>,
}

impl FakeApi {
    fn me(result: Result<Option<User>, ApiError>) -> Self {
        Self { me: RefCell::new(Some(result)), ..Self::default() }
    }
}

impl AuthApi for FakeApi {
    async fn current_user(&self) -> Result<Option<User>, ApiError> {
        self.me_calls.set(self.me_calls.get() + 1);
        YieldOnce::default().await;
        self.me.borrow_mut().take().unwrap_or(Ok(None))
    }

    async fn login(&self, _credentials: &LoginRequest) -> Result<User, ApiError> {
        match &self.login_error {
            Some(error) => Err(error.clone()),
            None => Ok(user("u1", "member")),
        }
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.logout_calls.set(self.logout_calls.get() + 1);
        if self.logout_fails { Err(ApiError::Transport("offline".to_owned())) } else { Ok(()) }
    }
}

fn unauthorized() -> ApiError {
    ApiError::Status { status: 401, message: "session expired".to_owned() }
}

fn credentials() -> LoginRequest {
    LoginRequest { username: "vega".to_owned(), password: "hunter2".to_owned() }
}

// =============================================================
// check_session
// =============================================================

#[test]
fn check_session_authenticates_with_user_payload() {
    let owner = Owner::new();
    owner.set();
    let auth = RwSignal::new(AuthState::default());
    let api = FakeApi::me(Ok(Some(user("u1", "admin"))));

    block_on(check_session(auth, &api));

    auth.with_untracked(|state| {
        assert!(state.is_authenticated());
        assert!(state.is_admin());
        assert!(!state.is_loading());
    });
}

#[test]
fn check_session_failure_is_silent() {
    let owner = Owner::new();
    owner.set();
    let auth = signed_in("member");
    let api = FakeApi::me(Err(unauthorized()));

    block_on(check_session(auth, &api));

    auth.with_untracked(|state| {
        assert!(!state.is_authenticated());
        assert!(state.user().is_none());
        assert!(!state.is_loading());
        assert!(state.error().is_none());
    });
}

#[test]
fn check_session_without_payload_goes_anonymous() {
    let owner = Owner::new();
    owner.set();
    let auth = signed_in("member");
    let api = FakeApi::me(Ok(None));

    block_on(check_session(auth, &api));

    auth.with_untracked(|state| {
        assert!(!state.is_authenticated());
        assert!(state.error().is_none());
    });
}

#[test]
fn overlapping_checks_issue_one_request() {
    let owner = Owner::new();
    owner.set();
    let auth = RwSignal::new(AuthState::default());
    let api = FakeApi::me(Ok(Some(user("u1", "member"))));

    block_on(futures::future::join(check_session(auth, &api), check_session(auth, &api)));

    assert_eq!(api.me_calls.get(), 1);
    auth.with_untracked(|state| {
        assert!(state.is_authenticated());
        assert!(!state.is_loading());
    });
}

#[test]
fn logout_during_check_wins() {
    let owner = Owner::new();
    owner.set();
    let auth = RwSignal::new(AuthState::default());
    let api = FakeApi::me(Ok(Some(user("u1", "member"))));

    block_on(futures::future::join(check_session(auth, &api), logout(auth, &api))).1.unwrap();

    auth.with_untracked(|state| {
        assert!(!state.is_authenticated());
        assert!(state.user().is_none());
        assert!(!state.is_loading());
    });
}

// =============================================================
// login
// =============================================================

#[test]
fn login_success_authenticates() {
    let owner = Owner::new();
    owner.set();
    let auth = RwSignal::new(AuthState::default());

    assert!(block_on(login(auth, &FakeApi::default(), credentials())));

    auth.with_untracked(|state| {
        assert!(state.is_authenticated());
        assert!(!state.is_loading());
        assert!(state.error().is_none());
    });
}

#[test]
fn login_failure_populates_error() {
    let owner = Owner::new();
    owner.set();
    let auth = RwSignal::new(AuthState::default());
    let api = FakeApi { login_error: Some(unauthorized()), ..FakeApi::default() };

    assert!(!block_on(login(auth, &api, credentials())));

    auth.with_untracked(|state| {
        assert!(!state.is_authenticated());
        assert!(!state.is_loading());
        assert_eq!(state.error(), Some("Invalid username or password."));
    });
}

// =============================================================
// logout
// =============================================================

#[test]
fn logout_clears_session_when_remote_succeeds() {
    let owner = Owner::new();
    owner.set();
    let auth = signed_in("member");
    let api = FakeApi::default();

    block_on(logout(auth, &api)).unwrap();

    assert_eq!(api.logout_calls.get(), 1);
    auth.with_untracked(|state| {
        assert!(state.user().is_none());
        assert!(!state.is_authenticated());
    });
}

#[test]
fn logout_clears_session_when_remote_fails() {
    let owner = Owner::new();
    owner.set();
    let auth = signed_in("admin");
    let api = FakeApi { logout_fails: true, ..FakeApi::default() };

    let result = block_on(logout(auth, &api));

    assert_eq!(result, Err(ApiError::Transport("offline".to_owned())));
    auth.with_untracked(|state| {
        assert!(state.user().is_none());
        assert!(!state.is_authenticated());
        assert!(state.error().is_none());
    });
}

// =============================================================
// notify
// =============================================================

#[test]
fn notify_pushes_and_returns_id() {
    let owner = Owner::new();
    owner.set();
    let notifications = RwSignal::new(Notifications::default());

    let id = notify(notifications, Notification::new(NotificationKind::Info, "Signed out"));

    notifications.with_untracked(|list| {
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.items()[0].id, id);
    });
}

#[test]
fn logout_notice_is_short_lived_on_success() {
    let notice = logout_notice(&Ok(()));
    assert_eq!(notice.kind, NotificationKind::Info);
    assert_eq!(notice.duration_ms, Some(3_000));
}

#[test]
fn logout_notice_is_sticky_when_remote_fails() {
    let notice = logout_notice(&Err(ApiError::Transport("offline".to_owned())));
    assert_eq!(notice.kind, NotificationKind::Warning);
    assert_eq!(notice.duration_ms, None);
    assert!(notice.message.is_some());
}
