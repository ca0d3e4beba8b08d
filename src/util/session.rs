//! Reactive session actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthState` transitions are synchronous; these helpers split the remote
//! operations around their await points so the shared `RwSignal` is never
//! borrowed across a suspension. Callers spawn them with `spawn_local`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::*;

use crate::net::api::AuthApi;
use crate::net::http::ApiError;
use crate::net::types::LoginRequest;
use crate::state::auth::{AuthState, login_error_message};
use crate::state::notifications::{Notification, NotificationKind, Notifications};

/// Reconcile the session with `/auth/me`. No-op while a check is running.
pub async fn check_session<A: AuthApi>(auth: RwSignal<AuthState>, api: &A) {
    let Some(check) = auth.try_update(AuthState::begin_session_check).flatten() else {
        return;
    };
    let outcome = api.current_user().await;
    auth.update(|state| {
        state.complete_session_check(check, outcome);
    });
}

/// Interactive login. Returns whether the session is now authenticated.
pub async fn login<A: AuthApi>(auth: RwSignal<AuthState>, api: &A, credentials: LoginRequest) -> bool {
    auth.update(AuthState::begin_login);
    match api.login(&credentials).await {
        Ok(user) => {
            auth.update(|state| state.login(user));
            true
        }
        Err(e) => {
            auth.update(|state| state.fail_login(login_error_message(&e)));
            false
        }
    }
}

/// Best-effort remote logout, then an unconditional local one.
///
/// # Errors
///
/// Returns the remote failure after the local session has been cleared.
pub async fn logout<A: AuthApi>(auth: RwSignal<AuthState>, api: &A) -> Result<(), ApiError> {
    let remote = api.logout().await;
    if let Err(e) = &remote {
        log::warn!("remote logout failed: {e}");
    }
    auth.update(AuthState::clear_session);
    remote
}

const SIGNED_OUT_TOAST_MS: u32 = 3_000;

/// Toast for a finished logout. A failed remote call stays until dismissed.
pub fn logout_notice(remote: &Result<(), ApiError>) -> Notification {
    match remote {
        Ok(()) => Notification::new(NotificationKind::Info, "Signed out").with_duration(SIGNED_OUT_TOAST_MS),
        Err(_) => Notification::new(NotificationKind::Warning, "Signed out on this device")
            .with_message("The server could not be reached. Your session may still be active elsewhere.")
            .sticky(),
    }
}

/// Show `notification` and schedule its removal.
pub fn notify(notifications: RwSignal<Notifications>, notification: Notification) -> String {
    let duration = notification.duration_ms;
    let id = notifications.try_update(|list| list.push(notification)).unwrap_or_default();

    #[cfg(feature = "hydrate")]
    if let Some(ms) = duration {
        let expired = id.clone();
        leptos::task::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(ms).await;
            if notifications.try_update(|list| list.dismiss(&expired)).is_none() {
                log::debug!("notification list disposed before {expired} expired");
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = duration;
    }

    id
}
