//! Navigation in response to session events.
//!
//! SYSTEM CONTEXT
//! ==============
//! The HTTP client publishes `SessionEvent`s but never navigates. The shell
//! subscribes a `RedirectPolicy`, which maps each event to a configured
//! route and skips navigation when the browser is already there. Several
//! requests failing with `401` at once therefore cause one redirect.

#[cfg(test)]
#[path = "redirect_test.rs"]
mod redirect_test;

use leptos::prelude::*;

use crate::config::ClientConfig;
use crate::net::http::SessionEvent;
use crate::state::auth::AuthState;

/// Current-location access used by the redirect policy.
pub trait Location {
    fn pathname(&self) -> String;
    fn navigate(&self, path: &str);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectPolicy {
    login_path: String,
    dashboard_path: String,
}

impl RedirectPolicy {
    pub fn new(config: &ClientConfig) -> Self {
        Self { login_path: config.login_path.clone(), dashboard_path: config.dashboard_path.clone() }
    }

    pub fn target(&self, event: SessionEvent) -> &str {
        match event {
            SessionEvent::Expired => &self.login_path,
            SessionEvent::Forbidden => &self.dashboard_path,
        }
    }

    /// Navigate for `event` unless already on its target. Returns whether a
    /// navigation was issued.
    pub fn apply(&self, event: SessionEvent, location: &(impl Location + ?Sized)) -> bool {
        let target = self.target(event);
        if location.pathname() == target {
            return false;
        }
        log::info!("session event {event:?}: redirecting to {target}");
        location.navigate(target);
        true
    }
}

/// Shell subscriber for client session events.
///
/// `Expired` drops the in-memory session before navigating so guards stop
/// rendering protected content at once; `Forbidden` keeps the session.
/// Returns whether a navigation was issued.
pub fn on_session_event(
    auth: RwSignal<AuthState>,
    policy: &RedirectPolicy,
    location: &(impl Location + ?Sized),
    event: SessionEvent,
) -> bool {
    if event == SessionEvent::Expired && auth.try_update(AuthState::clear_session).is_none() {
        log::debug!("auth state disposed before session expiry was applied");
    }
    policy.apply(event, location)
}

/// `window.location` with full-page navigation.
///
/// A full load aborts whatever else the page was doing, which is what a
/// forced logout needs.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserLocation;

impl Location for BrowserLocation {
    fn pathname(&self) -> String {
        #[cfg(feature = "hydrate")]
        {
            web_sys::window()
                .and_then(|w| w.location().pathname().ok())
                .unwrap_or_default()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            String::new()
        }
    }

    fn navigate(&self, path: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.location().set_href(path) {
                    log::warn!("navigation to {path} failed: {e:?}");
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = path;
        }
    }
}
