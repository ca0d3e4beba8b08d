//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read by route guards and user-aware components; mutated only through
//! the named transitions below. One `AuthState` exists per client, provided
//! as an `RwSignal` context by the application shell. Remote operations
//! live in `util::session` and drive these transitions around their awaits.
//!
//! States: anonymous (no user), authenticating (`is_loading`),
//! authenticated (user set), errored (`error` set, not authenticated).
//!
//! FENCING
//! =======
//! Every transition that replaces the session bumps `generation`. A session
//! check carries the generation it started under, and its completion is
//! dropped if the session moved on in the meantime (logout, login, 401).
//!
//! PERSISTENCE
//! ===========
//! Only `{user, isAuthenticated}` survive a reload. A restored
//! `isAuthenticated = true` is optimistic until
//! `util::session::check_session` reconciles it with the server.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use serde::{Deserialize, Serialize};

use crate::net::http::ApiError;
use crate::net::types::User;
use crate::util::storage::{AUTH_KEY, Storage, StorageError, load_json, save_json};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    user: Option<User>,
    is_authenticated: bool,
    is_loading: bool,
    error: Option<String>,
    generation: u64,
}

/// Persisted subset of [`AuthState`], stored as `{user, isAuthenticated}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedAuth {
    pub user: Option<User>,
    #[serde(default)]
    pub is_authenticated: bool,
}

/// Ticket for one in-flight session check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionCheck {
    generation: u64,
}

/// User-facing message for a failed login attempt.
pub fn login_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Status { status: 400 | 401, .. } => "Invalid username or password.".to_owned(),
        ApiError::Status { status: 429, .. } => "Too many attempts. Try again later.".to_owned(),
        ApiError::Status { message, .. } | ApiError::Decode(message) => message.clone(),
        ApiError::Timeout { .. } | ApiError::Transport(_) => "Unable to reach the server.".to_owned(),
        ApiError::Credential(_) => "Unable to read session cookie.".to_owned(),
    }
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    // =========================================================================
    // TRANSITIONS
    // =========================================================================

    /// Replace the user; authentication follows presence.
    pub fn set_user(&mut self, user: Option<User>) {
        self.supersede();
        self.is_authenticated = user.is_some();
        self.user = user;
        self.error = None;
    }

    /// Enter the authenticated state with a server-validated user.
    pub fn login(&mut self, user: User) {
        self.set_user(Some(user));
    }

    /// Mark an interactive login attempt as in progress.
    pub fn begin_login(&mut self) {
        self.supersede();
        self.is_loading = true;
        self.error = None;
    }

    /// Record a user-facing login failure.
    pub fn fail_login(&mut self, message: impl Into<String>) {
        self.supersede();
        self.user = None;
        self.is_authenticated = false;
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Drop the session locally.
    pub fn clear_session(&mut self) {
        self.supersede();
        self.user = None;
        self.is_authenticated = false;
        self.error = None;
    }

    /// Start a session check unless one is already running.
    ///
    /// Returns `None` while `is_loading` is set.
    pub fn begin_session_check(&mut self) -> Option<SessionCheck> {
        if self.is_loading {
            return None;
        }
        self.generation += 1;
        self.is_loading = true;
        Some(SessionCheck { generation: self.generation })
    }

    /// Apply the result of a session check.
    ///
    /// A user payload authenticates; an empty payload or any failure leaves
    /// the session anonymous without populating `error`. Returns `false` if
    /// the check was superseded and its result ignored.
    pub fn complete_session_check(&mut self, check: SessionCheck, outcome: Result<Option<User>, ApiError>) -> bool {
        if check.generation != self.generation {
            log::debug!(
                "ignoring stale session check (generation {} < {})",
                check.generation,
                self.generation
            );
            return false;
        }
        self.is_loading = false;
        match outcome {
            Ok(Some(user)) => {
                self.user = Some(user);
                self.is_authenticated = true;
                self.error = None;
            }
            Ok(None) => {
                self.user = None;
                self.is_authenticated = false;
            }
            Err(e) => {
                log::debug!("session check failed: {e}");
                self.user = None;
                self.is_authenticated = false;
            }
        }
        true
    }

    /// Invalidate any in-flight check and settle loading.
    fn supersede(&mut self) {
        self.generation += 1;
        self.is_loading = false;
    }

    // =========================================================================
    // PERSISTENCE
    // =========================================================================

    pub fn snapshot(&self) -> PersistedAuth {
        PersistedAuth { user: self.user.clone(), is_authenticated: self.is_authenticated }
    }

    /// Rebuild state from a snapshot; transient fields start fresh.
    ///
    /// A snapshot whose flag disagrees with its user is discarded.
    pub fn from_snapshot(snapshot: PersistedAuth) -> Self {
        if snapshot.is_authenticated != snapshot.user.is_some() {
            log::warn!("discarding inconsistent persisted auth snapshot");
            return Self::default();
        }
        Self { user: snapshot.user, is_authenticated: snapshot.is_authenticated, ..Self::default() }
    }

    /// Restore from `starquest-auth`, or start anonymous.
    pub fn load(storage: &(impl Storage + ?Sized)) -> Self {
        load_json::<PersistedAuth>(storage, AUTH_KEY).map_or_else(Self::default, Self::from_snapshot)
    }

    /// Write the persisted subset to `starquest-auth`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the snapshot cannot be written.
    pub fn save(&self, storage: &(impl Storage + ?Sized)) -> Result<(), StorageError> {
        save_json(storage, AUTH_KEY, &self.snapshot())
    }
}
