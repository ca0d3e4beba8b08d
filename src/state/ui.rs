//! Local UI chrome state (sidebar, theme).
//!
//! DESIGN
//! ======
//! Keeps presentation preferences out of the auth session so either can be
//! reset without touching the other. Persisted under `starquest-ui`; the
//! sidebar flag is also written to `starquest-sidebar` on every toggle for
//! older shells that read only that key.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use serde::{Deserialize, Serialize};

use crate::util::storage::{SIDEBAR_KEY, Storage, StorageError, UI_KEY, load_json, save_json};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    /// Follow `prefers-color-scheme`.
    #[default]
    System,
}

impl Theme {
    /// Resolve to a concrete light/dark value.
    pub fn is_dark(self, system_prefers_dark: bool) -> bool {
        match self {
            Self::Light => false,
            Self::Dark => true,
            Self::System => system_prefers_dark,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub is_sidebar_open: bool,
    #[serde(default)]
    pub theme: Theme,
}

impl Default for UiState {
    fn default() -> Self {
        Self { is_sidebar_open: true, theme: Theme::System }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SidebarMirror {
    is_sidebar_open: bool,
}

impl UiState {
    /// Restore preferences, preferring the sidebar mirror when present.
    pub fn load(storage: &(impl Storage + ?Sized)) -> Self {
        let mut state = load_json::<Self>(storage, UI_KEY).unwrap_or_default();
        if let Some(mirror) = load_json::<SidebarMirror>(storage, SIDEBAR_KEY) {
            state.is_sidebar_open = mirror.is_sidebar_open;
        }
        state
    }

    /// # Errors
    ///
    /// Returns [`StorageError`] if the snapshot cannot be written.
    pub fn save(&self, storage: &(impl Storage + ?Sized)) -> Result<(), StorageError> {
        save_json(storage, UI_KEY, self)
    }

    pub fn toggle_sidebar(&mut self) {
        self.is_sidebar_open = !self.is_sidebar_open;
    }

    /// Write the sidebar mirror immediately.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the mirror cannot be written.
    pub fn save_sidebar_mirror(&self, storage: &(impl Storage + ?Sized)) -> Result<(), StorageError> {
        save_json(storage, SIDEBAR_KEY, &SidebarMirror { is_sidebar_open: self.is_sidebar_open })
    }
}
