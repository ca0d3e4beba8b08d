use super::*;
use crate::util::storage::MemoryStorage;

#[test]
fn ui_state_default_sidebar_open_and_system_theme() {
    let state = UiState::default();
    assert!(state.is_sidebar_open);
    assert_eq!(state.theme, Theme::System);
}

#[test]
fn theme_resolves_against_system_preference() {
    assert!(!Theme::Light.is_dark(true));
    assert!(Theme::Dark.is_dark(false));
    assert!(Theme::System.is_dark(true));
    assert!(!Theme::System.is_dark(false));
}

#[test]
fn ui_state_serializes_with_camel_case_keys() {
    let state = UiState { is_sidebar_open: false, theme: Theme::Dark };
    let value = serde_json::to_value(&state).unwrap();
    assert_eq!(value, serde_json::json!({"isSidebarOpen": false, "theme": "dark"}));
}

#[test]
fn load_without_snapshot_uses_defaults() {
    let storage = MemoryStorage::new();
    assert_eq!(UiState::load(&storage), UiState::default());
}

#[test]
fn save_then_load_round_trips() {
    let storage = MemoryStorage::new();
    let state = UiState { is_sidebar_open: false, theme: Theme::Light };
    state.save(&storage).unwrap();
    assert_eq!(UiState::load(&storage), state);
}

#[test]
fn sidebar_mirror_wins_over_ui_snapshot() {
    let storage = MemoryStorage::new();
    let mut state = UiState::default();
    state.save(&storage).unwrap();

    state.toggle_sidebar();
    state.save_sidebar_mirror(&storage).unwrap();

    let restored = UiState::load(&storage);
    assert!(!restored.is_sidebar_open);
    assert_eq!(
        storage.get(SIDEBAR_KEY).as_deref(),
        Some(r#"{"isSidebarOpen":false}"#)
    );
}
