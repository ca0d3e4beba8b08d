use super::*;

#[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
struct Prefs {
    open: bool,
    name: String,
}

#[test]
fn memory_storage_set_get_remove() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get("k"), None);
    storage.set("k", "v").unwrap();
    assert_eq!(storage.get("k").as_deref(), Some("v"));
    storage.remove("k");
    assert_eq!(storage.get("k"), None);
}

#[test]
fn save_then_load_json_reproduces_value() {
    let storage = MemoryStorage::new();
    let prefs = Prefs { open: true, name: "nova".to_owned() };
    save_json(&storage, UI_KEY, &prefs).unwrap();
    assert_eq!(load_json::<Prefs>(&storage, UI_KEY), Some(prefs));
}

#[test]
fn load_json_treats_corrupt_payload_as_absent() {
    let storage = MemoryStorage::new();
    storage.set(AUTH_KEY, "{not json").unwrap();
    assert_eq!(load_json::<Prefs>(&storage, AUTH_KEY), None);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn local_storage_is_unavailable_outside_browser() {
    assert_eq!(LocalStorage.get(AUTH_KEY), None);
    assert!(matches!(LocalStorage.set(AUTH_KEY, "{}"), Err(StorageError::Unavailable)));
    LocalStorage.remove(AUTH_KEY);
}
