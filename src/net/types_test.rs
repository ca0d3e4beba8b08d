use super::*;

#[test]
fn user_accepts_numeric_id_and_keeps_extra_fields() {
    let user: User = serde_json::from_value(serde_json::json!({
        "id": 42,
        "role": "member",
        "username": "vega",
        "displayName": "Vega",
        "stars": 17
    }))
    .unwrap();

    assert_eq!(user.id, "42");
    assert_eq!(user.username, "vega");
    assert_eq!(user.profile.get("displayName"), Some(&serde_json::json!("Vega")));
    assert_eq!(user.profile.get("stars"), Some(&serde_json::json!(17)));
    assert!(!user.is_admin());
}

#[test]
fn user_serializes_profile_fields_back_at_top_level() {
    let user: User = serde_json::from_value(serde_json::json!({
        "id": "u-1",
        "role": "admin",
        "email": "ops@example.test"
    }))
    .unwrap();
    assert!(user.is_admin());

    let value = serde_json::to_value(&user).unwrap();
    assert_eq!(value["email"], "ops@example.test");
    assert_eq!(value["role"], "admin");
    assert_eq!(value["username"], "");
}

#[test]
fn envelope_tolerates_missing_data() {
    let env: ApiEnvelope<User> = serde_json::from_str(r#"{"status":"success"}"#).unwrap();
    assert_eq!(env.status.as_deref(), Some("success"));
    assert!(env.data.is_none());
}

#[test]
fn envelope_treats_null_data_as_absent() {
    let env: ApiEnvelope<User> = serde_json::from_str(r#"{"status":"success","data":null}"#).unwrap();
    assert!(env.data.is_none());
}
