//! Wire DTOs shared with the StarQuest API.
//!
//! DESIGN
//! ======
//! The API wraps payloads in a `{ status, data }` envelope. `User` keeps the
//! fields the session logic reads as typed members and carries every other
//! profile field through a flattened map so a reload never drops data.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Role string granting access to admin-only routes.
pub const ADMIN_ROLE: &str = "admin";

/// An authenticated user as returned by `/auth/me` and `/auth/login`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier. Accepts numeric or string ids.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Authorization role (`"admin"`, `"member"`, ...).
    pub role: String,
    /// Login name.
    #[serde(default)]
    pub username: String,
    /// Remaining profile fields, preserved verbatim.
    #[serde(flatten)]
    pub profile: serde_json::Map<String, serde_json::Value>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Standard `{ status, data }` response envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: Option<String>,
    pub data: Option<T>,
    pub message: Option<String>,
}

/// Body for `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(n) => n.to_string(),
    })
}
