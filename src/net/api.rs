//! Typed StarQuest auth endpoints.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`; deciding which failures are
//! user-facing is left to the auth store, which absorbs session-probe
//! failures and surfaces login failures.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::future::Future;

use super::http::{ApiError, HttpClient, Method, Transport};
use super::types::{ApiEnvelope, LoginRequest, User};

pub const ME_PATH: &str = "/auth/me";
pub const LOGIN_PATH: &str = "/auth/login";
pub const LOGOUT_PATH: &str = "/auth/logout";

/// Remote operations the auth store depends on.
pub trait AuthApi {
    /// `GET /auth/me`. `Ok(None)` when the server answers without a user.
    fn current_user(&self) -> impl Future<Output = Result<Option<User>, ApiError>>;

    /// `POST /auth/login`.
    fn login(&self, credentials: &LoginRequest) -> impl Future<Output = Result<User, ApiError>>;

    /// `POST /auth/logout`. Any 2xx counts as success.
    fn logout(&self) -> impl Future<Output = Result<(), ApiError>>;
}

impl<T: Transport> AuthApi for HttpClient<T> {
    async fn current_user(&self) -> Result<Option<User>, ApiError> {
        let envelope: ApiEnvelope<User> = self.get_json(ME_PATH).await?;
        Ok(envelope.data)
    }

    async fn login(&self, credentials: &LoginRequest) -> Result<User, ApiError> {
        let envelope: ApiEnvelope<User> = self.post_json(LOGIN_PATH, credentials).await?;
        envelope
            .data
            .ok_or_else(|| ApiError::Decode(envelope.message.unwrap_or_else(|| missing_user_message(LOGIN_PATH))))
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.send(Method::Post, LOGOUT_PATH, None).await.map(|_| ())
    }
}

fn missing_user_message(path: &str) -> String {
    format!("{path} returned no user")
}
