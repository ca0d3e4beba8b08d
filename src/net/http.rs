//! HTTP client with session-aware request and response policies.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every API call goes through `HttpClient::send`. Before sending it
//! attaches the bearer credential from the token cache. After a non-2xx
//! response it applies the session policy:
//!
//! - `401`: drop the persisted auth snapshot, expire the `jwt` cookie,
//!   reset the token cache, emit `SessionEvent::Expired`.
//! - `403`: emit `SessionEvent::Forbidden`.
//!
//! The status error is always returned to the caller afterwards. The
//! client never navigates; the application shell subscribes to
//! `SessionEvent`s and owns the redirect.
//!
//! Network I/O sits behind `Transport` so the policy runs natively in tests.
//! `BrowserTransport` is the `gloo-net` implementation used after hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::cookie::{BrowserCookies, CookieSource, TOKEN_COOKIE};
use super::token_cache::TokenCache;
use crate::config::ClientConfig;
use crate::util::clock::{Clock, SystemClock};
use crate::util::storage::{AUTH_KEY, LocalStorage, Storage};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by API calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// No response arrived within the configured timeout.
    #[error("request timed out after {after_ms} ms")]
    Timeout { after_ms: u32 },

    /// The server answered with a non-success status.
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The credential could not be read from the cookie store.
    #[error("credential unavailable: {0}")]
    Credential(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }
}

// =============================================================================
// REQUEST / RESPONSE
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// A fully prepared outbound request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response as seen by the policy layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Convert a failed response into [`ApiError::Status`], preferring the
    /// server's `message`/`error` field over the raw body.
    pub fn into_error(self) -> ApiError {
        let message = serde_json::from_str::<serde_json::Value>(&self.body)
            .ok()
            .and_then(|body| {
                body.get("message")
                    .or_else(|| body.get("error"))
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_owned)
            })
            .unwrap_or_else(|| status_fallback_message(self.status));
        ApiError::Status { status: self.status, message }
    }
}

fn status_fallback_message(status: u16) -> String {
    match status {
        401 => "session expired".to_owned(),
        403 => "insufficient privileges".to_owned(),
        other => format!("HTTP {other}"),
    }
}

/// Sends prepared requests over the network.
pub trait Transport {
    /// Send `request`, giving up after `timeout_ms`.
    fn send(&self, request: ApiRequest, timeout_ms: u32) -> impl Future<Output = Result<ApiResponse, ApiError>>;
}

// =============================================================================
// SESSION EVENTS
// =============================================================================

/// Session-level outcome of a failed request, published to subscribers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// `401`: the credential is missing or no longer valid.
    Expired,
    /// `403`: authenticated but not allowed.
    Forbidden,
}

pub type SessionListener = Arc<dyn Fn(SessionEvent) + Send + Sync>;

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone)]
pub struct HttpClient<T> {
    transport: T,
    config: ClientConfig,
    tokens: Arc<Mutex<TokenCache>>,
    cookies: Arc<dyn CookieSource + Send + Sync>,
    storage: Arc<dyn Storage + Send + Sync>,
    clock: Arc<dyn Clock + Send + Sync>,
    listeners: Arc<Mutex<Vec<SessionListener>>>,
}

/// Client wired to the browser: `gloo-net`, `document.cookie`, `localStorage`.
pub type ApiClient = HttpClient<BrowserTransport>;

impl ApiClient {
    pub fn browser(config: ClientConfig) -> Self {
        HttpClient::new(BrowserTransport, config)
    }
}

impl<T: Transport> HttpClient<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        let tokens = TokenCache::new(config.token_freshness_ms);
        Self {
            transport,
            config,
            tokens: Arc::new(Mutex::new(tokens)),
            cookies: Arc::new(BrowserCookies),
            storage: Arc::new(LocalStorage),
            clock: Arc::new(SystemClock),
            listeners: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn with_cookies(mut self, cookies: Arc<dyn CookieSource + Send + Sync>) -> Self {
        self.cookies = cookies;
        self
    }

    #[must_use]
    pub fn with_storage(mut self, storage: Arc<dyn Storage + Send + Sync>) -> Self {
        self.storage = storage;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Register a listener for session events. Listeners live as long as
    /// the client.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(SessionEvent) + Send + Sync + 'static,
    {
        lock(&self.listeners).push(Arc::new(listener));
    }

    /// Send a request and apply the session policy to failures.
    ///
    /// # Errors
    ///
    /// Returns the transport error, or [`ApiError::Status`] for any non-2xx
    /// response after its side effects have run.
    pub async fn send(&self, method: Method, path: &str, body: Option<String>) -> Result<ApiResponse, ApiError> {
        let request = self.prepare(method, path, body)?;
        let response = self.transport.send(request, self.config.request_timeout_ms).await?;
        if response.is_success() {
            return Ok(response);
        }
        let status = response.status;
        let error = response.into_error();
        self.apply_failure_policy(status);
        Err(error)
    }

    /// `GET` and decode a JSON body.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::send`]; also [`ApiError::Decode`].
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.send(Method::Get, path, None).await?.json()
    }

    /// `POST` a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::send`]; also [`ApiError::Decode`].
    pub async fn post_json<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        let raw = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send(Method::Post, path, Some(raw)).await?.json()
    }

    /// Request policy: resolve URL and attach the bearer credential.
    fn prepare(&self, method: Method, path: &str, body: Option<String>) -> Result<ApiRequest, ApiError> {
        let now = self.clock.now_ms();
        let token = lock(&self.tokens).get_token(now, || self.cookies.read())?;

        let mut headers = vec![("Accept".to_owned(), "application/json".to_owned())];
        if body.is_some() {
            headers.push(("Content-Type".to_owned(), "application/json".to_owned()));
        }
        if let Some(token) = token {
            headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
        }

        Ok(ApiRequest { method, url: self.config.endpoint(path), headers, body })
    }

    fn apply_failure_policy(&self, status: u16) {
        match status {
            401 => {
                log::info!("session rejected by server; clearing local session");
                self.clear_local_session();
                self.emit(SessionEvent::Expired);
            }
            403 => {
                log::info!("request forbidden for current session");
                self.emit(SessionEvent::Forbidden);
            }
            _ => {}
        }
    }

    /// Remove every locally stored trace of the session.
    pub fn clear_local_session(&self) {
        self.storage.remove(AUTH_KEY);
        self.cookies.clear(TOKEN_COOKIE);
        lock(&self.tokens).reset();
    }

    fn emit(&self, event: SessionEvent) {
        // Snapshot so listeners may subscribe or send without deadlocking.
        let listeners = lock(&self.listeners).clone();
        for listener in listeners {
            listener(event);
        }
    }
}

fn lock<V>(mutex: &Mutex<V>) -> std::sync::MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// BROWSER TRANSPORT
// =============================================================================

/// `gloo-net` transport; errors on the server.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

impl Transport for BrowserTransport {
    async fn send(&self, request: ApiRequest, timeout_ms: u32) -> Result<ApiResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use futures::future::{Either, select};
            use gloo_net::http::{Method as GlooMethod, RequestBuilder};

            let method = match request.method {
                Method::Get => GlooMethod::GET,
                Method::Post => GlooMethod::POST,
                Method::Put => GlooMethod::PUT,
                Method::Patch => GlooMethod::PATCH,
                Method::Delete => GlooMethod::DELETE,
            };
            let mut builder = RequestBuilder::new(&request.url)
                .method(method)
                .credentials(web_sys::RequestCredentials::Include);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let outbound = match request.body {
                Some(body) => builder.body(body),
                None => builder.build(),
            }
            .map_err(|e| ApiError::Transport(e.to_string()))?;

            let pending = Box::pin(outbound.send());
            let timer = Box::pin(gloo_timers::future::TimeoutFuture::new(timeout_ms));
            let response = match select(pending, timer).await {
                Either::Left((result, _)) => result.map_err(|e| ApiError::Transport(e.to_string()))?,
                Either::Right(((), _)) => return Err(ApiError::Timeout { after_ms: timeout_ms }),
            };
            let status = response.status();
            let body = response.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
            Ok(ApiResponse { status, body })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (request, timeout_ms);
            Err(ApiError::Transport("not available on server".to_owned()))
        }
    }
}
