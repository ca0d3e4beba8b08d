//! Short-lived cache of the bearer credential.
//!
//! Reading `document.cookie` on every request is wasteful, so the parsed
//! token is kept for a freshness window. Outside the window the cookie is
//! always re-read; a cached "no token" is subject to the same rule.

#[cfg(test)]
#[path = "token_cache_test.rs"]
mod token_cache_test;

use super::cookie::{TOKEN_COOKIE, parse_cookie};
use crate::config::DEFAULT_TOKEN_FRESHNESS_MS;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenCache {
    value: Option<String>,
    /// Capture instant in epoch ms; zero means never captured.
    captured_at_ms: u64,
    freshness_ms: u64,
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_FRESHNESS_MS)
    }
}

impl TokenCache {
    pub fn new(freshness_ms: u64) -> Self {
        Self { value: None, captured_at_ms: 0, freshness_ms }
    }

    /// Return the credential, re-reading the cookie only when the cached
    /// capture is older than the freshness window.
    ///
    /// # Errors
    ///
    /// Propagates the error of `read_cookie`; the cache is left unchanged.
    pub fn get_token<E, F>(&mut self, now_ms: u64, read_cookie: F) -> Result<Option<String>, E>
    where
        F: FnOnce() -> Result<String, E>,
    {
        if self.is_fresh(now_ms) {
            return Ok(self.value.clone());
        }
        let header = read_cookie()?;
        self.value = parse_cookie(&header, TOKEN_COOKIE);
        self.captured_at_ms = now_ms;
        Ok(self.value.clone())
    }

    /// Forget the cached credential so the next lookup reads the cookie.
    pub fn reset(&mut self) {
        self.value = None;
        self.captured_at_ms = 0;
    }

    fn is_fresh(&self, now_ms: u64) -> bool {
        self.captured_at_ms != 0 && now_ms.saturating_sub(self.captured_at_ms) < self.freshness_ms
    }
}
