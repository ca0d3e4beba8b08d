//! Client configuration resolved at build time.
//!
//! DESIGN
//! ======
//! One `ClientConfig` is the only source for API location, navigation
//! targets, and timing windows. API location and timing come from
//! `STARQUEST_*` variables captured by `option_env!` when the WASM bundle is
//! compiled; parsing goes through `from_lookup` so tests can feed a plain
//! map. Navigation targets are fixed route constants because the router
//! mounts them statically.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "/api";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_DASHBOARD_PATH: &str = "/";
pub const DEFAULT_ADMIN_PATH: &str = "/admin";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 10_000;
pub const DEFAULT_TOKEN_FRESHNESS_MS: u64 = 5_000;

/// Errors produced while resolving [`ClientConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A numeric variable did not parse.
    #[error("invalid value for {key}: {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    /// A variable was set but empty after trimming.
    #[error("{key} must not be blank")]
    Blank { key: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix joined with every API path, without a trailing slash.
    pub api_base_url: String,
    pub login_path: String,
    /// Default authenticated view; also the target for forbidden access.
    pub dashboard_path: String,
    pub request_timeout_ms: u32,
    pub token_freshness_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
            dashboard_path: DEFAULT_DASHBOARD_PATH.to_owned(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            token_freshness_ms: DEFAULT_TOKEN_FRESHNESS_MS,
        }
    }
}

impl ClientConfig {
    /// Build config from variables captured at compile time.
    ///
    /// Optional:
    /// - `STARQUEST_API_URL`: default `/api`
    /// - `STARQUEST_REQUEST_TIMEOUT_MS`: default 10000
    /// - `STARQUEST_TOKEN_FRESHNESS_MS`: default 5000
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but malformed.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            match key {
                "STARQUEST_API_URL" => option_env!("STARQUEST_API_URL"),
                "STARQUEST_REQUEST_TIMEOUT_MS" => option_env!("STARQUEST_REQUEST_TIMEOUT_MS"),
                "STARQUEST_TOKEN_FRESHNESS_MS" => option_env!("STARQUEST_TOKEN_FRESHNESS_MS"),
                _ => None,
            }
            .map(str::to_owned)
        })
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = match lookup("STARQUEST_API_URL") {
            Some(raw) => non_blank("STARQUEST_API_URL", &raw)?.trim_end_matches('/').to_owned(),
            None => DEFAULT_API_BASE_URL.to_owned(),
        };
        let request_timeout_ms = parse_number(
            "STARQUEST_REQUEST_TIMEOUT_MS",
            lookup("STARQUEST_REQUEST_TIMEOUT_MS"),
            DEFAULT_REQUEST_TIMEOUT_MS,
        )?;
        let token_freshness_ms = parse_number(
            "STARQUEST_TOKEN_FRESHNESS_MS",
            lookup("STARQUEST_TOKEN_FRESHNESS_MS"),
            DEFAULT_TOKEN_FRESHNESS_MS,
        )?;

        Ok(Self { api_base_url, request_timeout_ms, token_freshness_ms, ..Self::default() })
    }

    /// Join an API path (`/auth/me`) onto the configured base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

fn non_blank<'a>(key: &'static str, raw: &'a str) -> Result<&'a str, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Blank { key });
    }
    Ok(trimmed)
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
        None => Ok(default),
    }
}
