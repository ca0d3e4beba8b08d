//! Session cookie access.
//!
//! Parsing and building go through the `cookie` crate on a raw header
//! string so they run natively in tests. `BrowserCookies` reads and clears
//! `document.cookie` in the browser and is inert during SSR.

#[cfg(test)]
#[path = "cookie_test.rs"]
mod cookie_test;

use cookie::Cookie;
use time::OffsetDateTime;

use super::http::ApiError;

/// Name of the cookie carrying the bearer credential.
pub const TOKEN_COOKIE: &str = "jwt";

/// Source of the current cookie header.
pub trait CookieSource {
    /// Return the raw `name=value; other=value` cookie string.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Credential`] if the browser refuses access.
    fn read(&self) -> Result<String, ApiError>;

    /// Expire the cookie `name` at path `/`.
    fn clear(&self, name: &str);
}

/// Extract the value of cookie `name` from a cookie header.
///
/// Malformed pairs are skipped; empty values count as absent.
pub fn parse_cookie(header: &str, name: &str) -> Option<String> {
    Cookie::split_parse(header)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_owned())
        .filter(|value| !value.is_empty())
}

/// Cookie assignment that deletes `name` by giving it an expiry in the past.
pub fn expired_cookie(name: &str) -> String {
    Cookie::build((name, ""))
        .path("/")
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
        .to_string()
}

/// `document.cookie` backed source.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserCookies;

impl CookieSource for BrowserCookies {
    fn read(&self) -> Result<String, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;

            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or_else(|| ApiError::Credential("no document".to_owned()))?;
            let html = document
                .dyn_into::<web_sys::HtmlDocument>()
                .map_err(|_| ApiError::Credential("document is not an HTML document".to_owned()))?;
            html.cookie()
                .map_err(|e| ApiError::Credential(format!("cookie read failed: {e:?}")))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Ok(String::new())
        }
    }

    fn clear(&self, name: &str) {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;

            let Some(html) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok())
            else {
                return;
            };
            if let Err(e) = html.set_cookie(&expired_cookie(name)) {
                log::warn!("failed to clear cookie {name}: {e:?}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = name;
        }
    }
}
