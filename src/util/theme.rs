//! Theme application.
//!
//! Resolves a stored `Theme` against the system preference and writes the
//! result to the `data-theme` attribute of `<html>`. Requires a browser
//! environment.
//!
//! TRADE-OFFS
//! ==========
//! Theme application is best-effort browser-only behavior; SSR paths
//! no-op to keep server rendering deterministic.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use crate::state::ui::Theme;

/// Attribute value written for a resolved theme.
pub fn attribute_value(dark: bool) -> &'static str {
    if dark { "dark" } else { "light" }
}

/// Whether the OS reports a dark color-scheme preference.
pub fn system_prefers_dark() -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .map_or(false, |mq| mq.matches())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// Apply `theme` to the document root. Returns the attribute value used.
pub fn apply(theme: Theme) -> &'static str {
    let value = attribute_value(theme.is_dark(system_prefers_dark()));
    #[cfg(feature = "hydrate")]
    {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            if let Err(e) = el.set_attribute("data-theme", value) {
                log::warn!("failed to apply theme: {e:?}");
            }
        }
    }
    value
}
