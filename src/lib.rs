//! # starquest
//!
//! Leptos + WASM client for StarQuest: the authenticated session, the HTTP
//! client that carries it, route guards, and the local UI chrome around
//! them.
//!
//! ARCHITECTURE
//! ============
//! - `net`: HTTP client with bearer-token attachment and the 401/403 policy.
//! - `state`: auth, UI, and notification stores shared through context.
//! - `util`: framework-free decisions (guards, redirects, storage, theme).
//! - `components`/`pages`: Leptos views built on the above.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install panic/log hooks and hydrate the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("logger already initialized: {e}").into());
    }
    leptos::mount::hydrate_body(app::App);
}
