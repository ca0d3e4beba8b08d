//! Login page with username/password sign-in.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guards send unauthenticated visitors here with `?from=<location>`. After
//! a successful login the page returns there, or to the dashboard when the
//! recorded location is missing or not a local path.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::config::ClientConfig;
use crate::net::http::ApiClient;
use crate::net::types::LoginRequest;
use crate::state::auth::AuthState;
use crate::util::guard::{RETURN_TO_PARAM, post_login_target};

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let config = expect_context::<ClientConfig>();
    let api = expect_context::<ApiClient>();
    let query = use_query_map();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());

    let return_to = Memo::new(move |_| {
        let from = query.with(|q| q.get(RETURN_TO_PARAM));
        post_login_target(from.as_deref(), &config)
    });

    // Already signed in (restored session): skip the form.
    Effect::new(move || {
        let state = auth.get();
        if !state.is_loading() && state.is_authenticated() {
            navigate(&return_to.get(), NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let busy = move || auth.with(AuthState::is_loading);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy() {
            return;
        }
        let username_value = username.get().trim().to_owned();
        let password_value = password.get();
        if username_value.is_empty() || password_value.is_empty() {
            info.set("Enter both username and password.".to_owned());
            return;
        }
        info.set(String::new());
        auth.update(AuthState::clear_error);

        #[cfg(feature = "hydrate")]
        {
            let api = api.clone();
            let credentials = LoginRequest { username: username_value, password: password_value };
            leptos::task::spawn_local(async move {
                if crate::util::session::login(auth, &api, credentials).await {
                    password.set(String::new());
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&api, LoginRequest { username: username_value, password: password_value });
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"StarQuest"</h1>
                <p class="login-card__subtitle">"Sign in to continue"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=busy>
                        {move || if busy() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <Show when=move || auth.with(|s| s.error().is_some())>
                    <p class="login-message login-message--error">
                        {move || auth.with(|s| s.error().unwrap_or_default().to_owned())}
                    </p>
                </Show>
            </div>
        </div>
    }
}
