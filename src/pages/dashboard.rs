//! Dashboard page, the authenticated landing route.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted under `ProtectedRoute`, so it only renders for an authenticated
//! session. Owns the sidebar and theme controls and the logout action.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::config::{ClientConfig, DEFAULT_ADMIN_PATH};
use crate::net::http::ApiClient;
use crate::state::auth::AuthState;
use crate::state::notifications::Notifications;
use crate::state::ui::{Theme, UiState};
use crate::util::storage::LocalStorage;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let notifications = expect_context::<RwSignal<Notifications>>();
    let config = expect_context::<ClientConfig>();
    let api = expect_context::<ApiClient>();
    let navigate = use_navigate();

    let display_name = move || {
        auth.with(|state| {
            state
                .user()
                .map(|user| if user.username.is_empty() { user.id.clone() } else { user.username.clone() })
                .unwrap_or_default()
        })
    };
    let role = move || auth.with(|state| state.user().map(|user| user.role.clone()).unwrap_or_default());

    let on_toggle_sidebar = move |_| {
        ui.update(UiState::toggle_sidebar);
        if let Err(e) = ui.with_untracked(|state| state.save_sidebar_mirror(&LocalStorage)) {
            log::warn!("failed to persist sidebar state: {e}");
        }
    };

    let on_theme = move |ev: leptos::ev::Event| {
        let theme = match event_target_value(&ev).as_str() {
            "light" => Theme::Light,
            "dark" => Theme::Dark,
            _ => Theme::System,
        };
        ui.update(|state| state.theme = theme);
    };

    let dashboard_path = config.dashboard_path.clone();
    let login_path = config.login_path.clone();
    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        {
            use crate::util::session;
            use leptos_router::NavigateOptions;

            let api = api.clone();
            let navigate = navigate.clone();
            let login_path = login_path.clone();
            leptos::task::spawn_local(async move {
                let remote = session::logout(auth, &api).await;
                notifications.update(Notifications::clear);
                session::notify(notifications, session::logout_notice(&remote));
                navigate(&login_path, NavigateOptions { replace: true, ..NavigateOptions::default() });
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&api, &navigate, &login_path, notifications);
        }
    };

    let theme_value = move || match ui.with(|state| state.theme) {
        Theme::Light => "light",
        Theme::Dark => "dark",
        Theme::System => "system",
    };

    view! {
        <div class="dashboard-page" class:dashboard-page--collapsed=move || !ui.with(|s| s.is_sidebar_open)>
            <header class="dashboard-page__header toolbar">
                <button class="btn toolbar__sidebar-toggle" on:click=on_toggle_sidebar title="Toggle sidebar">
                    "☰"
                </button>
                <span class="toolbar__title">"StarQuest"</span>
                <span class="toolbar__spacer"></span>
                <select class="toolbar__theme" prop:value=theme_value on:change=on_theme>
                    <option value="system">"System"</option>
                    <option value="light">"Light"</option>
                    <option value="dark">"Dark"</option>
                </select>
                <span class="toolbar__self">
                    {display_name}
                    " ("
                    <span class="toolbar__self-role">{role}</span>
                    ")"
                </span>
                <button class="btn toolbar__logout" on:click=on_logout title="Logout">
                    "Logout"
                </button>
            </header>
            <Show when=move || ui.with(|s| s.is_sidebar_open)>
                <nav class="dashboard-page__sidebar">
                    <a href=dashboard_path.clone()>"Dashboard"</a>
                    <Show when=move || auth.with(AuthState::is_admin)>
                        <a href=DEFAULT_ADMIN_PATH>"Admin"</a>
                    </Show>
                </nav>
            </Show>
            <main class="dashboard-page__content">
                <h1>"Welcome, " {display_name}</h1>
            </main>
        </div>
    }
}
