//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` builds the shared client and state signals, wires persistence and
//! theme effects, and subscribes the redirect policy to session events.
//! Startup session reconciliation runs once after hydration.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::notification_list::NotificationList;
use crate::components::route_guard::{AdminRoute, ProtectedRoute};
use crate::config::ClientConfig;
use crate::net::http::ApiClient;
use crate::pages::{admin::AdminPage, dashboard::DashboardPage, login::LoginPage, not_found::NotFound};
use crate::state::{auth::AuthState, notifications::Notifications, ui::UiState};
use crate::util::redirect::{BrowserLocation, RedirectPolicy, on_session_event};
use crate::util::storage::LocalStorage;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides config, the API client, and all shared state contexts, then
/// sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env().unwrap_or_else(|e| {
        log::error!("invalid client configuration, using defaults: {e}");
        ClientConfig::default()
    });
    let api = ApiClient::browser(config.clone());

    let auth = RwSignal::new(AuthState::load(&LocalStorage));
    let ui = RwSignal::new(UiState::load(&LocalStorage));
    let notifications = RwSignal::new(Notifications::default());

    Effect::new(move || {
        if let Err(e) = auth.with(|state| state.save(&LocalStorage)) {
            log::warn!("failed to persist auth state: {e}");
        }
    });
    Effect::new(move || {
        if let Err(e) = ui.with(|state| state.save(&LocalStorage)) {
            log::warn!("failed to persist ui state: {e}");
        }
    });
    Effect::new(move || {
        crate::util::theme::apply(ui.with(|state| state.theme));
    });

    let policy = RedirectPolicy::new(&config);
    api.subscribe(move |event| {
        on_session_event(auth, &policy, &BrowserLocation, event);
    });

    provide_context(config);
    provide_context(api.clone());
    provide_context(auth);
    provide_context(ui);
    provide_context(notifications);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        crate::util::session::check_session(auth, &api).await;
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = api;
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/starquest.css"/>
        <Title text="StarQuest"/>

        <Router>
            <NotificationList/>
            <Routes fallback=|| view! { <NotFound/> }>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route
                    path=StaticSegment("")
                    view=|| view! { <ProtectedRoute><DashboardPage/></ProtectedRoute> }
                />
                <Route
                    path=StaticSegment("admin")
                    view=|| view! { <AdminRoute><AdminPage/></AdminRoute> }
                />
            </Routes>
        </Router>
    }
}
