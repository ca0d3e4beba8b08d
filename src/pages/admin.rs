//! Admin landing page. Mounted under `AdminRoute`.

use leptos::prelude::*;

use crate::state::auth::AuthState;

#[component]
pub fn AdminPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let admin_name = move || auth.with(|state| state.user().map(|user| user.username.clone()).unwrap_or_default());

    view! {
        <div class="admin-page">
            <header class="admin-page__header toolbar">
                <a class="btn" href="/">"← Dashboard"</a>
                <span class="toolbar__title">"Administration"</span>
            </header>
            <main class="admin-page__content">
                <p>"Signed in as " {admin_name}</p>
            </main>
        </div>
    }
}
