use leptos::prelude::*;

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found-page">
            <h1>"Page not found."</h1>
            <a href="/">"Back to dashboard"</a>
        </div>
    }
}
