//! Route guards for protected subtrees.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both guards share `guarded`: derive a `GuardOutcome` from the auth
//! context and the current location, navigate for redirect outcomes, and
//! render children only for `Render`. Nothing protected is rendered while a
//! redirect is pending.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::config::ClientConfig;
use crate::state::auth::AuthState;
use crate::util::guard::{GuardKind, GuardOutcome, attempted_location, evaluate, redirect_target};

/// Render children for any authenticated user; otherwise redirect to login.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    guarded(GuardKind::Authenticated, children)
}

/// Render children for admins; members go to the dashboard, anonymous
/// visitors to login.
#[component]
pub fn AdminRoute(children: ChildrenFn) -> impl IntoView {
    guarded(GuardKind::Admin, children)
}

fn guarded(kind: GuardKind, children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let config = expect_context::<ClientConfig>();
    let location = use_location();
    let navigate = use_navigate();

    let outcome = Memo::new(move |_| {
        let attempted = attempted_location(&location.pathname.get(), &location.search.get());
        auth.with(|state| evaluate(state, kind, &attempted))
    });

    Effect::new(move || {
        if let Some(target) = redirect_target(&outcome.get(), &config) {
            navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    move || match outcome.get() {
        GuardOutcome::Render => children().into_any(),
        GuardOutcome::Loading => view! {
            <div class="route-loading" aria-busy="true">
                <span class="route-loading__spinner"></span>
                "Loading..."
            </div>
        }
        .into_any(),
        GuardOutcome::RedirectLogin { .. } | GuardOutcome::RedirectForbidden => ().into_any(),
    }
}
