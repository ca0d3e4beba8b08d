//! Toast stack rendered above every route.

use leptos::prelude::*;

use crate::state::notifications::{Notification, Notifications};

#[component]
pub fn NotificationList() -> impl IntoView {
    let notifications = expect_context::<RwSignal<Notifications>>();

    view! {
        <div class="toast-stack" role="status" aria-live="polite">
            {move || {
                notifications
                    .with(|list| list.items().to_vec())
                    .into_iter()
                    .map(|notification| toast(notification, notifications))
                    .collect_view()
            }}
        </div>
    }
}

fn toast(notification: Notification, notifications: RwSignal<Notifications>) -> impl IntoView {
    let Notification { id, kind, title, message, .. } = notification;

    view! {
        <div class=kind.css_class()>
            <div class="toast__body">
                <strong class="toast__title">{title}</strong>
                {message.map(|m| view! { <p class="toast__message">{m}</p> })}
            </div>
            <button
                class="toast__close"
                aria-label="Dismiss"
                on:click=move |_| {
                    notifications.update(|list| {
                        list.dismiss(&id);
                    });
                }
            >
                "×"
            </button>
        </div>
    }
}
