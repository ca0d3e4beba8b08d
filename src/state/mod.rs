//! Client state models shared through Leptos context.

pub mod auth;
pub mod notifications;
pub mod ui;
