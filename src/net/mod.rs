//! Network layer: HTTP client, auth endpoints, and wire types.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` owns token attachment and the 401/403 failure policy; `api` builds
//! the auth endpoints on top of it.

pub mod api;
pub mod cookie;
pub mod http;
pub mod token_cache;
pub mod types;
