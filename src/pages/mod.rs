//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Access control lives in the route guards, not here.

pub mod admin;
pub mod dashboard;
pub mod login;
pub mod not_found;
