//! Browser helpers and framework-free decision logic.

pub mod clock;
pub mod guard;
pub mod redirect;
pub mod session;
pub mod storage;
pub mod theme;
