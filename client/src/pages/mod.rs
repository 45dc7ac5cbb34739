//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (gating, loading, submit flows)
//! and delegates rendering details to `components`.

pub mod account;
pub mod auth;
pub mod dashboard;
pub mod home;
pub mod info;
pub mod predict;
pub mod results;
