//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, `auth_form`, `history`, etc.) so each
//! page depends on small focused models whose transitions are testable
//! without a browser.

pub mod auth;
pub mod auth_form;
pub mod history;
pub mod questionnaire;
pub mod toast;
