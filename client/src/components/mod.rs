//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render shared page chrome (navigation, notifications, history
//! rows) while reading services and state from Leptos context providers.

pub mod assessment_list;
pub mod navbar;
pub mod toast_host;
