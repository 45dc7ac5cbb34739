//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Held by the navbar, which seeds it from one session lookup and then keeps
//! it current from session-change events.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::{AuthChange, Identity, Session};

/// Authentication state tracking the current identity and loading status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub identity: Identity,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { identity: Identity::Anonymous, loading: true }
    }
}

impl AuthState {
    /// Record the result of the initial session lookup.
    pub fn resolve(&mut self, session: Option<&Session>) {
        self.identity = Identity::from(session);
        self.loading = false;
    }

    /// Apply a session-change event.
    pub fn apply(&mut self, change: &AuthChange) {
        self.resolve(change.session());
    }
}
