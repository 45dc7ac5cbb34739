//! Session-store interface and the listener table shared by its backends.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views never reach for ambient auth state. They receive a `SessionStore`
//! through Leptos context, ask it for the current session, and subscribe to
//! change events for exactly as long as they are mounted.
//!
//! DESIGN
//! ======
//! Futures are `?Send` because browser fetches are single-threaded; the store
//! itself is `Send + Sync` so it can be provided as context.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use async_trait::async_trait;

use super::error::AuthError;
use super::types::{AuthChange, Session};

/// Callback invoked on every session change.
pub type Listener = Arc<dyn Fn(&AuthChange) + Send + Sync>;

/// Result of a successful sign-up request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// The account exists but cannot sign in until the email link is followed.
    VerificationPending,
    /// The backend auto-confirmed the account and issued a session.
    Confirmed(Session),
}

/// The authenticated-identity provider consumed by views.
#[async_trait(?Send)]
pub trait SessionStore: Send + Sync {
    /// Current session, refreshing it first if it has expired.
    async fn current_session(&self) -> Option<Session>;

    /// Register `listener` until the returned handle is dropped.
    fn on_session_change(&self, listener: Listener) -> Subscription;

    /// Password sign-in.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Password sign-up with email verification.
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError>;

    /// Destroy the current session. Succeeds when there is none.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

#[derive(Default)]
struct ListenerTable {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

fn lock(table: &Mutex<ListenerTable>) -> MutexGuard<'_, ListenerTable> {
    table.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Subscriber registry that session-store backends embed.
#[derive(Clone, Default)]
pub struct SessionEvents {
    table: Arc<Mutex<ListenerTable>>,
}

impl SessionEvents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: Listener) -> Subscription {
        let mut table = lock(&self.table);
        let id = table.next_id;
        table.next_id += 1;
        table.entries.push((id, listener));
        Subscription { table: Arc::downgrade(&self.table), id }
    }

    /// Deliver `change` to every registered listener.
    ///
    /// Listeners run after the table lock is released, so a listener may
    /// subscribe or unsubscribe without deadlocking.
    pub fn emit(&self, change: &AuthChange) {
        let listeners: Vec<Listener> = lock(&self.table)
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(change);
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        lock(&self.table).entries.len()
    }
}

/// Live registration of a session-change listener.
///
/// Dropping the handle removes the listener.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    table: Weak<Mutex<ListenerTable>>,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            lock(&table).entries.retain(|(id, _)| *id != self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
