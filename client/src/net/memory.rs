//! In-memory auth + assessment backend.
//!
//! Implements both service interfaces over process-local state, with knobs
//! for email confirmation, the session clock, and injected failures. The test
//! suite drives views' async logic against it.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::assessments::AssessmentRepository;
use super::error::{AuthError, AuthErrorCode, FetchError};
use super::session::{Listener, SessionEvents, SessionStore, SignUpOutcome, Subscription};
use super::types::{Assessment, AuthChange, Session, SessionUser, sort_newest_first};

pub const DEFAULT_SESSION_TTL_SECS: i64 = 3600;
pub const MIN_PASSWORD_LEN: usize = 6;

struct Account {
    user_id: String,
    password: String,
    confirmed: bool,
}

struct MemoryState {
    accounts: HashMap<String, Account>,
    session: Option<Session>,
    assessments: Vec<Assessment>,
    now: i64,
    session_ttl: i64,
    auto_confirm: bool,
    fail_fetch: bool,
    fail_refresh: bool,
    fetch_calls: usize,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            accounts: HashMap::new(),
            session: None,
            assessments: Vec::new(),
            now: 0,
            session_ttl: DEFAULT_SESSION_TTL_SECS,
            auto_confirm: false,
            fail_fetch: false,
            fail_refresh: false,
            fetch_calls: 0,
        }
    }
}

impl MemoryState {
    fn issue_session(&self, user: SessionUser) -> Session {
        Session {
            access_token: uuid::Uuid::new_v4().simple().to_string(),
            refresh_token: uuid::Uuid::new_v4().simple().to_string(),
            expires_at: self.now + self.session_ttl,
            user,
        }
    }
}

/// Process-local backend implementing [`SessionStore`] and [`AssessmentRepository`].
#[derive(Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
    events: SessionEvents,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register an already-confirmed account and return its user.
    pub fn add_user(&self, email: &str, password: &str) -> SessionUser {
        let email = normalize_email(email);
        let user_id = uuid::Uuid::new_v4().to_string();
        self.state().accounts.insert(
            email.clone(),
            Account { user_id: user_id.clone(), password: password.to_owned(), confirmed: true },
        );
        SessionUser { id: user_id, email }
    }

    /// Mark a pending account as verified. Returns false for unknown emails.
    pub fn confirm_email(&self, email: &str) -> bool {
        match self.state().accounts.get_mut(&normalize_email(email)) {
            Some(account) => {
                account.confirmed = true;
                true
            }
            None => false,
        }
    }

    pub fn insert_assessment(&self, assessment: Assessment) {
        self.state().assessments.push(assessment);
    }

    pub fn set_auto_confirm(&self, enabled: bool) {
        self.state().auto_confirm = enabled;
    }

    pub fn set_fetch_failure(&self, enabled: bool) {
        self.state().fail_fetch = enabled;
    }

    pub fn set_refresh_failure(&self, enabled: bool) {
        self.state().fail_refresh = enabled;
    }

    pub fn advance_clock(&self, secs: i64) {
        self.state().now += secs;
    }

    /// Number of assessment queries served so far, failed ones included.
    #[must_use]
    pub fn fetch_calls(&self) -> usize {
        self.state().fetch_calls
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.events.listener_count()
    }

    fn begin_fetch(&self) -> Result<MutexGuard<'_, MemoryState>, FetchError> {
        let mut state = self.state();
        state.fetch_calls += 1;
        if state.fail_fetch {
            return Err(FetchError::Transport("simulated outage".to_owned()));
        }
        Ok(state)
    }
}

#[async_trait(?Send)]
impl SessionStore for MemoryBackend {
    async fn current_session(&self) -> Option<Session> {
        let (session, change) = {
            let mut state = self.state();
            match state.session.clone() {
                Some(s) if s.is_expired(state.now) => {
                    if state.fail_refresh {
                        state.session = None;
                        (None, Some(AuthChange::SignedOut))
                    } else {
                        let refreshed = state.issue_session(s.user);
                        state.session = Some(refreshed.clone());
                        (Some(refreshed.clone()), Some(AuthChange::TokenRefreshed(refreshed)))
                    }
                }
                other => (other, None),
            }
        };
        if let Some(change) = change {
            self.events.emit(&change);
        }
        session
    }

    fn on_session_change(&self, listener: Listener) -> Subscription {
        self.events.subscribe(listener)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let session = {
            let mut state = self.state();
            let email = normalize_email(email);
            let user_id = match state.accounts.get(&email) {
                Some(account) if account.password == password => {
                    if !account.confirmed {
                        return Err(AuthError::new(AuthErrorCode::EmailNotConfirmed, "Email not confirmed"));
                    }
                    account.user_id.clone()
                }
                _ => return Err(AuthError::new(AuthErrorCode::InvalidCredentials, "Invalid login credentials")),
            };
            let session = state.issue_session(SessionUser { id: user_id, email });
            state.session = Some(session.clone());
            session
        };
        self.events.emit(&AuthChange::SignedIn(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError> {
        let outcome = {
            let mut state = self.state();
            let email = normalize_email(email);
            if password.chars().count() < MIN_PASSWORD_LEN {
                return Err(AuthError::new(
                    AuthErrorCode::WeakPassword,
                    format!("Password should be at least {MIN_PASSWORD_LEN} characters."),
                ));
            }
            if state.accounts.get(&email).is_some_and(|a| a.confirmed) {
                return Err(AuthError::new(AuthErrorCode::UserAlreadyExists, "User already registered"));
            }
            let user_id = uuid::Uuid::new_v4().to_string();
            let confirmed = state.auto_confirm;
            state.accounts.insert(
                email.clone(),
                Account { user_id: user_id.clone(), password: password.to_owned(), confirmed },
            );
            if confirmed {
                let session = state.issue_session(SessionUser { id: user_id, email });
                state.session = Some(session.clone());
                SignUpOutcome::Confirmed(session)
            } else {
                SignUpOutcome::VerificationPending
            }
        };
        if let SignUpOutcome::Confirmed(session) = &outcome {
            self.events.emit(&AuthChange::SignedIn(session.clone()));
        }
        Ok(outcome)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let had_session = self.state().session.take().is_some();
        if had_session {
            self.events.emit(&AuthChange::SignedOut);
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl AssessmentRepository for MemoryBackend {
    async fn list_assessments(&self, owner: &SessionUser) -> Result<Vec<Assessment>, FetchError> {
        let state = self.begin_fetch()?;
        let mut items: Vec<Assessment> = state
            .assessments
            .iter()
            .filter(|a| a.user_id == owner.id)
            .cloned()
            .collect();
        sort_newest_first(&mut items);
        Ok(items)
    }

    async fn find_assessment(&self, owner: &SessionUser, id: &str) -> Result<Option<Assessment>, FetchError> {
        let state = self.begin_fetch()?;
        Ok(state
            .assessments
            .iter()
            .find(|a| a.id == id && a.user_id == owner.id)
            .cloned())
    }
}
