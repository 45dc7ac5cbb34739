use std::sync::Arc;

use super::*;
use crate::net::types::RiskLevel;
use crate::testing::{assessment, block_on};

fn record_changes(backend: &MemoryBackend) -> (Subscription, Arc<Mutex<Vec<AuthChange>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let sub = backend.on_session_change(Arc::new(move |change: &AuthChange| {
        sink.lock().unwrap().push(change.clone());
    }));
    (sub, seen)
}

// =============================================================
// Sessions
// =============================================================

#[test]
fn sign_in_issues_session_and_notifies() {
    let backend = MemoryBackend::new();
    backend.add_user("Alice@Example.com", "hunter22");
    let (_sub, seen) = record_changes(&backend);

    let session = block_on(backend.sign_in("alice@example.com", "hunter22")).unwrap();
    assert_eq!(session.user.email, "alice@example.com");
    assert_eq!(block_on(backend.current_session()), Some(session.clone()));
    assert_eq!(*seen.lock().unwrap(), vec![AuthChange::SignedIn(session)]);
}

#[test]
fn sign_in_wrong_password_is_invalid_credentials() {
    let backend = MemoryBackend::new();
    backend.add_user("a@b.com", "right-pass");

    let err = block_on(backend.sign_in("a@b.com", "wrong-pass")).unwrap_err();
    assert_eq!(err.code, AuthErrorCode::InvalidCredentials);
    assert_eq!(block_on(backend.current_session()), None);
}

#[test]
fn sign_up_requires_verification_before_sign_in() {
    let backend = MemoryBackend::new();

    let outcome = block_on(backend.sign_up("new@b.com", "secret1")).unwrap();
    assert_eq!(outcome, SignUpOutcome::VerificationPending);
    assert_eq!(block_on(backend.current_session()), None);

    let err = block_on(backend.sign_in("new@b.com", "secret1")).unwrap_err();
    assert_eq!(err.code, AuthErrorCode::EmailNotConfirmed);

    assert!(backend.confirm_email("new@b.com"));
    assert!(block_on(backend.sign_in("new@b.com", "secret1")).is_ok());
}

#[test]
fn sign_up_with_auto_confirm_signs_in() {
    let backend = MemoryBackend::new();
    backend.set_auto_confirm(true);

    let outcome = block_on(backend.sign_up("auto@b.com", "secret1")).unwrap();
    let SignUpOutcome::Confirmed(session) = outcome else {
        panic!("expected confirmed sign-up");
    };
    assert_eq!(block_on(backend.current_session()), Some(session));
}

#[test]
fn sign_up_rejects_weak_password_and_existing_user() {
    let backend = MemoryBackend::new();
    backend.add_user("taken@b.com", "secret1");

    let weak = block_on(backend.sign_up("x@b.com", "123")).unwrap_err();
    assert_eq!(weak.code, AuthErrorCode::WeakPassword);

    let taken = block_on(backend.sign_up("taken@b.com", "secret1")).unwrap_err();
    assert_eq!(taken.code, AuthErrorCode::UserAlreadyExists);
}

#[test]
fn sign_out_without_session_is_noop() {
    let backend = MemoryBackend::new();
    let (_sub, seen) = record_changes(&backend);

    assert!(block_on(backend.sign_out()).is_ok());
    assert!(block_on(backend.sign_out()).is_ok());
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn sign_out_destroys_session_and_notifies() {
    let backend = MemoryBackend::new();
    backend.add_user("a@b.com", "secret1");
    block_on(backend.sign_in("a@b.com", "secret1")).unwrap();
    let (_sub, seen) = record_changes(&backend);

    block_on(backend.sign_out()).unwrap();
    assert_eq!(block_on(backend.current_session()), None);
    assert_eq!(*seen.lock().unwrap(), vec![AuthChange::SignedOut]);
}

#[test]
fn expired_session_is_refreshed_on_lookup() {
    let backend = MemoryBackend::new();
    backend.add_user("a@b.com", "secret1");
    let original = block_on(backend.sign_in("a@b.com", "secret1")).unwrap();
    let (_sub, seen) = record_changes(&backend);

    backend.advance_clock(DEFAULT_SESSION_TTL_SECS);
    let refreshed = block_on(backend.current_session()).unwrap();
    assert_ne!(refreshed.access_token, original.access_token);
    assert_eq!(refreshed.user, original.user);
    assert_eq!(*seen.lock().unwrap(), vec![AuthChange::TokenRefreshed(refreshed)]);
}

#[test]
fn expired_session_with_failed_refresh_is_destroyed() {
    let backend = MemoryBackend::new();
    backend.add_user("a@b.com", "secret1");
    block_on(backend.sign_in("a@b.com", "secret1")).unwrap();
    backend.set_refresh_failure(true);
    let (_sub, seen) = record_changes(&backend);

    backend.advance_clock(DEFAULT_SESSION_TTL_SECS * 2);
    assert_eq!(block_on(backend.current_session()), None);
    assert_eq!(*seen.lock().unwrap(), vec![AuthChange::SignedOut]);
}

// =============================================================
// Assessments
// =============================================================

#[test]
fn list_assessments_is_owner_scoped_and_newest_first() {
    let backend = MemoryBackend::new();
    let alice = backend.add_user("alice@b.com", "secret1");
    let bob = backend.add_user("bob@b.com", "secret1");
    backend.insert_assessment(assessment("a1", &alice.id, 10.0, RiskLevel::Low, "2024-01-01T00:00:00Z"));
    backend.insert_assessment(assessment("b1", &bob.id, 90.0, RiskLevel::High, "2024-05-01T00:00:00Z"));
    backend.insert_assessment(assessment("a2", &alice.id, 55.0, RiskLevel::Medium, "2024-04-01T00:00:00Z"));
    backend.insert_assessment(assessment("a3", &alice.id, 20.0, RiskLevel::Low, "2024-02-01T00:00:00Z"));

    let items = block_on(backend.list_assessments(&alice)).unwrap();
    assert!(items.iter().all(|a| a.user_id == alice.id));
    assert!(items.windows(2).all(|w| w[0].created_at > w[1].created_at));
    let ids: Vec<_> = items.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["a2", "a3", "a1"]);
}

#[test]
fn find_assessment_hides_other_owners_records() {
    let backend = MemoryBackend::new();
    let alice = backend.add_user("alice@b.com", "secret1");
    let bob = backend.add_user("bob@b.com", "secret1");
    backend.insert_assessment(assessment("b1", &bob.id, 90.0, RiskLevel::High, "2024-05-01T00:00:00Z"));

    assert_eq!(block_on(backend.find_assessment(&alice, "b1")).unwrap(), None);
    assert!(block_on(backend.find_assessment(&bob, "b1")).unwrap().is_some());
}

#[test]
fn fetch_failure_is_reported_and_counted() {
    let backend = MemoryBackend::new();
    let alice = backend.add_user("alice@b.com", "secret1");
    backend.set_fetch_failure(true);

    let err = block_on(backend.list_assessments(&alice)).unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
    assert_eq!(backend.fetch_calls(), 1);
}
