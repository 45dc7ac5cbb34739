use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::net::types::SessionUser;

fn counting_listener(counter: &Arc<AtomicUsize>) -> Listener {
    let counter = Arc::clone(counter);
    Arc::new(move |_change: &AuthChange| {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn emit_reaches_every_listener() {
    let events = SessionEvents::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let _a = events.subscribe(counting_listener(&hits));
    let _b = events.subscribe(counting_listener(&hits));

    events.emit(&AuthChange::SignedOut);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[test]
fn dropping_subscription_removes_listener() {
    let events = SessionEvents::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let sub = events.subscribe(counting_listener(&hits));
    assert_eq!(events.listener_count(), 1);

    drop(sub);
    assert_eq!(events.listener_count(), 0);
    events.emit(&AuthChange::SignedOut);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn unsubscribe_only_removes_its_own_listener() {
    let events = SessionEvents::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let first = events.subscribe(counting_listener(&hits));
    let _second = events.subscribe(counting_listener(&hits));

    first.unsubscribe();
    assert_eq!(events.listener_count(), 1);
    events.emit(&AuthChange::SignedOut);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn subscription_outliving_events_is_harmless() {
    let events = SessionEvents::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let sub = events.subscribe(counting_listener(&hits));
    drop(events);
    drop(sub);
}

#[test]
fn listener_receives_session_payload() {
    let events = SessionEvents::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _sub = events.subscribe(Arc::new(move |change: &AuthChange| {
        sink.lock().unwrap().push(change.session().map(|s| s.user.email.clone()));
    }));

    let session = Session {
        access_token: "at".to_owned(),
        refresh_token: "rt".to_owned(),
        expires_at: 100,
        user: SessionUser { id: "u1".to_owned(), email: "a@b.com".to_owned() },
    };
    events.emit(&AuthChange::SignedIn(session));
    events.emit(&AuthChange::SignedOut);

    assert_eq!(*seen.lock().unwrap(), vec![Some("a@b.com".to_owned()), None]);
}
