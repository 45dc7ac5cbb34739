use super::*;
use crate::net::memory::MemoryBackend;
use crate::net::types::RiskLevel;
use crate::testing::{assessment, block_on};

#[test]
fn missing_id_reports_received_without_fetching() {
    let backend = MemoryBackend::new();
    let user = backend.add_user("ada@example.com", "secret1");
    let (view, notice) = block_on(load_result(&backend, &user, None));
    assert_eq!(view, ResultView::Received);
    assert!(notice.is_none());
    assert_eq!(backend.fetch_calls(), 0);
}

#[test]
fn blank_id_counts_as_missing() {
    let backend = MemoryBackend::new();
    let user = backend.add_user("ada@example.com", "secret1");
    let (view, _) = block_on(load_result(&backend, &user, Some("  ")));
    assert_eq!(view, ResultView::Received);
}

#[test]
fn owned_assessment_is_found() {
    let backend = MemoryBackend::new();
    let user = backend.add_user("ada@example.com", "secret1");
    let record = assessment("a1", &user.id, 41.5, RiskLevel::Medium, "2024-05-02T10:00:00Z");
    backend.insert_assessment(record.clone());
    let (view, notice) = block_on(load_result(&backend, &user, Some("a1")));
    assert_eq!(view, ResultView::Found(record));
    assert!(notice.is_none());
}

#[test]
fn another_users_assessment_reads_as_not_found() {
    let backend = MemoryBackend::new();
    let owner = backend.add_user("owner@example.com", "secret1");
    let other = backend.add_user("other@example.com", "secret1");
    backend.insert_assessment(assessment("a1", &owner.id, 10.0, RiskLevel::Low, "2024-05-02T10:00:00Z"));
    let (view, notice) = block_on(load_result(&backend, &other, Some("a1")));
    assert_eq!(view, ResultView::NotFound);
    assert!(notice.is_none());
}

#[test]
fn fetch_failure_shows_not_found_with_error_notice() {
    let backend = MemoryBackend::new();
    let user = backend.add_user("ada@example.com", "secret1");
    backend.set_fetch_failure(true);
    let (view, notice) = block_on(load_result(&backend, &user, Some("a1")));
    assert_eq!(view, ResultView::NotFound);
    let notice = notice.expect("failure notice");
    assert!(notice.is_error());
    assert_eq!(notice.description, LOAD_FAILED);
}

#[test]
fn reply_for_a_previous_id_is_not_current() {
    assert!(is_current_request(Some("a1"), Some("a1")));
    assert!(!is_current_request(Some("a1"), Some("a2")));
    assert!(!is_current_request(Some("a1"), None));
    assert!(!is_current_request(None, Some("a2")));
}

#[test]
fn blank_ids_compare_as_missing() {
    assert!(is_current_request(None, Some("  ")));
    assert!(is_current_request(Some(" a1 "), Some("a1")));
}
