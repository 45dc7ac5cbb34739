//! Assessment-history state for the dashboard and account views.
//!
//! ERROR HANDLING
//! ==============
//! A failed fetch degrades to an empty history plus one error notice; it is
//! never retried automatically.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use time::OffsetDateTime;
use time::macros::format_description;

use crate::net::assessments::AssessmentRepository;
use crate::net::types::{Assessment, SessionUser};
use crate::state::toast::Notice;

pub const LOAD_FAILED: &str = "Failed to load your assessments. Please try again.";

/// Loaded history for one protected page.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryState {
    pub user: Option<SessionUser>,
    pub items: Vec<Assessment>,
    pub loading: bool,
}

impl Default for HistoryState {
    fn default() -> Self {
        Self { user: None, items: Vec::new(), loading: true }
    }
}

impl HistoryState {
    pub fn finish(&mut self, load: HistoryLoad) {
        self.user = Some(load.user);
        self.items = load.items;
        self.loading = false;
    }

    #[must_use]
    pub fn summary(&self) -> HistorySummary {
        HistorySummary::of(&self.items)
    }
}

/// Headline numbers shown above the history list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistorySummary {
    pub latest_score: String,
    pub latest_level: &'static str,
    pub total: usize,
}

impl HistorySummary {
    /// Summarize a newest-first list. Empty lists read `0%` and `low`.
    #[must_use]
    pub fn of(items: &[Assessment]) -> Self {
        let latest = items.first();
        Self {
            latest_score: format_score(latest.map_or(0.0, |a| a.risk_score)),
            latest_level: latest.map_or("low", |a| a.risk_level.lowercase()),
            total: items.len(),
        }
    }
}

/// Render a score as a percentage; whole numbers drop the decimal.
#[must_use]
pub fn format_score(score: f64) -> String {
    if score.fract().abs() < f64::EPSILON {
        format!("{score:.0}%")
    } else {
        format!("{score:.1}%")
    }
}

/// Render a timestamp as `MM/DD/YYYY`.
#[must_use]
pub fn format_date(ts: OffsetDateTime) -> String {
    ts.format(format_description!("[month]/[day]/[year]"))
        .unwrap_or_default()
}

/// Result of loading a user's history.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryLoad {
    pub user: SessionUser,
    pub items: Vec<Assessment>,
    pub notice: Option<Notice>,
}

/// Fetch the user's assessments, turning a failure into an empty list and a notice.
pub async fn load_history(repo: &dyn AssessmentRepository, user: SessionUser) -> HistoryLoad {
    match repo.list_assessments(&user).await {
        Ok(items) => HistoryLoad { user, items, notice: None },
        Err(err) => {
            #[cfg(feature = "hydrate")]
            log::warn!("assessment fetch failed: {err}");
            #[cfg(not(feature = "hydrate"))]
            let _ = err;
            HistoryLoad { user, items: Vec::new(), notice: Some(Notice::error("Error", LOAD_FAILED)) }
        }
    }
}
