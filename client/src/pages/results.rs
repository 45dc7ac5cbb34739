//! Single-assessment results page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reached from a history row (`/results?id=...`) or from the questionnaire
//! submit, which carries no id yet. Lookups are scoped to the signed-in user
//! so another account's record reads as not found.

#[cfg(test)]
#[path = "results_test.rs"]
mod results_test;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::navbar::Navbar;
use crate::components::toast_host::notify;
use crate::net::Services;
use crate::net::assessments::AssessmentRepository;
use crate::net::types::{Assessment, SessionUser};
use crate::state::history::{format_date, format_score};
use crate::state::toast::{Notice, ToastState};
use crate::util::auth::AuthGate;
use crate::util::route;

pub const NOT_FOUND: &str = "Assessment not found";
pub const RECEIVED: &str = "Your answers were received. Risk results are not available yet.";
pub const LOAD_FAILED: &str = "Failed to load this assessment. Please try again.";

/// What the results page shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ResultView {
    #[default]
    Loading,
    Received,
    NotFound,
    Found(Assessment),
}

/// Resolve the page body for `id`, plus a notice when the fetch failed.
pub async fn load_result(
    repo: &dyn AssessmentRepository,
    user: &SessionUser,
    id: Option<&str>,
) -> (ResultView, Option<Notice>) {
    let Some(id) = id.map(str::trim).filter(|id| !id.is_empty()) else {
        return (ResultView::Received, None);
    };
    match repo.find_assessment(user, id).await {
        Ok(Some(assessment)) => (ResultView::Found(assessment), None),
        Ok(None) => (ResultView::NotFound, None),
        Err(e) => {
            #[cfg(feature = "hydrate")]
            log::warn!("assessment lookup failed: {e}");
            #[cfg(not(feature = "hydrate"))]
            let _ = e;
            (ResultView::NotFound, Some(Notice::error("Error", LOAD_FAILED)))
        }
    }
}

/// Whether a lookup made for `requested` still matches the address bar.
#[must_use]
pub fn is_current_request(requested: Option<&str>, current: Option<&str>) -> bool {
    fn norm(id: Option<&str>) -> Option<&str> {
        id.map(str::trim).filter(|id| !id.is_empty())
    }
    norm(requested) == norm(current)
}

#[component]
pub fn ResultsPage() -> impl IntoView {
    let services = expect_context::<Services>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let query = use_query_map();
    let result = RwSignal::new(ResultView::Loading);

    let gate = AuthGate::for_page();

    // Re-run on every query change; a reply for an id the user already left is dropped.
    Effect::new(move |_| {
        let id = query.with(|q| q.get("id"));
        result.set(ResultView::Loading);
        let requested = id.clone();
        gate.run(
            services.clone(),
            move |services, user| async move { load_result(&*services.assessments, &user, id.as_deref()).await },
            move |(view, notice): (ResultView, Option<Notice>)| {
                let current = query.try_with_untracked(|q| q.get("id")).flatten();
                if !is_current_request(requested.as_deref(), current.as_deref()) {
                    return;
                }
                if result.try_set(view).is_none() {
                    if let Some(notice) = notice {
                        notify(toasts, notice);
                    }
                }
            },
        );
    });

    view! {
        <Show
            when=move || result.with(|r| *r != ResultView::Loading)
            fallback=|| view! { <div class="page page--loading"><p>"Loading..."</p></div> }
        >
            <div class="page">
                <Navbar />
                <main class="results">
                    <section class="card results__card">
                        <h1>"Assessment Results"</h1>
                        {move || match result.get() {
                            ResultView::Found(a) => {
                                let level_class = format!("results__level results__level--{}", a.risk_level.lowercase());
                                view! {
                                    <div class="results__body">
                                        <p class="results__score">{format_score(a.risk_score)}</p>
                                        <p class=level_class>"Risk Level: " {a.risk_level.label()}</p>
                                        <p class="results__date">"Taken on " {format_date(a.created_at)}</p>
                                    </div>
                                }
                                .into_any()
                            }
                            ResultView::Received => view! { <p class="results__message">{RECEIVED}</p> }.into_any(),
                            ResultView::NotFound | ResultView::Loading => {
                                view! { <p class="results__message">{NOT_FOUND}</p> }.into_any()
                            }
                        }}
                        <div class="results__actions">
                            <a class="btn btn--ghost" href=route::DASHBOARD>
                                "Back to Dashboard"
                            </a>
                            <a class="btn btn--primary" href=route::PREDICT>
                                "New Assessment"
                            </a>
                        </div>
                    </section>
                </main>
            </div>
        </Show>
    }
}
