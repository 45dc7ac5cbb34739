//! Dashboard page: headline numbers and assessment history.
//!
//! SYSTEM CONTEXT
//! ==============
//! Gated. Nothing is fetched until the session check passes; the page shows a
//! loading screen until the history load settles.

use leptos::prelude::*;

use crate::components::assessment_list::AssessmentList;
use crate::components::navbar::Navbar;
use crate::components::toast_host::notify;
use crate::net::Services;
use crate::state::history::{HistoryLoad, HistoryState, load_history};
use crate::state::toast::ToastState;
use crate::util::auth::install_auth_gate;
use crate::util::route;

/// Apply a finished history load, dropping it if the page is gone.
pub(crate) fn apply_history(history: RwSignal<HistoryState>, toasts: RwSignal<ToastState>, load: HistoryLoad) {
    let notice = load.notice.clone();
    if history.try_update(|h| h.finish(load)).is_some() {
        if let Some(notice) = notice {
            notify(toasts, notice);
        }
    }
}

/// Gate the current page and load the signed-in user's history into `history`.
pub(crate) fn install_history_loader(history: RwSignal<HistoryState>) {
    let services = expect_context::<Services>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    install_auth_gate(
        services,
        |services, user| async move { load_history(&*services.assessments, user).await },
        move |load| apply_history(history, toasts, load),
    );
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let history = RwSignal::new(HistoryState::default());
    install_history_loader(history);

    view! {
        <Show
            when=move || !history.with(|h| h.loading)
            fallback=|| view! { <div class="page page--loading"><p>"Loading..."</p></div> }
        >
            <div class="page">
                <Navbar />
                <main class="dashboard">
                    <header class="dashboard__header">
                        <h1>"Your Health Dashboard"</h1>
                        <a class="btn btn--primary" href=route::PREDICT>
                            "New Assessment"
                        </a>
                    </header>
                    <div class="dashboard__stats">
                        <section class="card stat-card">
                            <h3>"Latest Risk Score"</h3>
                            <p class="stat-card__value">{move || history.with(|h| h.summary().latest_score)}</p>
                            <p class="stat-card__hint">
                                "Your latest assessment shows a "
                                {move || history.with(|h| h.summary().latest_level)}
                                " risk level"
                            </p>
                        </section>
                        <section class="card stat-card">
                            <h3>"Total Assessments"</h3>
                            <p class="stat-card__value">{move || history.with(|h| h.summary().total)}</p>
                            <p class="stat-card__hint">"Assessments taken so far"</p>
                        </section>
                    </div>
                    <section class="card">
                        <h2>"Assessment History"</h2>
                        {move || view! { <AssessmentList items=history.with(|h| h.items.clone()) /> }}
                    </section>
                </main>
            </div>
        </Show>
    }
}
