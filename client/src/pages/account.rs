//! Account page: identity details and full assessment history.

use leptos::prelude::*;

use crate::components::assessment_list::AssessmentList;
use crate::components::navbar::Navbar;
use crate::pages::dashboard::install_history_loader;
use crate::state::history::HistoryState;
use crate::util::route;

const NO_ASSESSMENTS: &str = "No assessments found. Take your first assessment now!";

#[component]
pub fn AccountPage() -> impl IntoView {
    let history = RwSignal::new(HistoryState::default());
    install_history_loader(history);

    let email = move || history.with(|h| h.user.as_ref().map(|u| u.email.clone()).unwrap_or_default());

    view! {
        <Show
            when=move || !history.with(|h| h.loading)
            fallback=|| view! { <div class="page page--loading"><p>"Loading..."</p></div> }
        >
            <div class="page">
                <Navbar />
                <main class="account">
                    <h1>"My Account"</h1>
                    <section class="card account__profile">
                        <h2>"Profile"</h2>
                        <p class="account__field">
                            <span class="account__label">"Email"</span>
                            <span class="account__value">{email}</span>
                        </p>
                    </section>
                    <section class="card">
                        <header class="account__history-header">
                            <h2>"Assessment History"</h2>
                            <span class="account__count">
                                {move || history.with(|h| h.summary().total)}
                                " total"
                            </span>
                        </header>
                        {move || {
                            view! {
                                <AssessmentList items=history.with(|h| h.items.clone()) empty_message=NO_ASSESSMENTS />
                            }
                        }}
                        <a class="btn btn--primary" href=route::PREDICT>
                            "Take Assessment"
                        </a>
                    </section>
                </main>
            </div>
        </Show>
    }
}
