//! Assessment history rows shared by the dashboard and account pages.

use leptos::prelude::*;

use crate::net::types::Assessment;
use crate::state::history::{format_date, format_score};
use crate::util::route::results_href;

#[component]
pub fn AssessmentList(items: Vec<Assessment>, #[prop(optional)] empty_message: Option<&'static str>) -> impl IntoView {
    if items.is_empty() {
        return empty_message
            .map(|message| view! { <p class="history__empty">{message}</p> })
            .into_any();
    }

    view! {
        <ul class="history">
            {items
                .into_iter()
                .map(|item| {
                    let level_class = format!("history__level history__level--{}", item.risk_level.lowercase());
                    view! {
                        <li class="history__row">
                            <div class="history__meta">
                                <span class="history__date">{format_date(item.created_at)}</span>
                                <span class=level_class>"Risk Level: " {item.risk_level.label()}</span>
                            </div>
                            <span class="history__score">{format_score(item.risk_score)}</span>
                            <a class="btn btn--ghost" href=results_href(&item.id)>
                                "View Details"
                            </a>
                        </li>
                    }
                })
                .collect::<Vec<_>>()}
        </ul>
    }
    .into_any()
}
