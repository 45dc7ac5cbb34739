//! Health-risk questionnaire page.
//!
//! Submitting validates the answers and moves on to the results page. No
//! score is computed and nothing is stored.

use leptos::prelude::*;

use crate::components::navbar::Navbar;
use crate::components::toast_host::notify;
use crate::state::questionnaire::{Field, FieldKind, Questionnaire};
use crate::state::toast::ToastState;
use crate::util::route;

fn field_input(answers: RwSignal<Questionnaire>, field: Field) -> impl IntoView {
    let id = format!("field-{}", field.label().to_ascii_lowercase().replace(' ', "-"));
    let value = move || answers.with(|q| q.get(field).to_owned());
    let on_change = move |ev: leptos::ev::Event| answers.update(|q| q.set(field, event_target_value(&ev)));

    let control = match field.kind() {
        FieldKind::Text => view! {
            <input id=id.clone() class="form__input" type="text" prop:value=value on:input=on_change />
        }
        .into_any(),
        FieldKind::Number => view! {
            <input id=id.clone() class="form__input" type="number" step="any" prop:value=value on:input=on_change />
        }
        .into_any(),
        FieldKind::Select { placeholder, choices } => view! {
            <select id=id.clone() class="form__input" prop:value=value on:change=on_change>
                <option value="">{placeholder}</option>
                {choices
                    .iter()
                    .map(|c| view! { <option value=c.value>{c.label}</option> })
                    .collect::<Vec<_>>()}
            </select>
        }
        .into_any(),
    };

    view! {
        <div class="form__field">
            <label class="form__label" for=id>
                {field.label()}
            </label>
            {control}
        </div>
    }
}

#[component]
pub fn PredictPage() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let answers = RwSignal::new(Questionnaire::default());
    #[cfg(feature = "hydrate")]
    let navigate = leptos_router::hooks::use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let checked = answers.with(Questionnaire::validate);
        if let Err(notice) = checked {
            notify(toasts, notice);
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            match answers.with(serde_json::to_string) {
                Ok(json) => log::debug!("questionnaire submitted: {json}"),
                Err(e) => log::warn!("questionnaire not serializable: {e}"),
            }
            navigate(route::RESULTS, leptos_router::NavigateOptions::default());
        }
    };

    view! {
        <div class="page">
            <Navbar />
            <main class="predict">
                <header class="predict__header">
                    <a class="btn btn--ghost" href=route::HOME>
                        "Back"
                    </a>
                    <a class="predict__help" href=route::ABOUT>
                        "Confused? Read about the questions"
                    </a>
                </header>
                <form class="card form" on:submit=on_submit>
                    <h1>"Health Assessment"</h1>
                    <div class="form__grid">
                        {Field::ALL.into_iter().map(|field| field_input(answers, field)).collect::<Vec<_>>()}
                    </div>
                    <button class="btn btn--primary form__submit" type="submit">
                        "Get Results"
                    </button>
                </form>
            </main>
        </div>
    }
}
