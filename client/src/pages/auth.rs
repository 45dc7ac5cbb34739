//! Login / sign-up page.
//!
//! DESIGN
//! ======
//! All transitions live in `state::auth_form::AuthForm`; this page wires DOM
//! events to them and performs the async submit. The `mode` query parameter
//! picks the initial form and follows later navigations between the two.

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::navbar::Navbar;
use crate::components::toast_host::notify;
use crate::net::Services;
use crate::state::auth_form::{AuthForm, AuthMode, SubmitStart};
use crate::state::toast::ToastState;

#[component]
pub fn AuthPage() -> impl IntoView {
    let services = expect_context::<Services>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let query = use_query_map();
    let initial = AuthMode::from_query(query.get_untracked().get("mode").as_deref());
    let form = RwSignal::new(AuthForm::new(initial));
    #[cfg(feature = "hydrate")]
    let navigate = leptos_router::hooks::use_navigate();

    Effect::new(move || {
        let mode = AuthMode::from_query(query.get().get("mode").as_deref());
        if form.with_untracked(|f| f.mode != mode) && form.try_update(AuthForm::toggle_mode) == Some(true) {
            toasts.update(ToastState::clear_errors);
        }
    });

    let on_toggle = move |_: leptos::ev::MouseEvent| {
        if form.try_update(AuthForm::toggle_mode) == Some(true) {
            toasts.update(ToastState::clear_errors);
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(start) = form.try_update(AuthForm::begin_submit) else {
            return;
        };
        match start {
            SubmitStart::Busy => {}
            SubmitStart::Invalid(notice) => notify(toasts, notice),
            SubmitStart::Started(creds) => {
                #[cfg(feature = "hydrate")]
                {
                    let sessions = std::sync::Arc::clone(&services.sessions);
                    let navigate = navigate.clone();
                    leptos::task::spawn_local(async move {
                        let result = crate::state::auth_form::submit_credentials(&*sessions, &creds).await;
                        if let Err(e) = &result {
                            log::warn!("auth request failed: {e}");
                        }
                        let Some(outcome) = form.try_update(|f| f.finish(result)) else {
                            return;
                        };
                        notify(toasts, outcome.notice);
                        if let Some(to) = outcome.navigate_to {
                            navigate(to, leptos_router::NavigateOptions::default());
                        }
                    });
                }
                #[cfg(not(feature = "hydrate"))]
                {
                    let _ = (creds, &services);
                }
            }
        }
    };

    let mode = move || form.with(|f| f.mode);
    let disabled = move || form.with(AuthForm::inputs_disabled);

    view! {
        <div class="page">
            <Navbar />
            <main class="auth-page">
                <div class="card auth-card">
                    <h1>{move || mode().heading()}</h1>
                    <form class="auth-form" on:submit=on_submit>
                        <label class="auth-form__label" for="email">
                            "Email"
                        </label>
                        <input
                            id="email"
                            class="auth-form__input"
                            type="email"
                            placeholder="you@example.com"
                            autocomplete="email"
                            prop:value=move || form.with(|f| f.email.clone())
                            on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                            disabled=disabled
                        />
                        <label class="auth-form__label" for="password">
                            "Password"
                        </label>
                        <input
                            id="password"
                            class="auth-form__input"
                            type="password"
                            placeholder="••••••••"
                            prop:value=move || form.with(|f| f.password.clone())
                            on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                            disabled=disabled
                        />
                        <button class="btn btn--primary auth-form__submit" type="submit" disabled=disabled>
                            {move || if form.with(AuthForm::is_loading) { "Loading..." } else { mode().submit_label() }}
                        </button>
                    </form>
                    <Show when=move || form.with(|f| f.last_error.is_some())>
                        <p class="auth-card__error">{move || form.with(|f| f.last_error.clone().unwrap_or_default())}</p>
                    </Show>
                    <button class="auth-card__toggle" type="button" on:click=on_toggle disabled=disabled>
                        {move || mode().toggle_prompt()}
                    </button>
                </div>
            </main>
        </div>
    }
}
