//! Notification stack rendered above every route.

use leptos::prelude::*;

use crate::state::toast::{Notice, ToastState, ToastVariant};

#[cfg(feature = "hydrate")]
const TOAST_TTL_MS: u64 = 5_000;

/// Queue `notice` and schedule its auto-dismissal.
pub fn notify(toasts: RwSignal<ToastState>, notice: Notice) {
    let Some(id) = toasts.try_update(|t| t.push(notice)) else {
        return;
    };
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::sleep(std::time::Duration::from_millis(TOAST_TTL_MS)).await;
        toasts.try_update(|t| t.dismiss(id));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = id;
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-host" aria-live="polite">
            {move || {
                toasts
                    .get()
                    .items
                    .into_iter()
                    .map(|toast| {
                        let id = toast.id;
                        let class = match toast.notice.variant {
                            ToastVariant::Success => "toast",
                            ToastVariant::Error => "toast toast--error",
                        };
                        view! {
                            <div class=class role="status">
                                <p class="toast__title">{toast.notice.title}</p>
                                <p class="toast__description">{toast.notice.description}</p>
                                <button
                                    class="toast__close"
                                    title="Dismiss"
                                    on:click=move |_| toasts.update(|t| t.dismiss(id))
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
