//! Top navigation bar with identity-aware links.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each navbar instance looks the session up once on mount and then follows
//! session-change events until it is torn down, at which point its
//! subscription is released.

#[cfg(test)]
#[path = "navbar_test.rs"]
mod navbar_test;

use std::sync::Arc;

use leptos::prelude::*;

use crate::net::Services;
use crate::net::types::{AuthChange, Identity};
use crate::state::auth::AuthState;
use crate::state::auth_form::AuthMode;
use crate::util::route;

/// One navigation entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
    pub primary: bool,
}

const fn link(href: &'static str, label: &'static str) -> NavLink {
    NavLink { href, label, primary: false }
}

/// Leading links that do not depend on identity.
const ALWAYS_SHOWN: usize = 2;

/// Links shown for `identity`, left to right.
#[must_use]
pub fn navbar_links(identity: &Identity) -> Vec<NavLink> {
    let mut links = vec![link(route::ABOUT, "About Us"), link(route::CONTACT, "Contact")];
    match identity {
        Identity::Authenticated { .. } => {
            links.push(link(route::DASHBOARD, "Dashboard"));
            links.push(link(route::ACCOUNT, "Account"));
        }
        Identity::Anonymous => {
            links.push(link(route::auth_href(AuthMode::Login), "Login"));
            links.push(NavLink { primary: true, ..link(route::auth_href(AuthMode::Signup), "Sign Up") });
        }
    }
    links
}

#[component]
pub fn Navbar() -> impl IntoView {
    let services = expect_context::<Services>();
    let toasts = expect_context::<RwSignal<crate::state::toast::ToastState>>();
    let auth = RwSignal::new(AuthState::default());
    #[cfg(feature = "hydrate")]
    let navigate = leptos_router::hooks::use_navigate();

    let subscription = services.sessions.on_session_change(Arc::new(move |change: &AuthChange| {
        auth.try_update(|a| a.apply(change));
    }));
    on_cleanup(move || drop(subscription));

    #[cfg(feature = "hydrate")]
    {
        let sessions = Arc::clone(&services.sessions);
        leptos::task::spawn_local(async move {
            let session = sessions.current_session().await;
            auth.try_update(|a| a.resolve(session.as_ref()));
        });
    }

    let on_logout = move |_: leptos::ev::MouseEvent| {
        #[cfg(feature = "hydrate")]
        {
            let sessions = Arc::clone(&services.sessions);
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                if let Err(e) = sessions.sign_out().await {
                    log::warn!("sign-out failed: {e}");
                    crate::components::toast_host::notify(
                        toasts,
                        crate::state::toast::Notice::error(
                            "Error",
                            crate::state::auth_form::describe_auth_error(&e),
                        ),
                    );
                }
                auth.try_update(|a| a.resolve(None));
                navigate(route::HOME, leptos_router::NavigateOptions::default());
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&services, toasts);
        }
    };

    view! {
        <nav class="navbar">
            <div class="navbar__inner">
                <a href=route::HOME class="navbar__brand">
                    "VitalCheck"
                </a>
                <div class="navbar__links">
                    {move || {
                        let state = auth.get();
                        let links = navbar_links(&state.identity);
                        // Identity links wait for the first lookup so they do not flash.
                        let shown = if state.loading { ALWAYS_SHOWN } else { links.len() };
                        links
                            .into_iter()
                            .take(shown)
                            .map(|l| {
                                let class = if l.primary { "btn btn--primary" } else { "btn btn--ghost" };
                                view! {
                                    <a href=l.href class=class>
                                        {l.label}
                                    </a>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                    <Show when=move || auth.get().identity.is_authenticated()>
                        <span class="navbar__email">
                            {move || auth.get().identity.email().unwrap_or_default().to_owned()}
                        </span>
                        <button class="btn btn--ghost navbar__logout" on:click=on_logout.clone() title="Logout">
                            "Logout"
                        </button>
                    </Show>
                </div>
            </div>
        </nav>
    }
}
