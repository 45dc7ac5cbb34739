//! Auth gate shared by session-scoped routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected pages apply identical behavior: look the session up on every
//! activation, redirect to login before anything is fetched when there is
//! none, otherwise run the page's loader with the signed-in user.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::future::Future;
#[cfg(feature = "hydrate")]
use std::sync::Arc;

use leptos::prelude::*;

use crate::net::Services;
use crate::net::session::SessionStore;
use crate::net::types::SessionUser;
use crate::util::route::LOGIN_REDIRECT;

/// Whether a protected view may proceed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Proceed(SessionUser),
    Redirect(&'static str),
}

/// Outcome of a gated load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Gated<T> {
    Loaded(T),
    Redirect(&'static str),
}

/// Ask the store for the current session and decide.
pub async fn check_session(store: &dyn SessionStore) -> GateDecision {
    match store.current_session().await {
        Some(session) => GateDecision::Proceed(session.user),
        None => GateDecision::Redirect(LOGIN_REDIRECT),
    }
}

/// Run `load` only when a session exists.
pub async fn load_protected<T, F, Fut>(store: &dyn SessionStore, load: F) -> Gated<T>
where
    F: FnOnce(SessionUser) -> Fut,
    Fut: Future<Output = T>,
{
    match check_session(store).await {
        GateDecision::Proceed(user) => Gated::Loaded(load(user).await),
        GateDecision::Redirect(to) => Gated::Redirect(to),
    }
}

/// Reads false once the reactive owner it was created under is disposed.
///
/// Async work started by a page checks this before touching the router, so a
/// load that settles after the user navigated away stays silent.
#[derive(Clone, Copy, Debug)]
pub struct PageLiveness(RwSignal<()>);

impl PageLiveness {
    #[must_use]
    pub fn new() -> Self {
        Self(RwSignal::new(()))
    }

    #[must_use]
    pub fn is_alive(self) -> bool {
        self.0.try_get_untracked().is_some()
    }
}

impl Default for PageLiveness {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-page gate: the router handle and liveness flag of the page that owns it.
#[derive(Clone)]
pub struct AuthGate {
    live: PageLiveness,
    #[cfg(feature = "hydrate")]
    navigate: Arc<dyn Fn(&str, leptos_router::NavigateOptions)>,
}

impl AuthGate {
    /// Must be called from a component body.
    #[must_use]
    pub fn for_page() -> Self {
        Self {
            live: PageLiveness::new(),
            #[cfg(feature = "hydrate")]
            navigate: Arc::new(leptos_router::hooks::use_navigate()),
        }
    }

    /// Redirect when signed out, otherwise load and apply.
    ///
    /// Runs in the browser only; on the server the page stays in its loading
    /// state. Nothing is applied and no redirect happens once the page is gone.
    pub fn run<T, L, Fut, A>(&self, services: Services, load: L, apply: A)
    where
        T: 'static,
        L: FnOnce(Services, SessionUser) -> Fut + 'static,
        Fut: Future<Output = T> + 'static,
        A: FnOnce(T) + 'static,
    {
        #[cfg(feature = "hydrate")]
        {
            let live = self.live;
            let navigate = Arc::clone(&self.navigate);
            leptos::task::spawn_local(async move {
                let store = Arc::clone(&services.sessions);
                let gated = load_protected(&*store, |user| load(services, user)).await;
                if !live.is_alive() {
                    log::debug!("page disposed before gated load settled");
                    return;
                }
                match gated {
                    Gated::Loaded(value) => apply(value),
                    Gated::Redirect(to) => {
                        log::debug!("no session, redirecting to {to}");
                        navigate(to, leptos_router::NavigateOptions::default());
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (self.live, services, load, apply);
        }
    }
}

/// Gate the calling page once. Must be called from a component body.
pub fn install_auth_gate<T, L, Fut, A>(services: Services, load: L, apply: A)
where
    T: 'static,
    L: FnOnce(Services, SessionUser) -> Fut + 'static,
    Fut: Future<Output = T> + 'static,
    A: FnOnce(T) + 'static,
{
    AuthGate::for_page().run(services, load, apply);
}
