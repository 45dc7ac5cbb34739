//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::toast_host::ToastHost;
use crate::net::Services;
use crate::net::supabase::SupabaseClient;
use crate::pages::{
    account::AccountPage,
    auth::AuthPage,
    dashboard::DashboardPage,
    home::HomePage,
    info::{AboutPage, ContactPage, NotFoundPage},
    predict::PredictPage,
    results::ResultsPage,
};
use crate::state::toast::ToastState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the backend services and the notification queue, then sets up
/// client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    provide_context(Services::from_backend(Arc::new(SupabaseClient::default())));
    provide_context(RwSignal::new(ToastState::default()));

    view! {
        <Stylesheet id="leptos" href="/pkg/vitalcheck.css"/>
        <Title text="VitalCheck"/>

        <Router>
            <ToastHost/>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("about") view=AboutPage/>
                <Route path=StaticSegment("contact") view=ContactPage/>
                <Route path=StaticSegment("auth") view=AuthPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
                <Route path=StaticSegment("predict") view=PredictPage/>
                <Route path=StaticSegment("results") view=ResultsPage/>
                <Route path=StaticSegment("account") view=AccountPage/>
            </Routes>
        </Router>
    }
}
