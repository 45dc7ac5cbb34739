//! Landing page.

use leptos::prelude::*;

use crate::components::navbar::Navbar;
use crate::util::route;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="page">
            <Navbar />
            <main class="home">
                <section class="hero">
                    <h1 class="hero__title">"Know your health risk in minutes"</h1>
                    <p class="hero__subtitle">
                        "Answer a short questionnaire about your lifestyle and medical history, then keep track of every assessment from your dashboard."
                    </p>
                    <div class="hero__actions">
                        <a class="btn btn--primary" href=route::PREDICT>
                            "Start Assessment"
                        </a>
                        <a class="btn btn--ghost" href=route::SIGNUP>
                            "Create Account"
                        </a>
                    </div>
                </section>
                <section class="features">
                    <div class="card feature">
                        <h3>"Quick questionnaire"</h3>
                        <p>"Eleven questions covering age, lifestyle and known conditions."</p>
                    </div>
                    <div class="card feature">
                        <h3>"Private history"</h3>
                        <p>"Your assessments are visible only to your account."</p>
                    </div>
                    <div class="card feature">
                        <h3>"Track over time"</h3>
                        <p>"See your latest risk level and how it changes between assessments."</p>
                    </div>
                </section>
            </main>
        </div>
    }
}
