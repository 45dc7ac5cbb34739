//! Static informational pages and the not-found fallback.

use leptos::prelude::*;

use crate::components::navbar::Navbar;
use crate::util::route;

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <div class="page">
            <Navbar />
            <main class="info">
                <h1>"About Us"</h1>
                <p>
                    "VitalCheck helps you understand how everyday factors such as glucose level, BMI, smoking and blood pressure relate to your long-term health."
                </p>
                <h2>"About the questions"</h2>
                <ul class="info__list">
                    <li>"Average glucose level is measured in mg/dL."</li>
                    <li>"BMI is your weight in kilograms divided by the square of your height in meters."</li>
                    <li>"Hypertension and heart disease refer to conditions diagnosed by a doctor."</li>
                </ul>
                <p class="info__note">
                    "Assessments are informational only and are not a medical diagnosis."
                </p>
            </main>
        </div>
    }
}

#[component]
pub fn ContactPage() -> impl IntoView {
    view! {
        <div class="page">
            <Navbar />
            <main class="info">
                <h1>"Contact"</h1>
                <p>"Questions or feedback? We'd like to hear from you."</p>
                <p>
                    "Email: " <a href="mailto:support@vitalcheck.app">"support@vitalcheck.app"</a>
                </p>
            </main>
        </div>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="page">
            <Navbar />
            <main class="info">
                <h1>"Page not found"</h1>
                <a class="btn btn--primary" href=route::HOME>
                    "Go Home"
                </a>
            </main>
        </div>
    }
}
