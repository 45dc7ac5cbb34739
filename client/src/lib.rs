//! # client
//!
//! Leptos + WASM frontend for the VitalCheck health-risk self-assessment app.
//!
//! This crate contains pages, components, client-side state, and the network
//! layer that talks to the hosted auth and data services. The `ssr` feature
//! exposes [`app::shell`] and [`app::App`] to the host server; the `hydrate`
//! feature builds the browser bundle.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
mod testing;

/// Browser entry point: attach the app to the server-rendered document.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
