//! ColisFlow - Parcel Delivery Management
//!
//! A web application for managing parcels, senders and recipients, couriers,
//! vehicles, deliveries and invoicing, built with Leptos and WebAssembly.
//! All data lives in an external REST backend reached over JWT bearer auth;
//! this crate is the client: token persistence, the refreshing HTTP client,
//! the session state machine and the role-gated UI.

#![recursion_limit = "4096"]

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
