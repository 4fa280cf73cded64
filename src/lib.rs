//! # cricb-client
//!
//! Leptos + WASM front-end core for the CricB cricket-tournament platform.
//!
//! This crate owns the client-side session lifecycle: the session store,
//! the HTTP gateway that refreshes expired credentials and evicts
//! deactivated accounts, and the role-gated route guards. Dashboards and
//! tournament data are served by the REST API.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
mod testing;

/// WASM entry point: install logging and hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
