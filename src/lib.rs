//! # finstream-session
//!
//! Session coordinator for the Leptos + WASM wallet frontend.
//!
//! This crate owns everything that decides whether the browser tab is
//! signed in: the shared session record, the single-flight identity loader,
//! the 401 interceptor wrapped around every API call, the route guard, and
//! the startup sequence that resolves the first identity query before the
//! view tree is mounted.
//!
//! ARCHITECTURE
//! ============
//! `state` holds the shared record, `net` the HTTP boundary, `auth` the
//! coordinator services, `util` browser glue (storage, navigation, guard
//! effects), and `app`/`pages` the thin Leptos shell that consumes them.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_helpers;

pub use auth::Session;
pub use config::SessionConfig;

/// WASM entry point: bootstrap the session, then mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn boot() {
    app::start(SessionConfig::default());
}
