//! Shared client-side session state.
//!
//! DESIGN
//! ======
//! `auth` is the plain snapshot value consumed by views and the guard;
//! `session` is the single mutable record that produces those snapshots;
//! `actions` carries page-originated commands back to the app root.

pub mod actions;
pub mod auth;
pub mod session;
