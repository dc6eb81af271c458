//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Pages are thin: the app wraps each one in `Guarded`, and they render from
//! the mirrored `RwSignal<AuthState>`. Session work goes through
//! `SessionActions`.

pub mod dashboard;
pub mod index;
pub mod login;
pub mod section;
