//! Auth-session snapshot for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionState::read` hands out this value, and the Leptos shell mirrors it
//! into an `RwSignal<AuthState>` so route guards and user-aware components
//! re-render on every session transition.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::UserProfile;

/// Point-in-time copy of the session record.
///
/// There is no separate authenticated flag to keep in sync: a session is
/// authenticated exactly when a user is present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<UserProfile>,
    pub loading: bool,
}

impl AuthState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Display name of the signed-in user, or an empty string.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.user.as_ref().map_or("", |u| u.full_name.as_str())
    }
}
