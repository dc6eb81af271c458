//! Read-only session capability consumed by the navigation guard.

use crate::state::auth::AuthState;

/// Source of the live session snapshot.
///
/// `SessionLoader` is the only implementation. Persisted client flags never
/// answer this; only the identity query does.
pub trait SessionProvider {
    fn read(&self) -> AuthState;
}
