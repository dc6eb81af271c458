//! Session commands raised from the view tree.
//!
//! Leptos context only carries `Send + Sync` values, so pages cannot hold
//! the `Rc` session services. They bump these counters instead and the app
//! root, which owns the services, performs the work.

use leptos::prelude::*;

#[derive(Clone, Copy, Debug)]
pub struct SessionActions {
    logout: RwSignal<u32>,
    recheck: RwSignal<u32>,
}

impl Default for SessionActions {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionActions {
    #[must_use]
    pub fn new() -> Self {
        Self {
            logout: RwSignal::new(0),
            recheck: RwSignal::new(0),
        }
    }

    /// Ask the app root to end the session.
    pub fn logout(&self) {
        self.logout.update(|n| *n = n.wrapping_add(1));
    }

    /// Ask the app root to re-run the identity query.
    pub fn recheck(&self) {
        self.recheck.update(|n| *n = n.wrapping_add(1));
    }

    /// Tracked read of the logout request counter.
    pub fn logout_requests(&self) -> u32 {
        self.logout.get()
    }

    /// Tracked read of the re-check request counter.
    pub fn recheck_requests(&self) -> u32 {
        self.recheck.get()
    }
}
