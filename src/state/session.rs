//! The one shared session record for the lifetime of the tab.
//!
//! DESIGN
//! ======
//! `SessionState` is constructed once by `Session::new` and shared through
//! `Rc`. It is deliberately not `Clone`: cloning the `Rc` shares the record,
//! there is no way to fork it. Fields are private; `apply` and `clear` are
//! the only public mutators, and the loading flag is only reachable through
//! the crate-private [`LoadingGuard`].
//!
//! Observers register with `subscribe` and receive the new snapshot after
//! every transition. No `RefCell` borrow is held while callbacks run, so a
//! callback may call `read` (or even `clear`) without panicking.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::auth::AuthState;
use crate::net::types::UserProfile;

type Subscriber = Rc<dyn Fn(&AuthState)>;

/// Handle returned by [`SessionState::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub struct SessionState {
    inner: RefCell<AuthState>,
    subscribers: RefCell<Vec<(SubscriptionId, Subscriber)>>,
    next_id: Cell<u64>,
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("state", &*self.inner.borrow())
            .field("subscribers", &self.subscribers.borrow().len())
            .finish()
    }
}

impl SessionState {
    /// Fresh `{authenticated: false, user: None, loading: false}` record.
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Synchronous snapshot of the current record.
    #[must_use]
    pub fn read(&self) -> AuthState {
        self.inner.borrow().clone()
    }

    /// Record a successful identity resolution.
    pub fn apply(&self, profile: UserProfile) {
        log::info!("session: authenticated as {}", profile.id);
        self.inner.borrow_mut().user = Some(profile);
        self.notify();
    }

    /// Reset to the signed-out state. The loading flag belongs to the
    /// in-flight query and is left for its guard to release.
    pub fn clear(&self) {
        let was_authenticated = {
            let mut inner = self.inner.borrow_mut();
            inner.user.take().is_some()
        };
        if was_authenticated {
            log::info!("session: cleared");
        }
        self.notify();
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&AuthState) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.borrow_mut().retain(|(sid, _)| *sid != id);
    }

    /// Mark an identity query as in flight until the guard is dropped.
    pub(crate) fn begin_loading(self: &Rc<Self>) -> LoadingGuard {
        self.set_loading(true);
        LoadingGuard { state: Rc::clone(self) }
    }

    fn set_loading(&self, loading: bool) {
        self.inner.borrow_mut().loading = loading;
        self.notify();
    }

    fn notify(&self) {
        let snapshot = self.read();
        let subscribers: Vec<Subscriber> = self.subscribers.borrow().iter().map(|(_, cb)| Rc::clone(cb)).collect();
        for callback in subscribers {
            callback(&snapshot);
        }
    }
}

/// Holds `loading = true`; releases it on drop, including when the owning
/// future is dropped mid-flight.
pub(crate) struct LoadingGuard {
    state: Rc<SessionState>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.state.set_loading(false);
    }
}
