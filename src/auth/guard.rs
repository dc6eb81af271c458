//! Navigation guard over the live session.
//!
//! `check` is the synchronous pre-transition predicate. It re-reads the
//! provider on every call; nothing is cached between navigations.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::rc::Rc;

use super::bootstrap::BootstrapSequencer;
use super::provider::SessionProvider;
use super::routes::{GuardDecision, RoutePolicy};
use crate::config::RouteAccess;

pub struct NavigationGuard {
    provider: Rc<dyn SessionProvider>,
    bootstrap: Rc<BootstrapSequencer>,
    policy: RoutePolicy,
}

impl NavigationGuard {
    pub fn new(provider: Rc<dyn SessionProvider>, bootstrap: Rc<BootstrapSequencer>, policy: RoutePolicy) -> Self {
        Self {
            provider,
            bootstrap,
            policy,
        }
    }

    /// Decide a transition to `target` now. Public routes always proceed;
    /// anything else is `Defer` until bootstrap has resolved.
    #[must_use]
    pub fn check(&self, target: &str) -> GuardDecision {
        let public = self.policy.access_for(target) == RouteAccess::Public;
        if !public && !self.bootstrap.is_ready() {
            log::debug!("guard: deferring {target} until bootstrap resolves");
            return GuardDecision::Defer;
        }
        let decision = self.policy.decide(target, || self.provider.read());
        log::debug!("guard: {target} -> {decision:?}");
        decision
    }

    /// Decide a transition to `target`, waiting for bootstrap first. Never
    /// returns `Defer`.
    pub async fn resolve(&self, target: &str) -> GuardDecision {
        self.bootstrap.run().await;
        self.check(target)
    }
}
