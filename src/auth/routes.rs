//! Route table and the pure allow/redirect rule.
//!
//! DESIGN
//! ======
//! `RoutePolicy` is plain data; `NavigationGuard` pairs it with the live
//! session provider and is the only thing the shell asks.
//! The state reader is only invoked for routes whose decision depends on it,
//! so public routes never touch session state.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::config::{RouteAccess, RouteSpec, SessionConfig};
use crate::state::auth::AuthState;

/// Outcome of a guard evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(String),
    /// Bootstrap has not resolved yet; the navigation must wait.
    Defer,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct CompiledRoute {
    segments: Vec<Segment>,
    access: RouteAccess,
}

impl CompiledRoute {
    fn compile(spec: &RouteSpec) -> Self {
        let segments = split_segments(&normalize_path(&spec.pattern))
            .map(|s| {
                if s.starts_with(':') {
                    Segment::Param
                } else {
                    Segment::Static(s.to_owned())
                }
            })
            .collect();
        Self { segments, access: spec.access }
    }

    fn matches(&self, path: &str) -> bool {
        let mut parts = split_segments(path);
        for segment in &self.segments {
            match (segment, parts.next()) {
                (Segment::Static(expected), Some(actual)) if expected == actual => {}
                (Segment::Param, Some(actual)) if !actual.is_empty() => {}
                _ => return false,
            }
        }
        parts.next().is_none()
    }
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Strip query, fragment, and trailing slashes; always starts with `/`.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_owned()
    } else if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{trimmed}")
    }
}

/// Static route partition plus the two redirect targets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoutePolicy {
    routes: Vec<CompiledRoute>,
    login_route: String,
    landing_route: String,
}

impl RoutePolicy {
    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            routes: config.routes.iter().map(CompiledRoute::compile).collect(),
            login_route: normalize_path(&config.login_route),
            landing_route: normalize_path(&config.landing_route),
        }
    }

    #[must_use]
    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    #[must_use]
    pub fn landing_route(&self) -> &str {
        &self.landing_route
    }

    #[must_use]
    pub fn is_login_route(&self, path: &str) -> bool {
        normalize_path(path) == self.login_route
    }

    /// Access class of `path`; first matching pattern wins, unknown paths are
    /// public (they render the not-found view).
    #[must_use]
    pub fn access_for(&self, path: &str) -> RouteAccess {
        let path = normalize_path(path);
        if path == self.login_route {
            return RouteAccess::LoginEntry;
        }
        self.routes
            .iter()
            .find(|route| route.matches(&path))
            .map_or(RouteAccess::Public, |route| route.access)
    }

    /// Allow or redirect a transition to `target`.
    pub fn decide<F>(&self, target: &str, read: F) -> GuardDecision
    where
        F: FnOnce() -> AuthState,
    {
        match self.access_for(target) {
            RouteAccess::Public => GuardDecision::Proceed,
            RouteAccess::Protected => {
                if read().is_authenticated() {
                    GuardDecision::Proceed
                } else {
                    GuardDecision::Redirect(self.login_route.clone())
                }
            }
            RouteAccess::LoginEntry => {
                if read().is_authenticated() {
                    GuardDecision::Redirect(self.landing_route.clone())
                } else {
                    GuardDecision::Proceed
                }
            }
            RouteAccess::Index => {
                if read().is_authenticated() {
                    GuardDecision::Redirect(self.landing_route.clone())
                } else {
                    GuardDecision::Redirect(self.login_route.clone())
                }
            }
        }
    }
}
