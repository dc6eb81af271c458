//! Route gate for the Leptos shell.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route view is wrapped in `Guarded`, which asks the session's
//! `NavigationGuard` about the current path before rendering anything. The
//! page is only built on `Proceed`; a `Redirect` is handed to the router.
//! The mirrored `RwSignal<AuthState>` is tracked purely so the decision is
//! re-evaluated on every session transition. The answer itself always comes
//! from the guard's live provider.
//!
//! The guard holds `Rc` services, so it travels through context as a
//! `LocalStorage` `StoredValue` handle.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::rc::Rc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::auth::guard::NavigationGuard;
use crate::auth::routes::GuardDecision;
use crate::state::auth::AuthState;

/// Context handle for the session's navigation guard.
pub type GuardHandle = StoredValue<Rc<NavigationGuard>, LocalStorage>;

/// Decision the shell acts on for `path`.
///
/// `Defer` cannot occur once the shell is mounted after bootstrap; if it
/// does, nothing renders and nothing redirects until the next evaluation.
pub fn route_decision(guard: &NavigationGuard, path: &str) -> GuardDecision {
    guard.check(path)
}

/// Render `children` only when the guard lets the current path proceed.
#[component]
pub fn Guarded(children: ChildrenFn) -> impl IntoView {
    let guard = expect_context::<GuardHandle>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let pathname = use_location().pathname;
    let navigate = use_navigate();

    let decision = Memo::new(move |_| {
        auth.track();
        let path = pathname.get();
        guard.with_value(|guard| route_decision(guard, &path))
    });

    Effect::new(move || {
        if let GuardDecision::Redirect(to) = decision.get() {
            navigate(&to, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    move || (decision.get() == GuardDecision::Proceed).then(|| children())
}
