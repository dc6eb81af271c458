//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `start` resolves the startup identity query first and only then mounts
//! `App`, so no route is ever rendered against an unresolved session.
//!
//! `App` owns the `Rc` session services. Views see them through context: the
//! mirrored `RwSignal<AuthState>`, a local `GuardHandle` for the navigation
//! guard, and `SessionActions` for commands flowing back up. Every route view
//! is wrapped in `Guarded`, so no page is built before the guard allows it.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::auth::Session;
use crate::pages::{
    dashboard::DashboardPage,
    index::IndexPage,
    login::LoginPage,
    section::{ContactPage, SectionPage},
};
use crate::state::actions::SessionActions;
use crate::util::auth::{GuardHandle, Guarded};

/// Root application component.
#[component]
pub fn App(session: Rc<Session>) -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(session.state().read());
    session.state().subscribe(move |snapshot| {
        let _ = auth.try_set(snapshot.clone());
    });
    let actions = SessionActions::new();

    provide_context(auth);
    provide_context::<GuardHandle>(StoredValue::new_local(Rc::clone(session.guard())));
    provide_context(actions);

    let loader = Rc::clone(session.loader());
    Effect::new(move |seen: Option<u32>| {
        let requests = actions.logout_requests();
        if seen.is_some_and(|prev| prev != requests) {
            let loader = Rc::clone(&loader);
            leptos::task::spawn_local(async move { loader.logout().await });
        }
        requests
    });

    let loader = Rc::clone(session.loader());
    Effect::new(move |seen: Option<u32>| {
        let requests = actions.recheck_requests();
        if seen.is_some_and(|prev| prev != requests) {
            let loader = Rc::clone(&loader);
            leptos::task::spawn_local(async move {
                let authenticated = loader.load().await;
                log::debug!("session re-check: authenticated={authenticated}");
            });
        }
        requests
    });

    view! {
        <Title text="FinStream"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=|| view! { <Guarded><IndexPage/></Guarded> }/>
                <Route path=StaticSegment("login") view=|| view! { <Guarded><LoginPage/></Guarded> }/>
                <Route path=StaticSegment("dashboard") view=|| view! { <Guarded><DashboardPage/></Guarded> }/>
                <Route
                    path=StaticSegment("contacts")
                    view=|| view! { <Guarded><SectionPage title="Contacts"/></Guarded> }
                />
                <Route
                    path=(StaticSegment("contacts"), ParamSegment("id"))
                    view=|| view! { <Guarded><ContactPage/></Guarded> }
                />
                <Route
                    path=StaticSegment("analytics")
                    view=|| view! { <Guarded><SectionPage title="Analytics"/></Guarded> }
                />
                <Route
                    path=StaticSegment("settings")
                    view=|| view! { <Guarded><SectionPage title="Settings"/></Guarded> }
                />
            </Routes>
        </Router>
    }
}

/// Browser entry: install logging, bootstrap the session, then mount.
#[cfg(feature = "csr")]
pub fn start(config: crate::config::SessionConfig) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    let session = Session::browser(config);
    leptos::task::spawn_local(async move {
        let authenticated = session.bootstrap().await;
        log::info!("bootstrap complete: authenticated={authenticated}");
        leptos::mount::mount_to_body(move || view! { <App session/> });
    });
}
