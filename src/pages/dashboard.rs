//! Landing page for a signed-in user.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::actions::SessionActions;
use crate::state::auth::AuthState;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let actions = expect_context::<SessionActions>();

    let name = move || auth.get().display_name().to_owned();
    let email = move || auth.get().user.map(|u| u.email).unwrap_or_default();
    let on_logout = move |_| actions.logout();

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header">
                <h1>"Welcome, " {name}</h1>
                <span class="dashboard-page__email">{email}</span>
                <button class="btn" on:click=on_logout>
                    "Log out"
                </button>
            </header>
            <nav class="dashboard-page__nav">
                <A href="/contacts">"Contacts"</A>
                <A href="/analytics">"Analytics"</A>
                <A href="/settings">"Settings"</A>
            </nav>
        </div>
    }
}
