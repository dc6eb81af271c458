//! Login entry page.
//!
//! Credentials are issued by the backend; once the browser holds them, the
//! "check session" action re-runs the identity query and the route guard
//! moves a signed-in user on to the landing page.

use leptos::prelude::*;

use crate::state::actions::SessionActions;
use crate::state::auth::AuthState;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let actions = expect_context::<SessionActions>();

    let on_check = move |_| actions.recheck();

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"FinStream"</h1>
                <p class="login-card__subtitle">"Sign in to your wallet"</p>
                <button class="login-button" on:click=on_check disabled=move || auth.get().loading>
                    "Check session"
                </button>
                <Show when=move || auth.get().loading>
                    <p class="login-message">"Checking session..."</p>
                </Show>
            </div>
        </div>
    }
}
