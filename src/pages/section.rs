//! Placeholder screens for the protected sections.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;


#[component]
pub fn SectionPage(title: &'static str) -> impl IntoView {
    view! {
        <div class="section-page">
            <A href="/dashboard">"Back"</A>
            <h1>{title}</h1>
        </div>
    }
}

/// `/contacts/:id`.
#[component]
pub fn ContactPage() -> impl IntoView {
    let params = use_params_map();
    let id = move || params.read().get("id").unwrap_or_default();

    view! {
        <div class="section-page">
            <A href="/contacts">"Back"</A>
            <h1>"Contact " {id}</h1>
        </div>
    }
}
