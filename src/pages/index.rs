//! Root path. The guard always redirects it to the landing page or the
//! login page, so this body only shows if a redirect is slow to land.

use leptos::prelude::*;

#[component]
pub fn IndexPage() -> impl IntoView {
    view! { <p class="index-page">"Redirecting..."</p> }
}
