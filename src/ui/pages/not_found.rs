//! 404 page.

use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found-page">
            <h1>"404"</h1>
            <p>"Cette page n'existe pas."</p>
            <A href="/">"Retour au tableau de bord"</A>
        </div>
    }
}
