//! Login page.
//!
//! Standalone page for authentication; redirects to the dashboard when a
//! session is already open.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::ui::auth::{LoginForm, use_session_context};

/// Login page component
#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session_context();

    // Redirect if already authenticated
    Effect::new(move |_| {
        if session.is_authenticated() {
            let navigate = use_navigate();
            navigate("/", Default::default());
        }
    });

    let on_success = move |_| {
        let navigate = use_navigate();
        navigate("/", Default::default());
    };

    view! {
        <div class="auth-page">
            <header class="auth-page-header">
                <A href="/" attr:class="brand">"ColisFlow"</A>
            </header>

            <main class="auth-page-main">
                <LoginForm on_success=Callback::new(on_success) />
                <p class="auth-switch">
                    "Pas encore de compte ? "
                    <A href="/register">"Créer un compte"</A>
                </p>
            </main>
        </div>
    }
}
