//! Registration page.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::ui::auth::RegisterForm;

/// Registration page component
#[component]
pub fn RegisterPage() -> impl IntoView {
    // The account exists but is not logged in; continue on the login page.
    let on_success = move |_| {
        let navigate = use_navigate();
        navigate("/login", Default::default());
    };

    view! {
        <div class="auth-page">
            <header class="auth-page-header">
                <A href="/" attr:class="brand">"ColisFlow"</A>
            </header>

            <main class="auth-page-main">
                <RegisterForm on_success=Callback::new(on_success) />
                <p class="auth-switch">
                    "Déjà un compte ? "
                    <A href="/login">"Se connecter"</A>
                </p>
            </main>
        </div>
    }
}
