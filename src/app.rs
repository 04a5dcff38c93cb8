use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::core::claims::Role;
use crate::ui::RequireRole;
use crate::ui::auth::provide_session_context;
use crate::ui::pages::{
    DashboardPage, FacturesPage, LoginPage, NotFoundPage, RegisterPage, UsersPage,
};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="fr">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Per-route allowed-role sets. Empty set: any authenticated user.
const USERS_ROLES: &[Role] = &[Role::Admin];
const FACTURES_ROLES: &[Role] = &[Role::Admin, Role::Gestionnaire];

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    // API client + session state for the whole tree.
    let _session = provide_session_context();

    view! {
        // injects a stylesheet into the document <head>
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/colisflow.css"/>

        // sets the document title
        <Title text="ColisFlow - Gestion des livraisons"/>

        <Router>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=path!("/login") view=LoginPage/>
                <Route path=path!("/register") view=RegisterPage/>
                <Route path=path!("/") view=|| view! {
                    <RequireRole>
                        <DashboardPage/>
                    </RequireRole>
                }/>
                <Route path=path!("/users") view=|| view! {
                    <RequireRole allowed=USERS_ROLES>
                        <UsersPage/>
                    </RequireRole>
                }/>
                <Route path=path!("/factures") view=|| view! {
                    <RequireRole allowed=FACTURES_ROLES>
                        <FacturesPage/>
                    </RequireRole>
                }/>
            </Routes>
        </Router>
    }
}
