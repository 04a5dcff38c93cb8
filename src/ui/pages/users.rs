//! User administration page (ADMIN only; the route guard enforces it).

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::core::resources;
use crate::ui::auth::ApiHandle;
use crate::ui::common::LoadingSpinner;

#[component]
pub fn UsersPage() -> impl IntoView {
    let api = expect_context::<ApiHandle>();

    let actifs = RwSignal::new(None::<usize>);
    let total = RwSignal::new(None::<usize>);
    let load_error = RwSignal::new(None::<String>);

    Effect::new(move |_| {
        let client = Rc::clone(&api.0);
        spawn_local(async move {
            match resources::users::api(client).list().await {
                Ok(users) => {
                    let _ = total.try_set(Some(users.len()));
                    let _ = actifs.try_set(Some(users.iter().filter(|u| u.actif).count()));
                }
                Err(err) => {
                    let _ = load_error.try_set(Some(err.message()));
                }
            }
        });
    });

    view! {
        <div class="section-page">
            <header class="section-header">
                <A href="/">"← Tableau de bord"</A>
                <h1>"Utilisateurs"</h1>
            </header>

            {move || {
                load_error.get().map(|error| {
                    view! {
                        <div class="banner-error" role="alert">
                            <p>{error}</p>
                        </div>
                    }
                })
            }}

            {move || match (total.get(), actifs.get()) {
                (Some(total), Some(actifs)) => view! {
                    <p>{format!("{total} comptes, dont {actifs} actifs.")}</p>
                }
                .into_any(),
                _ => view! {
                    <LoadingSpinner message="Chargement des comptes...".to_string() />
                }
                .into_any(),
            }}
        </div>
    }
}
