//! Invoicing page (ADMIN and GESTIONNAIRE; the route guard enforces it).

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::core::models::FactureStatut;
use crate::core::resources;
use crate::ui::auth::ApiHandle;
use crate::ui::common::LoadingSpinner;

#[component]
pub fn FacturesPage() -> impl IntoView {
    let api = expect_context::<ApiHandle>();

    let total = RwSignal::new(None::<usize>);
    let en_attente = RwSignal::new(None::<usize>);
    let load_error = RwSignal::new(None::<String>);

    Effect::new(move |_| {
        let client = Rc::clone(&api.0);
        spawn_local(async move {
            match resources::factures::api(client).list().await {
                Ok(factures) => {
                    let _ = total.try_set(Some(factures.len()));
                    let impayees = factures
                        .iter()
                        .filter(|f| f.statut == FactureStatut::EnAttente)
                        .count();
                    let _ = en_attente.try_set(Some(impayees));
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
                <h1>"Factures"</h1>
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

            {move || match (total.get(), en_attente.get()) {
                (Some(total), Some(en_attente)) => view! {
                    <p>{format!("{total} factures, dont {en_attente} en attente de paiement.")}</p>
                }
                .into_any(),
                _ => view! {
                    <LoadingSpinner message="Chargement des factures...".to_string() />
                }
                .into_any(),
            }}
        </div>
    }
}
