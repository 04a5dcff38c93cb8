//! Dashboard page.
//!
//! Role-aware landing page: a few live counters pulled through the resource
//! services plus navigation to the sections the current role may open.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::core::claims::Role;
use crate::core::models::{ColisStatut, LivraisonStatut, LivreurStatut};
use crate::core::resources;
use crate::ui::auth::{ApiHandle, logout, use_session_context};
use crate::ui::common::InlineSpinner;

/// One numeric tile. `None` renders an inline spinner while loading.
#[component]
fn KpiTile(label: &'static str, value: RwSignal<Option<usize>>) -> impl IntoView {
    view! {
        <div class="kpi-tile">
            <div class="kpi-value">
                {move || match value.get() {
                    Some(n) => view! { <span>{n}</span> }.into_any(),
                    None => view! { <InlineSpinner /> }.into_any(),
                }}
            </div>
            <div class="kpi-label">{label}</div>
        </div>
    }
}

/// Dashboard page component
#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session_context();
    let api = expect_context::<ApiHandle>();

    let colis_en_attente = RwSignal::new(None::<usize>);
    let colis_total = RwSignal::new(None::<usize>);
    let livraisons_en_cours = RwSignal::new(None::<usize>);
    let livreurs_disponibles = RwSignal::new(None::<usize>);
    let load_error = RwSignal::new(None::<String>);

    Effect::new(move |_| {
        let client = Rc::clone(&api.0);
        spawn_local(async move {
            // Resolutions landing after the page unmounted are dropped by
            // try_set; never a crash, never a stale update.
            match resources::colis::api(Rc::clone(&client)).list().await {
                Ok(items) => {
                    let _ = colis_total.try_set(Some(items.len()));
                    let en_attente = items
                        .iter()
                        .filter(|c| c.statut == ColisStatut::EnAttente)
                        .count();
                    let _ = colis_en_attente.try_set(Some(en_attente));
                }
                Err(err) => {
                    let _ = load_error.try_set(Some(err.message()));
                }
            }

            match resources::livraisons::api(Rc::clone(&client)).list().await {
                Ok(items) => {
                    let en_cours = items
                        .iter()
                        .filter(|l| l.statut == LivraisonStatut::EnCours)
                        .count();
                    let _ = livraisons_en_cours.try_set(Some(en_cours));
                }
                Err(err) => {
                    let _ = load_error.try_set(Some(err.message()));
                }
            }

            match resources::livreurs::api(client).list().await {
                Ok(items) => {
                    let disponibles = items
                        .iter()
                        .filter(|l| l.statut == LivreurStatut::Disponible)
                        .count();
                    let _ = livreurs_disponibles.try_set(Some(disponibles));
                }
                Err(err) => {
                    let _ = load_error.try_set(Some(err.message()));
                }
            }
        });
    });

    let on_logout = move |_| {
        logout();
        let navigate = use_navigate();
        navigate("/login", Default::default());
    };

    let role_is = move |roles: &[Role]| session.role().is_some_and(|r| roles.contains(&r));

    view! {
        <div class="dashboard-page">
            <header class="dashboard-header">
                <span class="brand">"ColisFlow"</span>
                <nav class="dashboard-nav">
                    {move || role_is(&[Role::Admin]).then(|| view! {
                        <A href="/users">"Utilisateurs"</A>
                    })}
                    {move || role_is(&[Role::Admin, Role::Gestionnaire]).then(|| view! {
                        <A href="/factures">"Factures"</A>
                    })}
                </nav>
                <div class="dashboard-user">
                    {move || session.claims().map(|c| view! {
                        <span>{format!("{} ({})", c.username, c.role)}</span>
                    })}
                    <button class="btn-secondary" on:click=on_logout>
                        "Se déconnecter"
                    </button>
                </div>
            </header>

            <main class="dashboard-main">
                <h1>"Tableau de bord"</h1>

                {move || {
                    load_error.get().map(|error| {
                        view! {
                            <div class="banner-error" role="alert">
                                <p>{error}</p>
                            </div>
                        }
                    })
                }}

                <div class="kpi-grid">
                    <KpiTile label="Colis enregistrés" value=colis_total />
                    <KpiTile label="Colis en attente" value=colis_en_attente />
                    <KpiTile label="Livraisons en cours" value=livraisons_en_cours />
                    <KpiTile label="Livreurs disponibles" value=livreurs_disponibles />
                </div>
            </main>
        </div>
    }
}
