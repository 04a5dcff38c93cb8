//! Route guards.
//!
//! Gates a subtree on the session state and an allowed-role set. The
//! decision logic itself is pure and lives in `core::session`; this
//! component only projects it onto the router: wait on a spinner while the
//! session hydrates, redirect anonymous visitors to the login surface, and
//! send authenticated users with the wrong role back to the home page
//! rather than a hard error.

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::core::claims::Role;
use crate::core::session::{RouteDecision, check_access};
use crate::ui::auth::use_session_context;
use crate::ui::common::LoadingSpinner;

/// Restrict children to sessions whose role is in `allowed`.
///
/// An empty `allowed` set admits any authenticated user.
#[component]
pub fn RequireRole(
    /// Roles admitted to this surface; empty means any authenticated user.
    #[prop(optional)]
    allowed: &'static [Role],
    children: ChildrenFn,
) -> impl IntoView {
    let session = use_session_context();

    move || match check_access(&session.state.get(), allowed) {
        RouteDecision::Wait => view! {
            <LoadingSpinner message="Vérification de la session...".to_string() />
        }
        .into_any(),
        RouteDecision::Allow => children().into_any(),
        RouteDecision::ToLogin => view! { <Redirect path="/login" /> }.into_any(),
        RouteDecision::ToHome => view! { <Redirect path="/" /> }.into_any(),
    }
}
