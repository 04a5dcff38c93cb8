//! Account service (`users/`).
//!
//! Admin-side account management; self-service registration lives in the
//! auth module.

use std::rc::Rc;

use super::ResourceEndpoint;
use crate::core::client::ApiClient;
use crate::core::models::Utilisateur;

pub fn api(client: Rc<ApiClient>) -> ResourceEndpoint<Utilisateur> {
    ResourceEndpoint::new(client, "users/")
}
