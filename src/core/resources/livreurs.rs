//! Courier service (`livreurs/`).

use std::rc::Rc;

use super::ResourceEndpoint;
use crate::core::client::ApiClient;
use crate::core::models::Livreur;

pub fn api(client: Rc<ApiClient>) -> ResourceEndpoint<Livreur> {
    ResourceEndpoint::new(client, "livreurs/")
}
