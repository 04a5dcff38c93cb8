//! Pricing service (`tarifs/`).

use std::rc::Rc;

use super::ResourceEndpoint;
use crate::core::client::ApiClient;
use crate::core::models::Tarif;

pub fn api(client: Rc<ApiClient>) -> ResourceEndpoint<Tarif> {
    ResourceEndpoint::new(client, "tarifs/")
}
