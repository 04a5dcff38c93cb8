//! Invoice service (`factures/`).

use std::rc::Rc;

use super::ResourceEndpoint;
use crate::core::client::ApiClient;
use crate::core::models::Facture;

pub fn api(client: Rc<ApiClient>) -> ResourceEndpoint<Facture> {
    ResourceEndpoint::new(client, "factures/")
}
