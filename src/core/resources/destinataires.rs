//! Recipient service (`destinataires/`).

use std::rc::Rc;

use super::ResourceEndpoint;
use crate::core::client::ApiClient;
use crate::core::models::Destinataire;

pub fn api(client: Rc<ApiClient>) -> ResourceEndpoint<Destinataire> {
    ResourceEndpoint::new(client, "destinataires/")
}
