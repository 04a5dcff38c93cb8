//! Sender service (`expediteurs/`).

use std::rc::Rc;

use super::ResourceEndpoint;
use crate::core::client::ApiClient;
use crate::core::models::Expediteur;

pub fn api(client: Rc<ApiClient>) -> ResourceEndpoint<Expediteur> {
    ResourceEndpoint::new(client, "expediteurs/")
}
