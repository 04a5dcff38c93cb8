//! Delivery-zone service (`zones-livraison/`).

use std::rc::Rc;

use super::ResourceEndpoint;
use crate::core::client::ApiClient;
use crate::core::models::ZoneLivraison;

pub fn api(client: Rc<ApiClient>) -> ResourceEndpoint<ZoneLivraison> {
    ResourceEndpoint::new(client, "zones-livraison/")
}
