//! Fleet service (`vehicules/`).

use std::rc::Rc;

use super::ResourceEndpoint;
use crate::core::client::ApiClient;
use crate::core::models::Vehicule;

pub fn api(client: Rc<ApiClient>) -> ResourceEndpoint<Vehicule> {
    ResourceEndpoint::new(client, "vehicules/")
}
