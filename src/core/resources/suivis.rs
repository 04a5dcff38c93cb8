//! Tracking-event service (`suivis/`).

use std::rc::Rc;

use super::ResourceEndpoint;
use crate::core::client::ApiClient;
use crate::core::models::Suivi;

pub fn api(client: Rc<ApiClient>) -> ResourceEndpoint<Suivi> {
    ResourceEndpoint::new(client, "suivis/")
}
