//! Notification service (`notifications/`).

use std::rc::Rc;

use super::ResourceEndpoint;
use crate::core::client::ApiClient;
use crate::core::models::Notification;

pub fn api(client: Rc<ApiClient>) -> ResourceEndpoint<Notification> {
    ResourceEndpoint::new(client, "notifications/")
}
