//! Parcel service (`colis/`).

use std::rc::Rc;

use super::ResourceEndpoint;
use crate::core::client::ApiClient;
use crate::core::error::ApiError;
use crate::core::models::{Colis, ColisStatut};

pub fn api(client: Rc<ApiClient>) -> ResourceEndpoint<Colis> {
    ResourceEndpoint::new(client, "colis/")
}

/// Move a parcel to a new status. PATCH so the rest of the record is left
/// untouched; the backend appends the matching tracking event itself.
pub async fn update_statut(
    client: &Rc<ApiClient>,
    id: i64,
    statut: ColisStatut,
) -> Result<Colis, ApiError> {
    api(Rc::clone(client))
        .partial_update(id, &serde_json::json!({ "statut": statut }))
        .await
}
