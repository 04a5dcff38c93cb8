//! Delivery-run service (`livraisons/`).

use std::rc::Rc;

use super::ResourceEndpoint;
use crate::core::client::ApiClient;
use crate::core::error::ApiError;
use crate::core::models::{Livraison, LivraisonStatut};

pub fn api(client: Rc<ApiClient>) -> ResourceEndpoint<Livraison> {
    ResourceEndpoint::new(client, "livraisons/")
}

/// Move a delivery run to a new status. A failed run carries its reason so
/// dispatch can requeue the parcel with context.
pub async fn update_statut(
    client: &Rc<ApiClient>,
    id: i64,
    statut: LivraisonStatut,
    motif_echec: Option<&str>,
) -> Result<Livraison, ApiError> {
    let mut patch = serde_json::json!({ "statut": statut });
    if let Some(motif) = motif_echec {
        patch["motif_echec"] = serde_json::Value::String(motif.to_string());
    }

    api(Rc::clone(client)).partial_update(id, &patch).await
}
