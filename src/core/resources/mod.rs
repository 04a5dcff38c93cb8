//! Resource services.
//!
//! The backend exposes every resource under the same REST convention:
//! `GET root/`, `GET root/<id>/`, `POST root/`, `PUT root/<id>/`,
//! `PATCH root/<id>/`, `DELETE root/<id>/`. [`ResourceEndpoint`] implements
//! that convention once; each submodule binds it to a resource root and adds
//! the operations specific to that resource.

pub mod colis;
pub mod destinataires;
pub mod expediteurs;
pub mod factures;
pub mod livraisons;
pub mod livreurs;
pub mod notifications;
pub mod suivis;
pub mod tarifs;
pub mod users;
pub mod vehicules;
pub mod zones_livraison;

use std::marker::PhantomData;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::client::ApiClient;
use crate::core::error::ApiError;

/// Typed CRUD over one resource root.
pub struct ResourceEndpoint<T> {
    client: Rc<ApiClient>,
    /// Relative root with its trailing slash, e.g. `colis/`.
    root: &'static str,
    _marker: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> ResourceEndpoint<T> {
    pub fn new(client: Rc<ApiClient>, root: &'static str) -> Self {
        debug_assert!(root.ends_with('/'), "resource root must end with '/'");
        Self {
            client,
            root,
            _marker: PhantomData,
        }
    }

    fn item_path(&self, id: i64) -> String {
        format!("{}{}/", self.root, id)
    }

    pub async fn list(&self) -> Result<Vec<T>, ApiError> {
        self.client.get(self.root).await
    }

    pub async fn retrieve(&self, id: i64) -> Result<T, ApiError> {
        self.client.get(&self.item_path(id)).await
    }

    pub async fn create(&self, item: &T) -> Result<T, ApiError> {
        self.client.post(self.root, item).await
    }

    pub async fn update(&self, id: i64, item: &T) -> Result<T, ApiError> {
        self.client.put(&self.item_path(id), item).await
    }

    /// Partial update; the patch carries only the fields to change.
    pub async fn partial_update(&self, id: i64, patch: &serde_json::Value) -> Result<T, ApiError> {
        self.client.patch(&self.item_path(id), patch).await
    }

    /// DELETE; the backend answers with a bare status (204).
    pub async fn destroy(&self, id: i64) -> Result<u16, ApiError> {
        self.client.delete(&self.item_path(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ApiConfig;
    use crate::core::http::{HttpMethod, HttpRequest, HttpTransport, RawResponse, TransportError};
    use crate::core::models::{Colis, ColisStatut, LivraisonStatut};
    use crate::core::token_store::MemoryTokenStore;

    use std::cell::RefCell;
    use std::collections::VecDeque;

    use async_trait::async_trait;
    use futures::executor::block_on;

    #[derive(Default)]
    struct MockTransport {
        script: RefCell<VecDeque<RawResponse>>,
        requests: RefCell<Vec<HttpRequest>>,
    }

    #[async_trait(?Send)]
    impl HttpTransport for MockTransport {
        async fn execute(&self, request: HttpRequest) -> Result<RawResponse, TransportError> {
            self.requests.borrow_mut().push(request);
            self.script
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| TransportError("mock script exhausted".into()))
        }
    }

    fn client_over(transport: Rc<MockTransport>) -> Rc<ApiClient> {
        Rc::new(ApiClient::new(
            ApiConfig::new("http://localhost:8000/api/"),
            Rc::new(MemoryTokenStore::with_tokens("acc", "ref")),
            transport,
        ))
    }

    fn respond(transport: &MockTransport, status: u16, body: &str) {
        transport.script.borrow_mut().push_back(RawResponse {
            status,
            body: body.to_string(),
        });
    }

    fn sample_colis_json() -> &'static str {
        r#"{"id": 5, "expediteur": 1, "destinataire": 2, "description": "Pneu"}"#
    }

    #[test]
    fn test_crud_paths_follow_the_rest_convention() {
        let transport = Rc::new(MockTransport::default());
        let client = client_over(Rc::clone(&transport));
        let endpoint = colis::api(Rc::clone(&client));

        respond(&transport, 200, &format!("[{}]", sample_colis_json()));
        respond(&transport, 200, sample_colis_json());
        respond(&transport, 204, "");

        let listed = block_on(endpoint.list()).unwrap();
        let fetched = block_on(endpoint.retrieve(5)).unwrap();
        let deleted = block_on(endpoint.destroy(5)).unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(fetched.id, Some(5));
        assert_eq!(deleted, 204);

        let requests = transport.requests.borrow();
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[0].url, "http://localhost:8000/api/colis/");
        assert_eq!(requests[1].method, HttpMethod::Get);
        assert_eq!(requests[1].url, "http://localhost:8000/api/colis/5/");
        assert_eq!(requests[2].method, HttpMethod::Delete);
        assert_eq!(requests[2].url, "http://localhost:8000/api/colis/5/");
    }

    #[test]
    fn test_create_posts_the_record_to_the_root() {
        let transport = Rc::new(MockTransport::default());
        let client = client_over(Rc::clone(&transport));
        let endpoint = colis::api(Rc::clone(&client));

        respond(&transport, 201, sample_colis_json());

        let nouveau: Colis =
            serde_json::from_str(r#"{"expediteur": 1, "destinataire": 2, "description": "Pneu"}"#)
                .unwrap();
        let created = block_on(endpoint.create(&nouveau)).unwrap();

        assert_eq!(created.id, Some(5));

        let requests = transport.requests.borrow();
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].url, "http://localhost:8000/api/colis/");
        assert_eq!(requests[0].body.as_ref().unwrap()["description"], "Pneu");
    }

    #[test]
    fn test_update_puts_to_the_item_path() {
        let transport = Rc::new(MockTransport::default());
        let client = client_over(Rc::clone(&transport));
        let endpoint = expediteurs::api(Rc::clone(&client));

        respond(
            &transport,
            200,
            r#"{"id": 3, "nom_complet": "Société Kamga", "telephone": "+237655443322"}"#,
        );

        let record = serde_json::from_str(
            r#"{"id": 3, "nom_complet": "Société Kamga", "telephone": "+237655443322"}"#,
        )
        .unwrap();
        block_on(endpoint.update(3, &record)).unwrap();

        let requests = transport.requests.borrow();
        assert_eq!(requests[0].method, HttpMethod::Put);
        assert_eq!(requests[0].url, "http://localhost:8000/api/expediteurs/3/");
    }

    #[test]
    fn test_colis_statut_transition_is_a_patch() {
        let transport = Rc::new(MockTransport::default());
        let client = client_over(Rc::clone(&transport));

        respond(
            &transport,
            200,
            r#"{"id": 5, "expediteur": 1, "destinataire": 2, "description": "Pneu", "statut": "LIVRE"}"#,
        );

        let updated =
            block_on(colis::update_statut(&client, 5, ColisStatut::Livre)).unwrap();

        assert_eq!(updated.statut, ColisStatut::Livre);

        let requests = transport.requests.borrow();
        assert_eq!(requests[0].method, HttpMethod::Patch);
        assert_eq!(requests[0].url, "http://localhost:8000/api/colis/5/");
        assert_eq!(
            requests[0].body.as_ref().unwrap(),
            &serde_json::json!({ "statut": "LIVRE" })
        );
    }

    #[test]
    fn test_livraison_statut_transition_carries_failure_reason() {
        let transport = Rc::new(MockTransport::default());
        let client = client_over(Rc::clone(&transport));

        respond(
            &transport,
            200,
            r#"{"id": 9, "colis": 5, "livreur": 2, "vehicule": 1, "statut": "ECHOUEE", "motif_echec": "Destinataire absent"}"#,
        );

        let updated = block_on(livraisons::update_statut(
            &client,
            9,
            LivraisonStatut::Echouee,
            Some("Destinataire absent"),
        ))
        .unwrap();

        assert_eq!(updated.statut, LivraisonStatut::Echouee);
        assert_eq!(
            transport.requests.borrow()[0].body.as_ref().unwrap(),
            &serde_json::json!({ "statut": "ECHOUEE", "motif_echec": "Destinataire absent" })
        );
    }

    #[test]
    fn test_every_resource_root_matches_the_backend_router() {
        let transport = Rc::new(MockTransport::default());
        let client = client_over(Rc::clone(&transport));

        for _ in 0..12 {
            respond(&transport, 200, "[]");
        }

        block_on(async {
            let _ = users::api(Rc::clone(&client)).list().await;
            let _ = expediteurs::api(Rc::clone(&client)).list().await;
            let _ = destinataires::api(Rc::clone(&client)).list().await;
            let _ = colis::api(Rc::clone(&client)).list().await;
            let _ = suivis::api(Rc::clone(&client)).list().await;
            let _ = livreurs::api(Rc::clone(&client)).list().await;
            let _ = vehicules::api(Rc::clone(&client)).list().await;
            let _ = livraisons::api(Rc::clone(&client)).list().await;
            let _ = factures::api(Rc::clone(&client)).list().await;
            let _ = zones_livraison::api(Rc::clone(&client)).list().await;
            let _ = notifications::api(Rc::clone(&client)).list().await;
            let _ = tarifs::api(Rc::clone(&client)).list().await;
        });

        let roots: Vec<String> = transport
            .requests
            .borrow()
            .iter()
            .map(|r| r.url.trim_start_matches("http://localhost:8000/api/").to_string())
            .collect();

        assert_eq!(
            roots,
            vec![
                "users/",
                "expediteurs/",
                "destinataires/",
                "colis/",
                "suivis/",
                "livreurs/",
                "vehicules/",
                "livraisons/",
                "factures/",
                "zones-livraison/",
                "notifications/",
                "tarifs/",
            ]
        );
    }
}
