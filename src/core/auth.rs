//! Authentication operations.
//!
//! Thin operations over the API client:
//! - `register` creates an account and returns the new profile,
//! - `login` exchanges credentials for a token pair and persists it,
//! - `logout` drops the stored pair; purely local, no network call.
//!
//! All three use the unauthenticated send path: the token endpoints answer
//! 401 for bad credentials, and that must surface as a credential failure
//! instead of triggering the refresh-and-replay machinery.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::client::{ApiClient, parse_json};
use crate::core::error::{ApiError, FieldErrors};
use crate::core::http::HttpMethod;

const REGISTER_PATH: &str = "auth/register/";
const TOKEN_PATH: &str = "auth/token/";

/// Credential pair as minted by `auth/token/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Profile summary returned by the registration endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<crate::core::claims::Role>,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

pub struct AuthService {
    client: Rc<ApiClient>,
}

impl AuthService {
    pub fn new(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    /// Create an account. Server-side validation errors come back as a
    /// field map and are propagated unchanged for per-field display.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<ProfileSummary, ApiError> {
        let body = serde_json::to_value(RegisterRequest {
            username,
            email,
            password,
        })
        .map_err(|e| ApiError::Decode(e.to_string()))?;

        let response = self
            .client
            .send_unauthenticated(HttpMethod::Post, REGISTER_PATH, Some(body))
            .await?;

        parse_json(response)
    }

    /// Exchange credentials for a token pair. The pair is persisted to the
    /// token store before this returns, so a `get_access()` issued by the
    /// caller right after login observes the new credential.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, ApiError> {
        let body = serde_json::to_value(LoginRequest { username, password })
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        let response = self
            .client
            .send_unauthenticated(HttpMethod::Post, TOKEN_PATH, Some(body))
            .await?;

        if !response.is_success() {
            return Err(login_failure(response.status, &response.body));
        }

        let pair: TokenPair = parse_json(response)?;
        self.client.token_store().set(&pair.access, &pair.refresh);
        Ok(pair)
    }

    /// Drop the stored credential pair. Local only; the backend keeps no
    /// session to tear down.
    pub fn logout(&self) {
        self.client.token_store().clear();
    }
}

/// A 400 or 401 from the token endpoint is a credential problem; carry the
/// backend's wording to the form instead of the generic expiry message.
fn login_failure(status: u16, body: &str) -> ApiError {
    match status {
        400 | 401 => {
            let json: serde_json::Value = serde_json::from_str(body).unwrap_or_default();
            let mut fields = FieldErrors::from_body(&json);
            if fields.is_empty() {
                fields.0.insert(
                    "detail".to_string(),
                    vec!["Identifiants incorrects.".to_string()],
                );
            }
            ApiError::Validation(fields)
        }
        _ => ApiError::from_response(status, body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ApiConfig;
    use crate::core::http::{HttpRequest, HttpTransport, RawResponse, TransportError};
    use crate::core::token_store::{MemoryTokenStore, TokenStore};

    use std::cell::RefCell;
    use std::collections::VecDeque;

    use async_trait::async_trait;
    use futures::executor::block_on;

    struct MockTransport {
        script: RefCell<VecDeque<Result<RawResponse, TransportError>>>,
        requests: RefCell<Vec<HttpRequest>>,
    }

    impl MockTransport {
        fn scripted(
            responses: impl IntoIterator<Item = Result<RawResponse, TransportError>>,
        ) -> Rc<Self> {
            Rc::new(Self {
                script: RefCell::new(responses.into_iter().collect()),
                requests: RefCell::new(Vec::new()),
            })
        }
    }

    #[async_trait(?Send)]
    impl HttpTransport for MockTransport {
        async fn execute(&self, request: HttpRequest) -> Result<RawResponse, TransportError> {
            self.requests.borrow_mut().push(request);
            self.script
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(TransportError("mock script exhausted".into())))
        }
    }

    fn ok(status: u16, body: &str) -> Result<RawResponse, TransportError> {
        Ok(RawResponse {
            status,
            body: body.to_string(),
        })
    }

    fn service_with(
        transport: Rc<MockTransport>,
    ) -> (AuthService, Rc<MemoryTokenStore>) {
        let store = Rc::new(MemoryTokenStore::new());
        let client = Rc::new(ApiClient::new(
            ApiConfig::new("http://localhost:8000/api/"),
            Rc::clone(&store) as _,
            transport,
        ));
        (AuthService::new(client), store)
    }

    #[test]
    fn test_login_persists_pair_before_returning() {
        let transport = MockTransport::scripted([ok(
            200,
            r#"{"access": "acc-jwt", "refresh": "ref-jwt"}"#,
        )]);
        let (service, store) = service_with(Rc::clone(&transport));

        let pair = block_on(service.login("alice", "secret")).unwrap();

        assert_eq!(pair.access, "acc-jwt");
        assert_eq!(store.get_access(), Some("acc-jwt".to_string()));
        assert_eq!(store.get_refresh(), Some("ref-jwt".to_string()));

        let sent = &transport.requests.borrow()[0];
        assert!(sent.url.ends_with("auth/token/"));
        assert_eq!(sent.body.as_ref().unwrap()["username"], "alice");
        // Credential endpoints never carry a bearer.
        assert_eq!(sent.header("Authorization"), None);
    }

    #[test]
    fn test_login_failure_leaves_store_untouched() {
        let transport = MockTransport::scripted([ok(
            401,
            r#"{"detail": "No active account found with the given credentials"}"#,
        )]);
        let (service, store) = service_with(transport);

        let err = block_on(service.login("alice", "wrong")).unwrap_err();

        match err {
            ApiError::Validation(fields) => {
                assert!(fields.summary().contains("No active account"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
        assert_eq!(store.get_access(), None);
        assert_eq!(store.get_refresh(), None);
    }

    #[test]
    fn test_login_failure_without_body_gets_default_message() {
        let transport = MockTransport::scripted([ok(401, "")]);
        let (service, _) = service_with(transport);

        let err = block_on(service.login("alice", "wrong")).unwrap_err();
        match err {
            ApiError::Validation(fields) => {
                assert_eq!(fields.summary(), "Identifiants incorrects.");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_login_does_not_trigger_refresh_on_401() {
        let transport = MockTransport::scripted([ok(401, "")]);
        let (service, _) = service_with(Rc::clone(&transport));

        let _ = block_on(service.login("alice", "wrong"));

        // Exactly one call: the token POST itself, no refresh attempt.
        assert_eq!(transport.requests.borrow().len(), 1);
    }

    #[test]
    fn test_register_returns_profile() {
        let transport = MockTransport::scripted([ok(
            201,
            r#"{"id": 12, "username": "bob", "email": "bob@colisflow.cm", "role": "OPERATEUR"}"#,
        )]);
        let (service, store) = service_with(Rc::clone(&transport));

        let profile = block_on(service.register("bob", "bob@colisflow.cm", "pw")).unwrap();

        assert_eq!(profile.id, 12);
        assert_eq!(profile.username, "bob");
        // Registration does not log in.
        assert_eq!(store.get_access(), None);

        let sent = &transport.requests.borrow()[0];
        assert!(sent.url.ends_with("auth/register/"));
    }

    #[test]
    fn test_register_propagates_field_errors() {
        let transport = MockTransport::scripted([ok(
            400,
            r#"{"username": ["Ce nom d'utilisateur est déjà pris."]}"#,
        )]);
        let (service, _) = service_with(transport);

        let err = block_on(service.register("bob", "bob@x", "pw")).unwrap_err();

        match err {
            ApiError::Validation(fields) => {
                assert!(fields.field("username").is_some());
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_logout_is_local_and_clears_both_tokens() {
        let transport = MockTransport::scripted([]);
        let (service, store) = service_with(Rc::clone(&transport));
        store.set("acc", "ref");

        service.logout();

        assert_eq!(store.get_access(), None);
        assert_eq!(store.get_refresh(), None);
        assert!(transport.requests.borrow().is_empty());
    }

    #[test]
    fn test_login_network_failure_is_flagged() {
        let transport =
            MockTransport::scripted([Err(TransportError("dns failure".into()))]);
        let (service, store) = service_with(transport);

        let err = block_on(service.login("alice", "secret")).unwrap_err();

        assert!(err.is_network());
        assert_eq!(store.get_access(), None);
    }
}
