//! Authenticated API client.
//!
//! Single point through which every backend call flows:
//! - attaches the bearer credential from the injected [`TokenStore`],
//! - on a first 401, exchanges the refresh token for a new pair and replays
//!   the original request exactly once,
//! - classifies every failure exactly once into [`ApiError`].
//!
//! Concurrent 401s join a single shared refresh future: one refresh call per
//! expiry cycle, no matter how many requests expired together. The store and
//! the transport are constructor-injected, so the whole algorithm runs under
//! native tests against an in-memory store and a scripted transport.

use std::cell::RefCell;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::config::ApiConfig;
use crate::core::error::ApiError;
use crate::core::http::{HttpMethod, HttpRequest, HttpTransport, RawResponse};
use crate::core::token_store::TokenStore;

/// Relative path of the refresh endpoint; called directly through the
/// transport so a failing refresh can never trigger a refresh of itself.
const REFRESH_PATH: &str = "auth/token/refresh/";

type RefreshFuture = Shared<LocalBoxFuture<'static, Result<String, ApiError>>>;

/// New pair minted by the refresh endpoint. Both entries always rotate
/// together.
#[derive(Debug, Clone, serde::Deserialize)]
struct RefreshedPair {
    access: String,
    refresh: String,
}

pub struct ApiClient {
    config: ApiConfig,
    store: Rc<dyn TokenStore>,
    transport: Rc<dyn HttpTransport>,
    /// The one refresh allowed in flight at a time. Lazily created on the
    /// first 401 of a cycle; the future clears its own slot when it
    /// settles, so a later cycle always starts fresh.
    refresh_in_flight: Rc<RefCell<Option<RefreshFuture>>>,
    /// Invoked when auth is irrecoverably lost; the session context uses it
    /// to drop to Anonymous and redirect to the login surface.
    session_expired_hook: RefCell<Option<Rc<dyn Fn()>>>,
}

impl ApiClient {
    pub fn new(
        config: ApiConfig,
        store: Rc<dyn TokenStore>,
        transport: Rc<dyn HttpTransport>,
    ) -> Self {
        Self {
            config,
            store,
            transport,
            refresh_in_flight: Rc::new(RefCell::new(None)),
            session_expired_hook: RefCell::new(None),
        }
    }

    /// Browser client: fetch transport over the localStorage store.
    #[cfg(not(feature = "ssr"))]
    pub fn browser() -> Self {
        use crate::core::http::FetchTransport;
        use crate::core::token_store::BrowserTokenStore;

        Self::new(
            ApiConfig::from_env(),
            Rc::new(BrowserTokenStore),
            Rc::new(FetchTransport),
        )
    }

    /// Server-side placeholder. SSR only renders the shell; any call that
    /// does slip through fails like an unreachable network.
    #[cfg(feature = "ssr")]
    pub fn server_stub() -> Self {
        use crate::core::http::ServerStubTransport;
        use crate::core::token_store::MemoryTokenStore;

        Self::new(
            ApiConfig::from_env(),
            Rc::new(MemoryTokenStore::new()),
            Rc::new(ServerStubTransport),
        )
    }

    /// The credential store this client reads from and writes to.
    pub fn token_store(&self) -> Rc<dyn TokenStore> {
        Rc::clone(&self.store)
    }

    /// Register the callback fired when the session is irrecoverably lost.
    pub fn set_session_expired_hook(&self, hook: impl Fn() + 'static) {
        *self.session_expired_hook.borrow_mut() = Some(Rc::new(hook));
    }

    fn notify_session_expired(&self) {
        let hook = self.session_expired_hook.borrow().clone();
        if let Some(hook) = hook {
            hook();
        }
    }

    // ------------------------------------------------------------------
    // Typed calls
    // ------------------------------------------------------------------

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send_authenticated(HttpMethod::Get, path, None).await?;
        parse_json(response)
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let response = self
            .send_authenticated(HttpMethod::Post, path, Some(to_json(body)?))
            .await?;
        parse_json(response)
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let response = self
            .send_authenticated(HttpMethod::Put, path, Some(to_json(body)?))
            .await?;
        parse_json(response)
    }

    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let response = self
            .send_authenticated(HttpMethod::Patch, path, Some(to_json(body)?))
            .await?;
        parse_json(response)
    }

    /// DELETE returns the status code only (the backend answers 204).
    pub async fn delete(&self, path: &str) -> Result<u16, ApiError> {
        let response = self
            .send_authenticated(HttpMethod::Delete, path, None)
            .await?;
        if response.is_success() {
            Ok(response.status)
        } else {
            Err(ApiError::from_response(response.status, &response.body))
        }
    }

    // ------------------------------------------------------------------
    // Send paths
    // ------------------------------------------------------------------

    /// Attach the bearer credential from the current store contents.
    ///
    /// A pure function of the store at dispatch time: attaching twice yields
    /// the same single Authorization header. No expiry check happens here;
    /// expiry is only ever discovered from the server's 401.
    pub fn attach_bearer(&self, request: &mut HttpRequest) {
        if let Some(access) = self.store.get_access() {
            request.set_bearer(&access);
        }
    }

    /// The core request pipeline: dispatch, then at most one
    /// refresh-and-replay on a first 401.
    async fn send_authenticated(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<RawResponse, ApiError> {
        let mut request = HttpRequest::new(method, self.config.url_for(path));
        if let Some(body) = body {
            request = request.with_json(body);
        }
        self.attach_bearer(&mut request);

        let first = match self.transport.execute(request.clone()).await {
            Ok(response) => response,
            // No server response at all: flagged, never refreshed.
            Err(e) => return Err(ApiError::NetworkUnavailable(e.to_string())),
        };

        if first.status != 401 {
            return Ok(first);
        }

        // First 401 for this logical request: join the shared refresh, then
        // replay once. The replay below never re-enters this branch, so a
        // second 401 is final.
        let outcome = self.join_refresh().await;

        let access = match outcome {
            Ok(access) => access,
            Err(err) => {
                self.notify_session_expired();
                return Err(err);
            }
        };

        let mut replay = request;
        replay.set_bearer(&access);

        let second = match self.transport.execute(replay).await {
            Ok(response) => response,
            Err(e) => return Err(ApiError::NetworkUnavailable(e.to_string())),
        };

        if second.status == 401 {
            self.notify_session_expired();
            return Err(ApiError::AuthExpired);
        }

        Ok(second)
    }

    /// Send without credential attachment or refresh handling. Used by the
    /// auth endpoints themselves: a 401 from `auth/token/` is a credential
    /// failure, not an expiry to recover from.
    pub(crate) async fn send_unauthenticated(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<RawResponse, ApiError> {
        let mut request = HttpRequest::new(method, self.config.url_for(path));
        if let Some(body) = body {
            request = request.with_json(body);
        }

        self.transport
            .execute(request)
            .await
            .map_err(|e| ApiError::NetworkUnavailable(e.to_string()))
    }

    /// Join the in-flight refresh, or start one if this is the first 401 of
    /// the cycle.
    fn join_refresh(&self) -> RefreshFuture {
        let mut slot = self.refresh_in_flight.borrow_mut();
        if let Some(pending) = slot.as_ref() {
            return pending.clone();
        }

        let store = Rc::clone(&self.store);
        let transport = Rc::clone(&self.transport);
        let url = self.config.url_for(REFRESH_PATH);
        let slot_handle = Rc::clone(&self.refresh_in_flight);
        let pending = async move {
            let result = run_refresh(store, transport, url).await;
            // This cycle is settled; the next 401 starts a new one.
            slot_handle.borrow_mut().take();
            result
        }
        .boxed_local()
        .shared();
        *slot = Some(pending.clone());
        pending
    }
}

/// Exchange the stored refresh token for a new pair. On any failure the
/// store is cleared: the pair is replaced atomically or not at all.
async fn run_refresh(
    store: Rc<dyn TokenStore>,
    transport: Rc<dyn HttpTransport>,
    url: String,
) -> Result<String, ApiError> {
    let Some(refresh_token) = store.get_refresh() else {
        store.clear();
        return Err(ApiError::AuthExpired);
    };

    let request = HttpRequest::new(HttpMethod::Post, url)
        .with_json(serde_json::json!({ "refresh": refresh_token }));

    let response = match transport.execute(request).await {
        Ok(response) => response,
        Err(e) => {
            store.clear();
            return Err(ApiError::AuthRefreshFailed(e.to_string()));
        }
    };

    if !response.is_success() {
        store.clear();
        let detail = ApiError::from_response(response.status, &response.body)
            .details()
            .unwrap_or_default();
        return Err(ApiError::AuthRefreshFailed(detail));
    }

    let pair: RefreshedPair = match serde_json::from_str(&response.body) {
        Ok(pair) => pair,
        Err(e) => {
            store.clear();
            return Err(ApiError::AuthRefreshFailed(e.to_string()));
        }
    };

    // A logout may have raced this refresh; the store was cleared on
    // purpose and the fresh pair must not resurrect the session.
    if store.get_refresh().is_none() {
        return Err(ApiError::AuthExpired);
    }

    store.set(&pair.access, &pair.refresh);
    Ok(pair.access)
}

fn to_json(body: &impl Serialize) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Deserialize a 2xx body, or classify the failure.
pub(crate) fn parse_json<T: DeserializeOwned>(response: RawResponse) -> Result<T, ApiError> {
    if response.is_success() {
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    } else {
        Err(ApiError::from_response(response.status, &response.body))
    }
}
