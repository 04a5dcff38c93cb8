//! Session context.
//!
//! Reactive wrapper around the pure session machine in `core::session`:
//! - hydrates from localStorage after mount (no network before first paint),
//! - exposes login/logout/register actions,
//! - listens for the client's session-expired signal and drops to Anonymous
//!   with a redirect to the login surface.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::__reexports::send_wrapper::SendWrapper;

use crate::core::auth::{AuthService, ProfileSummary};
#[cfg(not(feature = "ssr"))]
use crate::core::claims::decode_access_claims;
use crate::core::claims::{AccessClaims, Role};
use crate::core::client::ApiClient;
use crate::core::error::ApiError;
use crate::core::session::SessionState;

/// Shared handle to the one API client of the app, provided at bootstrap.
#[derive(Clone)]
pub struct ApiHandle(pub SendWrapper<Rc<ApiClient>>);

/// Session context providing the current state and operation flags.
#[derive(Clone, Copy)]
pub struct SessionContext {
    /// Current session state.
    pub state: RwSignal<SessionState>,
    /// An auth operation (login/register) is in flight.
    pub pending: RwSignal<bool>,
    /// Display message from the last failed auth operation.
    pub error: RwSignal<Option<String>>,
}

impl SessionContext {
    pub fn is_authenticated(&self) -> bool {
        self.state.get().is_authenticated()
    }

    pub fn claims(&self) -> Option<AccessClaims> {
        self.state.get().claims().cloned()
    }

    pub fn role(&self) -> Option<Role> {
        self.state.get().role()
    }

    pub fn clear_error(&self) {
        self.error.set(None);
    }
}

/// Provide the API client and the session context to the component tree.
///
/// The state starts as `Loading` on both server and client; the client
/// resolves it from localStorage in a post-hydration effect, so SSR and the
/// first client render agree.
pub fn provide_session_context() -> SessionContext {
    #[cfg(not(feature = "ssr"))]
    let client = Rc::new(ApiClient::browser());
    #[cfg(feature = "ssr")]
    let client = Rc::new(ApiClient::server_stub());

    let state = RwSignal::new(SessionState::Loading);
    let pending = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let ctx = SessionContext {
        state,
        pending,
        error,
    };

    #[cfg(not(feature = "ssr"))]
    {
        use crate::core::session::hydrate_session;
        use crate::core::token_store::BrowserTokenStore;

        // Irrecoverable auth loss (failed refresh, replayed 401): drop to
        // Anonymous and send the user to the login surface.
        client.set_session_expired_hook(move || {
            leptos::logging::warn!("Session expirée, redirection vers /login");
            state.set(SessionState::Anonymous);
            redirect_to_login();
        });

        // Restore the session from localStorage after hydration. Purely
        // local: an expired access token stays Anonymous here and is
        // redeemed by the refresh path on the first API call.
        Effect::new(move |_| {
            state.set(hydrate_session(&BrowserTokenStore, now_seconds()));
        });
    }

    provide_context(ApiHandle(SendWrapper::new(client)));
    provide_context(ctx);
    ctx
}

/// Get the session context from the component tree.
pub fn use_session_context() -> SessionContext {
    expect_context::<SessionContext>()
}

/// Log in and transition the session.
///
/// On success the token pair is already persisted (the auth service stores
/// it before returning) and the state becomes `Authenticated`. On failure
/// the state is `Anonymous`, the error signal carries a display message and
/// the error is returned for the form to inspect.
#[cfg(not(feature = "ssr"))]
pub async fn login(username: &str, password: &str) -> Result<(), ApiError> {
    let ctx = use_session_context();
    let api = expect_context::<ApiHandle>();

    ctx.pending.set(true);
    ctx.error.set(None);

    let service = AuthService::new(Rc::clone(&api.0));
    let result = service.login(username, password).await;
    ctx.pending.set(false);

    match result {
        Ok(pair) => match decode_access_claims(&pair.access) {
            Ok(claims) => {
                ctx.state.set(SessionState::Authenticated(claims));
                Ok(())
            }
            Err(e) => {
                // The backend issued a token this client cannot read; treat
                // it as a failed login rather than a half-open session.
                service.logout();
                ctx.state.set(SessionState::Anonymous);
                let err = ApiError::Decode(e.to_string());
                ctx.error.set(Some(display_message(&err)));
                Err(err)
            }
        },
        Err(err) => {
            ctx.state.set(SessionState::Anonymous);
            ctx.error.set(Some(display_message(&err)));
            Err(err)
        }
    }
}

#[cfg(feature = "ssr")]
pub async fn login(_username: &str, _password: &str) -> Result<(), ApiError> {
    Err(ApiError::NetworkUnavailable(
        "login is not available on the server".into(),
    ))
}

/// Create an account. Does not log in; the caller navigates to the login
/// surface on success.
#[cfg(not(feature = "ssr"))]
pub async fn register(
    username: &str,
    email: &str,
    password: &str,
) -> Result<ProfileSummary, ApiError> {
    let ctx = use_session_context();
    let api = expect_context::<ApiHandle>();

    ctx.pending.set(true);
    ctx.error.set(None);

    let service = AuthService::new(Rc::clone(&api.0));
    let result = service.register(username, email, password).await;
    ctx.pending.set(false);

    if let Err(ref err) = result {
        ctx.error.set(Some(display_message(err)));
    }

    result
}

#[cfg(feature = "ssr")]
pub async fn register(
    _username: &str,
    _email: &str,
    _password: &str,
) -> Result<ProfileSummary, ApiError> {
    Err(ApiError::NetworkUnavailable(
        "register is not available on the server".into(),
    ))
}

/// Log out: clear the stored pair and transition to Anonymous. Local only.
pub fn logout() {
    let ctx = use_session_context();
    let api = expect_context::<ApiHandle>();

    AuthService::new(Rc::clone(&api.0)).logout();
    ctx.state.set(SessionState::Anonymous);
}

/// Headline plus detail, for the single-line error signal.
#[cfg(not(feature = "ssr"))]
fn display_message(err: &ApiError) -> String {
    match err.details() {
        Some(details) => format!("{}\n{}", err.message(), details),
        None => err.message(),
    }
}

/// Wall clock in Unix seconds, from the browser.
#[cfg(not(feature = "ssr"))]
fn now_seconds() -> i64 {
    (js_sys::Date::now() / 1000.0) as i64
}

#[cfg(not(feature = "ssr"))]
fn redirect_to_login() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href("/login");
    }
}
