//! Session state machine.
//!
//! Pure transition logic, kept free of signals and browser APIs so the whole
//! machine runs under native tests. The reactive wrapper lives in
//! `ui::auth::context`.
//!
//! States: `Loading` (stored credential not examined yet), then either
//! `Authenticated(claims)` or `Anonymous`. Hydration never touches the
//! network: an expired-but-present access token yields `Anonymous` and the
//! first authenticated call pays one 401-plus-refresh round trip instead.

use crate::core::claims::{AccessClaims, Role, decode_access_claims};
use crate::core::token_store::TokenStore;

/// Current session, as derived from the stored access token.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Initial state, before the stored credential has been examined.
    #[default]
    Loading,
    /// Valid access token on hand; claims are a derived view, never
    /// persisted separately.
    Authenticated(AccessClaims),
    /// No session. Either nothing stored, or the stored credential is
    /// expired/undecodable.
    Anonymous,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn claims(&self) -> Option<&AccessClaims> {
        match self {
            SessionState::Authenticated(claims) => Some(claims),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.claims().map(|c| c.role)
    }
}

/// What a route guard should do for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session still hydrating: render the loading surface, not the page.
    Wait,
    /// Render the guarded page.
    Allow,
    /// No session: go to the login surface.
    ToLogin,
    /// Authenticated but the role is outside the allowed set: go to the
    /// safe default surface, never a hard error page.
    ToHome,
}

/// Derive the session from the token store at startup.
///
/// * nothing stored: `Anonymous`;
/// * undecodable token: the pair is junk, clear it, `Anonymous`;
/// * decodable but expired: `Anonymous`, pair KEPT so the reactive refresh
///   path can redeem it on the next API call;
/// * decodable and fresh: `Authenticated`.
pub fn hydrate_session(store: &dyn TokenStore, now: i64) -> SessionState {
    let Some(access) = store.get_access() else {
        return SessionState::Anonymous;
    };

    match decode_access_claims(&access) {
        Ok(claims) if !claims.is_expired(now) => SessionState::Authenticated(claims),
        Ok(_) => SessionState::Anonymous,
        Err(_) => {
            store.clear();
            SessionState::Anonymous
        }
    }
}

/// Gate a surface on an allowed-role set.
///
/// An empty `allowed` slice means "any authenticated user".
pub fn check_access(state: &SessionState, allowed: &[Role]) -> RouteDecision {
    match state {
        SessionState::Loading => RouteDecision::Wait,
        SessionState::Anonymous => RouteDecision::ToLogin,
        SessionState::Authenticated(claims) => {
            if allowed.is_empty() || allowed.contains(&claims.role) {
                RouteDecision::Allow
            } else {
                RouteDecision::ToHome
            }
        }
    }
}
