//! Access-token claims.
//!
//! The access token is decoded client-side WITHOUT verifying its signature.
//! That is deliberate and safe only because the decoded claims drive UI
//! affordances (which menus to show, which routes to allow): the backend
//! re-verifies the signature on every request, and a tampered local token
//! buys an attacker nothing but a broken-looking UI. Client-side decode must
//! never be treated as an authorization boundary.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

/// Application roles, as issued by the backend in the `role` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Operateur,
    Gestionnaire,
    Livreur,
}

impl Role {
    /// The wire value, which is also the display value used across the app.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Operateur => "OPERATEUR",
            Role::Gestionnaire => "GESTIONNAIRE",
            Role::Livreur => "LIVREUR",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims embedded in the access token by the backend's token endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject id (`user_id` claim).
    pub user_id: i64,
    pub username: String,
    pub role: Role,
    /// Expiry, Unix seconds.
    pub exp: i64,
}

impl AccessClaims {
    pub fn is_expired(&self, now: i64) -> bool {
        self.exp <= now
    }
}

/// Failure modes of the local decode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClaimsError {
    #[error("token is not a three-part JWT")]
    Malformed,

    #[error("token payload is not valid base64url")]
    Base64,

    #[error("token payload is not the expected claim set: {0}")]
    Payload(String),
}

/// Decode the payload segment of a JWT without signature verification.
///
/// Accepts both padded and unpadded base64url payloads.
pub fn decode_access_claims(token: &str) -> Result<AccessClaims, ClaimsError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(ClaimsError::Malformed);
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|_| ClaimsError::Base64)?;

    serde_json::from_slice(&bytes).map_err(|e| ClaimsError::Payload(e.to_string()))
}

/// Token fabrication helpers shared by the test suites of this module, the
/// session machine and the HTTP client.
#[cfg(test)]
pub(crate) mod test_tokens {
    use super::URL_SAFE_NO_PAD;
    use base64::Engine as _;

    /// Build an unsigned token with the given payload.
    pub(crate) fn token_with_payload(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        format!("{header}.{body}.signature")
    }

    pub(crate) fn token_for(username: &str, role: &str, exp: i64) -> String {
        token_with_payload(&serde_json::json!({
            "token_type": "access",
            "user_id": 7,
            "username": username,
            "role": role,
            "exp": exp,
            "iat": exp - 900,
            "jti": "abc123",
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::test_tokens::{token_for, token_with_payload};
    use super::*;

    #[test]
    fn test_decode_valid_token() {
        let token = token_for("alice", "OPERATEUR", 2_000_000_000);
        let claims = decode_access_claims(&token).unwrap();

        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, Role::Operateur);
        assert_eq!(claims.exp, 2_000_000_000);
    }

    #[test]
    fn test_decode_ignores_extra_claims() {
        // SimpleJWT adds iat/jti/token_type; the decoder only cares about
        // the claims the UI consumes.
        let token = token_for("bob", "ADMIN", 1_900_000_000);
        assert!(decode_access_claims(&token).is_ok());
    }

    #[test]
    fn test_decode_accepts_padded_payload() {
        let token = token_for("alice", "LIVREUR", 2_000_000_000);
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        parts[1].push('=');
        let padded = parts.join(".");

        assert!(decode_access_claims(&padded).is_ok());
    }

    #[test]
    fn test_two_part_token_is_malformed() {
        assert_eq!(
            decode_access_claims("onlyheader.payload"),
            Err(ClaimsError::Malformed)
        );
    }

    #[test]
    fn test_garbage_payload_is_base64_error() {
        assert_eq!(
            decode_access_claims("h.!!!not-base64!!!.s"),
            Err(ClaimsError::Base64)
        );
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let token = token_for("mallory", "SUPERUSER", 2_000_000_000);
        assert!(matches!(
            decode_access_claims(&token),
            Err(ClaimsError::Payload(_))
        ));
    }

    #[test]
    fn test_missing_claim_is_rejected() {
        let token = token_with_payload(&serde_json::json!({
            "user_id": 7,
            "exp": 2_000_000_000,
        }));
        assert!(matches!(
            decode_access_claims(&token),
            Err(ClaimsError::Payload(_))
        ));
    }

    #[test]
    fn test_expiry_boundary() {
        let token = token_for("alice", "OPERATEUR", 1_000);
        let claims = decode_access_claims(&token).unwrap();

        assert!(!claims.is_expired(999));
        assert!(claims.is_expired(1_000));
        assert!(claims.is_expired(1_001));
    }

    #[test]
    fn test_role_wire_format_round_trip() {
        for (role, wire) in [
            (Role::Admin, "\"ADMIN\""),
            (Role::Operateur, "\"OPERATEUR\""),
            (Role::Gestionnaire, "\"GESTIONNAIRE\""),
            (Role::Livreur, "\"LIVREUR\""),
        ] {
            assert_eq!(serde_json::to_string(&role).unwrap(), wire);
            assert_eq!(serde_json::from_str::<Role>(wire).unwrap(), role);
            assert_eq!(format!("\"{role}\""), wire);
        }
    }
}
