//! API error taxonomy.
//!
//! Every failed backend call is classified exactly once, centrally, into
//! [`ApiError`]. Call sites display `message()` / `details()` without
//! re-deriving anything from raw status codes. User-facing strings are in
//! French to match the rest of the product surface.

use std::collections::BTreeMap;

use serde_json::Value;

/// Field-level validation errors, as returned by the backend for 400/422.
///
/// Keys are serializer field names (`poids`, `numero_suivi`, ...), values are
/// the messages the backend produced for that field. `non_field_errors` and
/// `detail` land under their own keys and are folded into [`Self::summary`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors(pub BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Parse a DRF error body. Accepts the three shapes the backend emits:
    /// a plain string, `{"detail": "..."}`, or a field → message(s) map.
    pub fn from_body(body: &Value) -> Self {
        let mut map = BTreeMap::new();

        match body {
            Value::String(s) => {
                map.insert("detail".to_string(), vec![s.clone()]);
            }
            Value::Object(fields) => {
                for (field, messages) in fields {
                    let collected = match messages {
                        Value::String(s) => vec![s.clone()],
                        Value::Array(items) => items
                            .iter()
                            .map(|m| match m {
                                Value::String(s) => s.clone(),
                                other => other.to_string(),
                            })
                            .collect(),
                        other => vec![other.to_string()],
                    };
                    if !collected.is_empty() {
                        map.insert(field.clone(), collected);
                    }
                }
            }
            _ => {}
        }

        Self(map)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages for one field, for inline display next to the input.
    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// One line per field, for banner display.
    pub fn summary(&self) -> String {
        self.0
            .iter()
            .flat_map(|(field, messages)| {
                messages.iter().map(move |m| {
                    if field == "detail" || field == "non_field_errors" {
                        m.clone()
                    } else {
                        format!("{field}: {m}")
                    }
                })
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Classified outcome of a failed backend call.
///
/// `Clone` because auth failures travel through a shared refresh future and
/// are observed by every caller that joined it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure, no server response at all. Never retried.
    #[error("Impossible de se connecter à l'API. Vérifiez votre connexion ou réessayez plus tard.")]
    NetworkUnavailable(String),

    /// 401 that survived (or could not attempt) the refresh-and-replay.
    #[error("Session expirée. Veuillez vous reconnecter.")]
    AuthExpired,

    /// The refresh endpoint itself rejected the refresh token.
    #[error("Le renouvellement de la session a échoué.")]
    AuthRefreshFailed(String),

    /// 400/422 with a field-error map for per-field form display.
    #[error("Données invalides")]
    Validation(FieldErrors),

    /// 403; blocking message, never forces a logout.
    #[error("Accès refusé")]
    PermissionDenied(String),

    /// 404.
    #[error("Ressource introuvable")]
    NotFound(String),

    /// 409.
    #[error("Conflit de données")]
    Conflict(String),

    /// 500/502/503/504; "try again later", no automatic retry.
    #[error("Erreur serveur ({status})")]
    Server { status: u16, detail: String },

    /// Any status outside the taxonomy.
    #[error("Erreur {status}")]
    Unexpected { status: u16, detail: String },

    /// 2xx whose body could not be deserialized into the expected type.
    #[error("Réponse du serveur illisible")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-2xx response. 401 is resolved by the caller (the
    /// refresh-and-replay lives in the client, not here); when it reaches
    /// this function the request is final and maps to `AuthExpired`.
    pub fn from_response(status: u16, body: &str) -> Self {
        let json: Value = serde_json::from_str(body).unwrap_or(Value::Null);
        let detail = extract_detail(&json);

        match status {
            400 | 422 => ApiError::Validation(FieldErrors::from_body(&json)),
            401 => ApiError::AuthExpired,
            403 => ApiError::PermissionDenied(
                detail.unwrap_or_else(|| "Vous n'avez pas les permissions nécessaires.".into()),
            ),
            404 => ApiError::NotFound(
                detail.unwrap_or_else(|| "La ressource demandée n'existe pas.".into()),
            ),
            409 => {
                let fields = FieldErrors::from_body(&json);
                ApiError::Conflict(detail.unwrap_or_else(|| fields.summary()))
            }
            500 | 502 | 503 | 504 => ApiError::Server {
                status,
                detail: detail
                    .unwrap_or_else(|| "Le serveur ne répond pas. Réessayez plus tard.".into()),
            },
            _ => ApiError::Unexpected {
                status,
                detail: detail.unwrap_or_default(),
            },
        }
    }

    /// Headline for toasts and banners.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Secondary line, when there is something more specific to show.
    pub fn details(&self) -> Option<String> {
        match self {
            ApiError::NetworkUnavailable(detail) | ApiError::AuthRefreshFailed(detail) => {
                (!detail.is_empty()).then(|| detail.clone())
            }
            ApiError::Validation(fields) => {
                (!fields.is_empty()).then(|| fields.summary())
            }
            ApiError::PermissionDenied(detail)
            | ApiError::NotFound(detail)
            | ApiError::Conflict(detail)
            | ApiError::Decode(detail) => (!detail.is_empty()).then(|| detail.clone()),
            ApiError::Server { detail, .. } | ApiError::Unexpected { detail, .. } => {
                (!detail.is_empty()).then(|| detail.clone())
            }
            ApiError::AuthExpired => None,
        }
    }

    /// True for transport failures with no server response.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::NetworkUnavailable(_))
    }

    /// True for the error kinds that force the session to Anonymous.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::AuthExpired | ApiError::AuthRefreshFailed(_))
    }

    /// True for 400/422 with a field map to project onto a form.
    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}

/// Pull `{"detail": "..."}` out of an error body, when present.
fn extract_detail(json: &Value) -> Option<String> {
    json.get("detail")
        .and_then(Value::as_str)
        .map(str::to_string)
}
