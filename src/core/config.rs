//! API endpoint configuration.
//!
//! The base URL is resolved at compile time with `option_env!` because the
//! WASM bundle has no runtime environment: whatever the build pipeline
//! exported is what the browser gets. Several variable names are honored so
//! the same setup works from a plain shell, a Vite pipeline, or a CRA-era
//! deployment script.

/// Fallback used when no environment variable is set at build time.
const DEFAULT_API_URL: &str = "http://localhost:8000/api/";

/// Resolved API endpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the REST backend, normalized to exactly one trailing `/`.
    pub base_url: String,
}

impl ApiConfig {
    /// Build a config from an explicit base URL (normalized).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
        }
    }

    /// Resolve the base URL from the compile-time environment.
    ///
    /// Priority: `COLISFLOW_API_URL`, then the bundler-style names the
    /// deployment scripts historically used, then the local development
    /// default.
    pub fn from_env() -> Self {
        let raw = option_env!("COLISFLOW_API_URL")
            .or(option_env!("API_BASE_URL"))
            .or(option_env!("VITE_API_URL"))
            .or(option_env!("REACT_APP_API_URL"))
            .unwrap_or(DEFAULT_API_URL);

        Self::new(raw)
    }

    /// Join a relative endpoint path onto the base URL.
    ///
    /// `path` must not start with `/`; resource roots keep the Django
    /// convention of a trailing slash (`colis/`, `auth/token/`).
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Normalize a base URL so it ends with exactly one `/`.
fn normalize_base_url(raw: &str) -> String {
    format!("{}/", raw.trim_end_matches('/'))
}
