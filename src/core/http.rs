//! HTTP transport seam.
//!
//! [`ApiClient`](crate::core::client::ApiClient) speaks to the network
//! through the [`HttpTransport`] trait so the refresh-and-replay logic can
//! run natively under test with a scripted transport. The real transport is
//! a thin `gloo-net` fetch wrapper, client-side only; the server build gets
//! a stub that fails like an unreachable network.

use async_trait::async_trait;

/// HTTP methods used by the backend contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// One outgoing request, fully resolved (absolute URL, final headers).
///
/// `Clone` so the 401 handler can replay the identical request with a fresh
/// Authorization header.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    /// Header name/value pairs. Setting an existing name overwrites it, so
    /// header injection is idempotent.
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    /// New request with the client-wide default `Content-Type` header.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: None,
        }
    }

    /// Set a header, replacing any previous value for the same name.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(entry) = self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            entry.1 = value;
        } else {
            self.headers.push((name.to_string(), value));
        }
    }

    /// Set the bearer credential. Idempotent: re-attaching overwrites.
    pub fn set_bearer(&mut self, token: &str) {
        self.set_header("Authorization", format!("Bearer {token}"));
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Raw response as seen before classification: a status and a body string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport-level failure: the server never answered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Executes a single request. No auth, no retry, no classification; those
/// belong to the client layer above.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn execute(&self, request: HttpRequest) -> Result<RawResponse, TransportError>;
}

/// Browser transport over `gloo-net` fetch.
#[cfg(not(feature = "ssr"))]
pub struct FetchTransport;

#[cfg(not(feature = "ssr"))]
#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn execute(&self, request: HttpRequest) -> Result<RawResponse, TransportError> {
        use gloo_net::http::{Method, RequestBuilder};

        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        };

        let mut builder = RequestBuilder::new(&request.url).method(method);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let ready = match &request.body {
            Some(json) => builder
                .body(json.to_string())
                .map_err(|e| TransportError(e.to_string()))?,
            None => builder
                .build()
                .map_err(|e| TransportError(e.to_string()))?,
        };

        let response = ready
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status();
        // An unreadable body is not a transport failure; classification will
        // fall back on the status code alone.
        let body = response.text().await.unwrap_or_default();

        Ok(RawResponse { status, body })
    }
}

/// Server-side stub. The backend is only ever called from the browser; any
/// attempt during SSR fails like an unreachable network.
#[cfg(feature = "ssr")]
pub struct ServerStubTransport;

#[cfg(feature = "ssr")]
#[async_trait(?Send)]
impl HttpTransport for ServerStubTransport {
    async fn execute(&self, _request: HttpRequest) -> Result<RawResponse, TransportError> {
        Err(TransportError("API calls are not available on the server".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_carries_json_content_type() {
        let req = HttpRequest::new(HttpMethod::Get, "http://localhost:8000/api/colis/");
        assert_eq!(req.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_set_header_overwrites_case_insensitively() {
        let mut req = HttpRequest::new(HttpMethod::Get, "http://x/");
        req.set_header("authorization", "Bearer one");
        req.set_header("Authorization", "Bearer two");

        assert_eq!(req.header("Authorization"), Some("Bearer two"));
        assert_eq!(
            req.headers
                .iter()
                .filter(|(name, _)| name.eq_ignore_ascii_case("authorization"))
                .count(),
            1
        );
    }

    #[test]
    fn test_set_bearer_formats_authorization_header() {
        let mut req = HttpRequest::new(HttpMethod::Post, "http://x/");
        req.set_bearer("abc123");
        assert_eq!(req.header("Authorization"), Some("Bearer abc123"));
    }

    #[test]
    fn test_success_range() {
        assert!(RawResponse { status: 200, body: String::new() }.is_success());
        assert!(RawResponse { status: 204, body: String::new() }.is_success());
        assert!(!RawResponse { status: 401, body: String::new() }.is_success());
        assert!(!RawResponse { status: 500, body: String::new() }.is_success());
    }
}
