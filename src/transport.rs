//! The HTTP transport seam.
//!
//! The client facade renders every operation into an [`HttpRequest`] and
//! hands it to an [`HttpTransport`]. The default implementation is
//! [`ReqwestTransport`]; tests substitute stubs. Connection pooling,
//! timeouts, and TLS all live behind this trait — the facade only surfaces
//! whatever failure the transport reports.

use std::fmt;

use async_trait::async_trait;
use url::Url;

use crate::error::BoxError;

/// HTTP methods used by the Pinecone REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// A fully rendered request, ready to be sent.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    /// Header name/value pairs, including authentication.
    pub headers: Vec<(String, String)>,
    /// JSON body bytes, when the operation carries one.
    pub body: Option<Vec<u8>>,
}

/// A raw response as reported by the transport.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Whether the status is one the API treats as success (200, 201, 202).
    pub fn is_success(&self) -> bool {
        matches!(self.status, 200 | 201 | 202)
    }
}

/// Performs a single HTTP exchange.
///
/// Implementations must be safe to share across concurrent callers; the
/// facade issues requests from multiple tasks against one transport
/// instance. Ordering between concurrent requests is unspecified.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send the request and return the raw response, or fail with a
    /// transport-level error (connection refused, timeout, TLS failure).
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, BoxError>;
}

/// The default transport, backed by [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| Box::new(e) as BoxError)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value.to_str().ok().map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await.map_err(|e| Box::new(e) as BoxError)?.to_vec();

        Ok(HttpResponse { status, headers, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_display_matches_http_verbs() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
        assert_eq!(Method::Patch.to_string(), "PATCH");
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }

    #[test]
    fn accepted_statuses_count_as_success() {
        for status in [200, 201, 202] {
            let response = HttpResponse { status, headers: vec![], body: vec![] };
            assert!(response.is_success());
        }
        for status in [204, 301, 400, 404, 500] {
            let response = HttpResponse { status, headers: vec![], body: vec![] };
            assert!(!response.is_success());
        }
    }
}
