//! The transport seam between the query layer and the network.
//!
//! An [`HttpTransport`] performs exactly one attempt per call. Retries,
//! default headers, and status interpretation live above it, in
//! [`HttpClient`](crate::clients::HttpClient) and the query builder.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::clients::{HttpRequest, HttpResponse, TransportError};

/// Performs a single HTTP `GET` exchange.
///
/// Implementations must return `Ok` for every response that arrived,
/// whatever its status, and `Err` only when no response was obtained.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use openalex::clients::{HttpRequest, HttpResponse, HttpTransport, TransportError};
/// use std::collections::HashMap;
///
/// struct Offline;
///
/// #[async_trait]
/// impl HttpTransport for Offline {
///     async fn send(&self, _request: &HttpRequest) -> Result<HttpResponse, TransportError> {
///         Ok(HttpResponse::new(503, HashMap::new(), ""))
///     }
/// }
/// ```
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends one attempt of the request.
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// The default transport, backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a rustls-backed `reqwest` client.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }

    /// Wraps an existing `reqwest` client (for custom timeouts or proxies).
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.get(request.full_url());
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        let res = builder.send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        Ok(HttpResponse::new(code, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_sends_query_and_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/works"))
            .and(query_param("filter", "type:article"))
            .and(header("Accept", "application/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("X-Request-Id", "req-1")
                    .set_body_string(r#"{"results":[]}"#),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let request = HttpRequest::builder(format!("{}/works", mock_server.uri()))
            .query_param("filter", "type:article")
            .header("Accept", "application/json")
            .build();

        let response = ReqwestTransport::new().send(&request).await.unwrap();
        assert_eq!(response.code, 200);
        assert_eq!(response.request_id(), Some("req-1"));
        assert_eq!(response.body, r#"{"results":[]}"#);
    }

    #[tokio::test]
    async fn test_failed_status_is_still_a_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Server Error"))
            .mount(&mock_server)
            .await;

        let request = HttpRequest::builder(format!("{}/works", mock_server.uri())).build();
        let response = ReqwestTransport::new().send(&request).await.unwrap();

        assert_eq!(response.code, 500);
        assert!(response.failed());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Port 9 (discard) on localhost is almost never listening.
        let request = HttpRequest::builder("http://127.0.0.1:9/works").build();
        let result = ReqwestTransport::new().send(&request).await;

        assert!(result.is_err());
    }
}
