//! HTTP client for OpenAlex API communication.
//!
//! This module provides the [`HttpClient`] type, which adds default
//! headers to every request and applies the request's [`RetryPolicy`]
//! on top of a single-attempt [`HttpTransport`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::clients::{HttpRequest, HttpResponse, HttpTransport, RetryPolicy, TransportError};
use crate::config::OpenAlexConfig;

/// Client version from Cargo.toml.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the OpenAlex API.
///
/// The client handles:
/// - Default headers (`Accept`, and `User-Agent` carrying the contact email)
/// - Automatic retries for 429, 5xx and connection failures
///
/// After the last attempt the final outcome is returned as-is: a failed
/// status is an `Ok(HttpResponse)`, and only a transport failure is an
/// `Err`. Interpreting the status is the caller's job.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn HttpTransport>,
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Creates a new HTTP client over the given transport.
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>, config: &OpenAlexConfig) -> Self {
        let user_agent = config.email().map_or_else(
            || format!("openalex-rust/{CLIENT_VERSION}"),
            |email| format!("mailto:{}", email.as_ref()),
        );
        let user_agent = match config.user_agent_prefix() {
            Some(prefix) => format!("{prefix} | {user_agent}"),
            None => user_agent,
        };

        let mut default_headers = HashMap::new();
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("User-Agent".to_string(), user_agent);

        Self {
            transport,
            default_headers,
        }
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a request, retrying according to its [`RetryPolicy`].
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the final attempt produced no response.
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut headers = self.default_headers.clone();
        headers.extend(request.headers);
        let request = HttpRequest { headers, ..request };
        let policy = request.retry;

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            tracing::debug!(url = %request.full_url(), attempt, "Sending OpenAlex request");

            let outcome = self.transport.send(&request).await;

            let retryable = match &outcome {
                Ok(response) => !response.is_ok() && policy.should_retry_status(response.code),
                Err(error) => error.is_retryable(),
            };
            if !retryable || attempt >= policy.max_attempts() {
                return outcome;
            }

            let delay = Self::calculate_retry_delay(&policy, &outcome, attempt);
            match &outcome {
                Ok(response) => tracing::warn!(
                    url = %request.url,
                    status = response.code,
                    attempt,
                    "OpenAlex request failed, retrying in {:?}",
                    delay
                ),
                Err(error) => tracing::warn!(
                    url = %request.url,
                    %error,
                    attempt,
                    "OpenAlex request failed, retrying in {:?}",
                    delay
                ),
            }
            tokio::time::sleep(delay).await;
        }
    }

    /// Calculates the retry delay. A 429 with `Retry-After` waits as instructed.
    fn calculate_retry_delay(
        policy: &RetryPolicy,
        outcome: &Result<HttpResponse, TransportError>,
        attempt: u32,
    ) -> Duration {
        if let Ok(response) = outcome {
            if response.code == 429 {
                if let Some(retry_after) = response.retry_after() {
                    return retry_after;
                }
            }
        }
        policy.backoff_for(attempt)
    }
}
