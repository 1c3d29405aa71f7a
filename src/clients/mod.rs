//! HTTP client types for OpenAlex API communication.
//!
//! This module provides the HTTP layer underneath the query builder.
//!
//! # Overview
//!
//! - [`HttpClient`]: adds default headers and applies the retry policy
//! - [`HttpTransport`]: the single-attempt transport seam
//! - [`ReqwestTransport`]: the default `reqwest`-backed transport
//! - [`HttpRequest`]: a `GET` request with ordered query parameters
//! - [`HttpResponse`]: status, headers and body of a response
//! - [`RetryPolicy`]: attempt count and backoff
//! - [`TransportError`]: no response could be obtained
//!
//! # Retry Behavior
//!
//! - **429 (Rate Limited)**: retried, honouring a numeric `Retry-After`
//! - **5xx (Server Error)**: retried with exponential backoff
//! - **Connect/timeout failures**: retried with exponential backoff
//! - **Other statuses (including 404)**: returned immediately
//!
//! The default policy makes 3 attempts with a 100 ms initial delay.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use openalex::OpenAlexConfig;
//! use openalex::clients::{HttpClient, HttpRequest, ReqwestTransport, RetryPolicy};
//!
//! let client = HttpClient::new(Arc::new(ReqwestTransport::new()), &OpenAlexConfig::default());
//!
//! let request = HttpRequest::builder("https://api.openalex.org/works")
//!     .query_param("search", "graphene")
//!     .retry_policy(RetryPolicy::default())
//!     .build();
//!
//! let response = client.request(request).await?;
//! ```

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod retry;
mod transport;

pub use errors::TransportError;
pub use http_client::{HttpClient, CLIENT_VERSION};
pub use http_request::{HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use retry::{RetryPolicy, DEFAULT_INITIAL_BACKOFF, DEFAULT_MAX_ATTEMPTS};
pub use transport::{HttpTransport, ReqwestTransport};
