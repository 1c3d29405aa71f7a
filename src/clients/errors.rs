//! Transport-level error types.
//!
//! A [`TransportError`] means no HTTP response was obtained at all. Failed
//! HTTP statuses are not transport errors; they are returned as
//! [`HttpResponse`](crate::clients::HttpResponse) values and judged by the
//! query layer.

use thiserror::Error;

/// Error returned when the transport cannot complete an exchange.
///
/// # Example
///
/// ```rust
/// use openalex::clients::TransportError;
///
/// let error = TransportError::Connect {
///     message: "connection refused".to_string(),
/// };
/// assert!(error.is_retryable());
/// assert!(error.to_string().contains("connection refused"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The host could not be reached.
    #[error("Could not connect to OpenAlex: {message}")]
    Connect {
        /// Description from the underlying client.
        message: String,
    },

    /// The request timed out.
    #[error("Request to OpenAlex timed out: {message}")]
    Timeout {
        /// Description from the underlying client.
        message: String,
    },

    /// Any other failure (invalid URL, TLS, body decoding).
    #[error("HTTP transport error: {message}")]
    Other {
        /// Description from the underlying client.
        message: String,
    },
}

impl TransportError {
    /// Returns `true` for failures worth another attempt.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Connect { .. } | Self::Timeout { .. })
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        let message = error.to_string();
        if error.is_timeout() {
            Self::Timeout { message }
        } else if error.is_connect() {
            Self::Connect { message }
        } else {
            Self::Other { message }
        }
    }
}
