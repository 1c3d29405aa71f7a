//! Error types for the OpenAlex client.
//!
//! This module contains the configuration error type and the crate-wide
//! [`OpenAlexError`] returned by every terminal query operation.
//!
//! # Error Handling
//!
//! - [`ConfigError`]: invalid configuration values, reported at build time
//! - [`OpenAlexError::Api`]: a failed HTTP status after retries were exhausted
//! - [`OpenAlexError::UnsupportedOperation`]: an unknown dynamic builder call
//! - [`OpenAlexError::Transport`]: the host could not be reached
//! - [`OpenAlexError::Mapping`]: a payload was missing a required field
//!
//! A 404 on a single-entity lookup is not an error: `find` and `find_by`
//! return `Ok(None)`.
//!
//! # Example
//!
//! ```rust
//! use openalex::{BaseUrl, ConfigError};
//!
//! let result = BaseUrl::new("not a url");
//! assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
//! ```

use thiserror::Error;

use crate::clients::TransportError;

/// Errors that can occur while building an [`OpenAlexConfig`](crate::OpenAlexConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The API base URL is not an absolute http(s) URL.
    #[error("Invalid base URL '{url}'. Expected an absolute URL such as 'https://api.openalex.org'.")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The contact email is malformed.
    #[error("Invalid contact email '{email}'. Expected a single address such as 'me@example.com'.")]
    InvalidEmail {
        /// The invalid email that was provided.
        email: String,
    },

    /// The retry policy cannot be used.
    #[error("Invalid retry policy: {reason}")]
    InvalidRetryPolicy {
        /// Why the policy was rejected.
        reason: String,
    },
}

/// Unified error type for query execution.
#[derive(Debug, Error)]
pub enum OpenAlexError {
    /// The API answered with a failed status after all retries.
    #[error("OpenAlex API error {status}: {reason}")]
    Api {
        /// The HTTP status code of the final attempt.
        status: u16,
        /// The reason phrase of the final attempt.
        reason: String,
    },

    /// An unrecognized dynamic method was called on a query builder.
    #[error("Method {method} does not exist.")]
    UnsupportedOperation {
        /// The method name that was attempted.
        method: String,
    },

    /// The transport could not complete the exchange.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A response payload could not be mapped onto a typed record.
    #[error("Cannot map {entity}.{field}: {reason}")]
    Mapping {
        /// The record being built (e.g. "Work").
        entity: &'static str,
        /// The source field that failed.
        field: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A successful response carried a body that is not JSON.
    #[error("Malformed JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl OpenAlexError {
    /// Returns the HTTP status code for API errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Builds a mapping error for a missing required field.
    pub(crate) fn missing_field(entity: &'static str, field: &str) -> Self {
        Self::Mapping {
            entity,
            field: field.to_string(),
            reason: "required field is missing or null".to_string(),
        }
    }
}
