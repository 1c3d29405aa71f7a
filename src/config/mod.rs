//! Configuration types for the OpenAlex client.
//!
//! # Overview
//!
//! - [`OpenAlexConfig`]: all client settings
//! - [`OpenAlexConfigBuilder`]: a builder for [`OpenAlexConfig`]
//! - [`BaseUrl`]: a validated API base URL
//! - [`MailtoEmail`]: a validated contact address for the polite pool
//!
//! # Example
//!
//! ```rust
//! use openalex::{OpenAlexConfig, MailtoEmail};
//!
//! let config = OpenAlexConfig::builder()
//!     .email(MailtoEmail::new("me@example.com").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://api.openalex.org");
//! ```

mod newtypes;

pub use newtypes::{BaseUrl, MailtoEmail};

use crate::clients::RetryPolicy;
use crate::error::ConfigError;

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "OPENALEX_BASE_URL";

/// Environment variable holding the contact email.
pub const EMAIL_ENV: &str = "OPENALEX_MAILTO_EMAIL";

/// Configuration for the OpenAlex client.
///
/// `OpenAlexConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug, Default)]
pub struct OpenAlexConfig {
    base_url: BaseUrl,
    email: Option<MailtoEmail>,
    retry_policy: RetryPolicy,
    user_agent_prefix: Option<String>,
}

impl OpenAlexConfig {
    /// Creates a new builder for constructing an `OpenAlexConfig`.
    #[must_use]
    pub fn builder() -> OpenAlexConfigBuilder {
        OpenAlexConfigBuilder::new()
    }

    /// Loads configuration from `OPENALEX_BASE_URL` and `OPENALEX_MAILTO_EMAIL`.
    ///
    /// Unset or empty variables fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let present = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let mut builder = Self::builder();
        if let Some(url) = present(BASE_URL_ENV) {
            builder = builder.base_url(BaseUrl::new(url)?);
        }
        if let Some(email) = present(EMAIL_ENV) {
            builder = builder.email(MailtoEmail::new(email)?);
        }
        builder.build()
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the contact email, if configured.
    #[must_use]
    pub const fn email(&self) -> Option<&MailtoEmail> {
        self.email.as_ref()
    }

    /// Returns the retry policy applied to every request.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify OpenAlexConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OpenAlexConfig>();
};

/// Builder for constructing [`OpenAlexConfig`] instances.
///
/// Every field is optional.
///
/// # Defaults
///
/// - `base_url`: `https://api.openalex.org`
/// - `email`: `None`
/// - `retry_policy`: 3 attempts, 100 ms initial backoff
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct OpenAlexConfigBuilder {
    base_url: Option<BaseUrl>,
    email: Option<MailtoEmail>,
    retry_policy: Option<RetryPolicy>,
    user_agent_prefix: Option<String>,
}

impl OpenAlexConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the contact email sent in the `User-Agent` header.
    #[must_use]
    pub fn email(mut self, email: MailtoEmail) -> Self {
        self.email = Some(email);
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub const fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Sets a prefix prepended to the `User-Agent` header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`OpenAlexConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRetryPolicy`] if the retry policy allows
    /// zero attempts.
    pub fn build(self) -> Result<OpenAlexConfig, ConfigError> {
        let retry_policy = self.retry_policy.unwrap_or_default();
        if retry_policy.max_attempts() == 0 {
            return Err(ConfigError::InvalidRetryPolicy {
                reason: "max_attempts must be at least 1".to_string(),
            });
        }

        Ok(OpenAlexConfig {
            base_url: self.base_url.unwrap_or_default(),
            email: self.email,
            retry_policy,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = OpenAlexConfig::builder().build().unwrap();

        assert_eq!(config.base_url().as_ref(), "https://api.openalex.org");
        assert!(config.email().is_none());
        assert_eq!(config.retry_policy().max_attempts(), 3);
        assert_eq!(
            config.retry_policy().initial_backoff(),
            Duration::from_millis(100)
        );
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = OpenAlexConfig::builder()
            .base_url(BaseUrl::new("http://localhost:9000").unwrap())
            .email(MailtoEmail::new("me@example.com").unwrap())
            .retry_policy(RetryPolicy::new(5, Duration::from_millis(10)))
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();

        assert_eq!(config.base_url().as_ref(), "http://localhost:9000");
        assert_eq!(config.email().unwrap().as_ref(), "me@example.com");
        assert_eq!(config.retry_policy().max_attempts(), 5);
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
    }

    #[test]
    fn test_builder_rejects_zero_attempts() {
        let result = OpenAlexConfig::builder()
            .retry_policy(RetryPolicy::new(0, Duration::ZERO))
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::InvalidRetryPolicy { .. })
        ));
    }

    #[test]
    fn test_from_lookup_reads_both_settings() {
        let config = OpenAlexConfig::from_lookup(lookup(&[
            (BASE_URL_ENV, "https://openalex.test/"),
            (EMAIL_ENV, "team@example.org"),
        ]))
        .unwrap();

        assert_eq!(config.base_url().as_ref(), "https://openalex.test");
        assert_eq!(config.email().unwrap().as_ref(), "team@example.org");
    }

    #[test]
    fn test_from_lookup_ignores_empty_values() {
        let config =
            OpenAlexConfig::from_lookup(lookup(&[(BASE_URL_ENV, ""), (EMAIL_ENV, "  ")])).unwrap();

        assert_eq!(config.base_url(), &BaseUrl::default());
        assert!(config.email().is_none());
    }

    #[test]
    fn test_from_lookup_rejects_invalid_email() {
        let result = OpenAlexConfig::from_lookup(lookup(&[(EMAIL_ENV, "not-an-email")]));
        assert!(matches!(result, Err(ConfigError::InvalidEmail { .. })));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OpenAlexConfig>();
    }
}
