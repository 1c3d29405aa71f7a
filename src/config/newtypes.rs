//! Validated newtype wrappers for configuration values.
//!
//! Invalid values are rejected on construction with a [`ConfigError`].

use crate::error::ConfigError;
use std::fmt;

/// A validated OpenAlex API base URL.
///
/// Must be an absolute `http` or `https` URL. A trailing slash is trimmed
/// so that entity paths can be appended with a single `/`.
///
/// # Example
///
/// ```rust
/// use openalex::BaseUrl;
///
/// let url = BaseUrl::new("https://api.openalex.org/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.openalex.org");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// The public OpenAlex endpoint.
    pub const DEFAULT: &'static str = "https://api.openalex.org";

    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no http(s)
    /// scheme, no host, or contains whitespace.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');

        let host = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"));

        match host {
            Some(rest) if !rest.is_empty() && !rest.contains(char::is_whitespace) => {
                Ok(Self(trimmed.to_string()))
            }
            _ => Err(ConfigError::InvalidBaseUrl { url }),
        }
    }

    /// Joins path segments onto the base URL.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A contact address sent to OpenAlex as `User-Agent: mailto:{email}`.
///
/// OpenAlex routes requests that identify themselves this way to its
/// "polite pool".
///
/// # Example
///
/// ```rust
/// use openalex::MailtoEmail;
///
/// let email = MailtoEmail::new("me@example.com").unwrap();
/// assert_eq!(email.as_ref(), "me@example.com");
/// assert!(MailtoEmail::new("nobody").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailtoEmail(String);

impl MailtoEmail {
    /// Creates a new validated email.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEmail`] unless the value contains exactly
    /// one `@` with text on both sides and no whitespace.
    pub fn new(email: impl Into<String>) -> Result<Self, ConfigError> {
        let email = email.into();
        let trimmed = email.trim();

        let mut parts = trimmed.split('@');
        let valid = matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(local), Some(domain), None)
                if !local.is_empty() && !domain.is_empty()
        ) && !trimmed.contains(char::is_whitespace);

        if !valid {
            return Err(ConfigError::InvalidEmail { email });
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for MailtoEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let url = BaseUrl::new("http://localhost:8080///").unwrap();
        assert_eq!(url.as_ref(), "http://localhost:8080");
        assert_eq!(url.join("works"), "http://localhost:8080/works");
        assert_eq!(url.join("/works"), "http://localhost:8080/works");
    }

    #[test]
    fn test_base_url_rejects_missing_scheme() {
        assert!(matches!(
            BaseUrl::new("api.openalex.org"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(BaseUrl::new("ftp://api.openalex.org").is_err());
        assert!(BaseUrl::new("https://").is_err());
        assert!(BaseUrl::new("https://bad host").is_err());
    }

    #[test]
    fn test_base_url_default() {
        assert_eq!(BaseUrl::default().as_ref(), "https://api.openalex.org");
    }

    #[test]
    fn test_email_validation() {
        assert!(MailtoEmail::new("a@b.org").is_ok());
        assert!(MailtoEmail::new("").is_err());
        assert!(MailtoEmail::new("@b.org").is_err());
        assert!(MailtoEmail::new("a@").is_err());
        assert!(MailtoEmail::new("a@b@c").is_err());
        assert!(MailtoEmail::new("a b@c.org").is_err());
    }

    #[test]
    fn test_email_is_trimmed() {
        let email = MailtoEmail::new("  me@example.com ").unwrap();
        assert_eq!(email.as_ref(), "me@example.com");
    }
}
