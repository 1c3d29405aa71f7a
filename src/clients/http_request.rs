//! HTTP request type for the OpenAlex client.
//!
//! OpenAlex is a read-only API, so every request is a `GET`. Query
//! parameters keep their insertion order so that the rendered URL, and
//! the cache key derived from it, is deterministic.

use std::collections::HashMap;

use crate::clients::RetryPolicy;

/// A `GET` request to be sent to the OpenAlex API.
///
/// # Example
///
/// ```rust
/// use openalex::clients::HttpRequest;
///
/// let request = HttpRequest::builder("https://api.openalex.org/works")
///     .query_param("filter", "type:article")
///     .query_param("page", "2")
///     .build();
///
/// assert_eq!(
///     request.full_url(),
///     "https://api.openalex.org/works?filter=type%3Aarticle&page=2"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    /// The absolute URL without a query string.
    pub url: String,
    /// Query parameters in insertion order.
    pub query: Vec<(String, String)>,
    /// Additional headers to include in the request.
    pub headers: HashMap<String, String>,
    /// Retry policy for this request.
    pub retry: RetryPolicy,
}

impl HttpRequest {
    /// Creates a new builder for the given URL.
    #[must_use]
    pub fn builder(url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(url)
    }

    /// Renders the query parameters as a percent-encoded query string.
    ///
    /// Returns an empty string when there are no parameters.
    #[must_use]
    pub fn query_string(&self) -> String {
        self.query
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Returns the fully qualified URL including the query string.
    #[must_use]
    pub fn full_url(&self) -> String {
        let query = self.query_string();
        if query.is_empty() {
            self.url.clone()
        } else {
            format!("{}?{query}", self.url)
        }
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    url: String,
    query: Vec<(String, String)>,
    headers: HashMap<String, String>,
    retry: RetryPolicy,
}

impl HttpRequestBuilder {
    fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            headers: HashMap::new(),
            retry: RetryPolicy::none(),
        }
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Appends all query parameters from an iterator.
    #[must_use]
    pub fn query<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the retry policy. The default sends the request once.
    #[must_use]
    pub const fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Builds the [`HttpRequest`].
    #[must_use]
    pub fn build(self) -> HttpRequest {
        HttpRequest {
            url: self.url,
            query: self.query,
            headers: self.headers,
            retry: self.retry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url_without_query() {
        let request = HttpRequest::builder("https://api.openalex.org/works/W1").build();
        assert_eq!(request.full_url(), "https://api.openalex.org/works/W1");
        assert_eq!(request.query_string(), "");
    }

    #[test]
    fn test_query_order_is_preserved() {
        let request = HttpRequest::builder("https://api.openalex.org/works")
            .query_param("sort", "cited_by_count:desc")
            .query_param("filter", "a:1")
            .build();

        assert_eq!(
            request.query_string(),
            "sort=cited_by_count%3Adesc&filter=a%3A1"
        );
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let request = HttpRequest::builder("https://api.openalex.org/works")
            .query_param("search", "machine learning")
            .query_param("filter", "language:en|de,type:article")
            .build();

        assert_eq!(
            request.query_string(),
            "search=machine%20learning&filter=language%3Aen%7Cde%2Ctype%3Aarticle"
        );
    }

    #[test]
    fn test_query_extends_in_order() {
        let request = HttpRequest::builder("u")
            .query([("a", "1"), ("b", "2")])
            .query_param("c", "3")
            .build();

        let keys: Vec<&str> = request.query.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_default_retry_is_single_attempt() {
        let request = HttpRequest::builder("u").build();
        assert_eq!(request.retry.max_attempts(), 1);
    }

    #[test]
    fn test_builder_headers() {
        let request = HttpRequest::builder("u").header("X-Test", "1").build();
        assert_eq!(request.headers.get("X-Test"), Some(&"1".to_string()));
    }
}
