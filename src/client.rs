//! The entry point: a factory for query builders.

use std::sync::Arc;

use crate::cache::{CacheStore, InMemoryCache};
use crate::clients::{HttpClient, HttpTransport, ReqwestTransport};
use crate::config::OpenAlexConfig;
use crate::error::OpenAlexError;
use crate::models::{Author, Entity, Institution, Record, Source, Topic, Work};
use crate::query::QueryBuilder;

/// An OpenAlex session: configuration, HTTP transport and cache store.
///
/// Every accessor returns a fresh [`QueryBuilder`]; builders share the
/// transport and cache but no query state. Cloning is cheap.
///
/// # Example
///
/// ```rust,no_run
/// use openalex::{OpenAlex, OpenAlexConfig, SortDirection};
///
/// # async fn example() -> Result<(), openalex::OpenAlexError> {
/// let openalex = OpenAlex::new(OpenAlexConfig::default());
///
/// let works = openalex
///     .works()
///     .filter("publication_year", 2023)
///     .filter_in("type", ["article", "book"])
///     .sort_by("cited_by_count", SortDirection::Desc)
///     .cache_for_secs(3600)
///     .get()
///     .await?;
///
/// for work in &works {
///     println!("{} ({})", work.display_name, work.cited_by_count);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct OpenAlex {
    config: OpenAlexConfig,
    http: HttpClient,
    cache: Arc<dyn CacheStore>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OpenAlex>();
};

impl std::fmt::Debug for OpenAlex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAlex")
            .field("config", &self.config)
            .field("http", &self.http)
            .finish_non_exhaustive()
    }
}

impl OpenAlex {
    /// Creates a session over reqwest with an in-process cache.
    #[must_use]
    pub fn new(config: OpenAlexConfig) -> Self {
        Self::with_parts(
            config,
            Arc::new(ReqwestTransport::new()),
            Arc::new(InMemoryCache::new()),
        )
    }

    /// Creates a session over the given transport and cache store.
    #[must_use]
    pub fn with_parts(
        config: OpenAlexConfig,
        transport: Arc<dyn HttpTransport>,
        cache: Arc<dyn CacheStore>,
    ) -> Self {
        let http = HttpClient::new(transport, &config);
        Self {
            config,
            http,
            cache,
        }
    }

    /// Creates a session configured from `OPENALEX_BASE_URL` and
    /// `OPENALEX_MAILTO_EMAIL`.
    ///
    /// # Errors
    ///
    /// Returns [`OpenAlexError::Config`] if either variable is set to an
    /// invalid value.
    pub fn from_env() -> Result<Self, OpenAlexError> {
        Ok(Self::new(OpenAlexConfig::from_env()?))
    }

    #[must_use]
    pub const fn config(&self) -> &OpenAlexConfig {
        &self.config
    }

    pub(crate) const fn http(&self) -> &HttpClient {
        &self.http
    }

    /// The cache store shared by this session's builders.
    #[must_use]
    pub fn cache(&self) -> &dyn CacheStore {
        self.cache.as_ref()
    }

    /// A builder for the collection of a typed record.
    #[must_use]
    pub fn query<T: Entity>(&self) -> QueryBuilder<T> {
        QueryBuilder::new(self.clone(), T::COLLECTION)
    }

    #[must_use]
    pub fn works(&self) -> QueryBuilder<Work> {
        self.query()
    }

    #[must_use]
    pub fn authors(&self) -> QueryBuilder<Author> {
        self.query()
    }

    #[must_use]
    pub fn sources(&self) -> QueryBuilder<Source> {
        self.query()
    }

    #[must_use]
    pub fn institutions(&self) -> QueryBuilder<Institution> {
        self.query()
    }

    #[must_use]
    pub fn topics(&self) -> QueryBuilder<Topic> {
        self.query()
    }

    /// A builder for any collection by name.
    ///
    /// Results from `works`, `authors`, `sources`, `institutions` and
    /// `topics` map onto their typed [`Record`] variant; other
    /// collections (`concepts`, `funders`, `publishers`...) come back as
    /// [`Record::Raw`].
    #[must_use]
    pub fn entity(&self, name: impl Into<String>) -> QueryBuilder<Record> {
        QueryBuilder::new(self.clone(), name)
    }
}

impl Default for OpenAlex {
    fn default() -> Self {
        Self::new(OpenAlexConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BaseUrl;

    fn openalex() -> OpenAlex {
        let config = OpenAlexConfig::builder()
            .base_url(BaseUrl::new("https://api.test.org/").unwrap())
            .build()
            .unwrap();
        OpenAlex::new(config)
    }

    #[test]
    fn test_typed_accessors_use_their_collection() {
        let openalex = openalex();

        assert_eq!(openalex.works().to_url(), "https://api.test.org/works");
        assert_eq!(openalex.authors().to_url(), "https://api.test.org/authors");
        assert_eq!(openalex.sources().to_url(), "https://api.test.org/sources");
        assert_eq!(
            openalex.institutions().to_url(),
            "https://api.test.org/institutions"
        );
        assert_eq!(openalex.topics().to_url(), "https://api.test.org/topics");
    }

    #[test]
    fn test_entity_accepts_any_collection() {
        let builder = openalex().entity("funders");
        assert_eq!(builder.entity_type(), "funders");
        assert_eq!(builder.to_url(), "https://api.test.org/funders");
    }

    #[test]
    fn test_builders_do_not_share_state() {
        let openalex = openalex();
        let filtered = openalex.works().filter("type", "article");
        let fresh = openalex.works();

        assert_ne!(filtered.to_url(), fresh.to_url());
    }

    #[test]
    fn test_debug_omits_transport() {
        let debug = format!("{:?}", openalex());
        assert!(debug.contains("OpenAlex"));
        assert!(debug.contains("api.test.org"));
    }
}
