//! The fluent query builder.
//!
//! Chaining methods only mutate in-memory state; the terminal methods
//! (`find`, `find_by`, `get`, `paginate`, `cursor`) perform requests.
//! Every request goes through the same pipeline:
//!
//! 1. render the URL and query string
//! 2. consult the cache if the builder has a cache directive
//! 3. on a miss, send the request with the configured retry policy
//! 4. store the raw JSON (never a 404 or an error)
//! 5. map the raw JSON onto `T`

use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::cache::{cache_key, remember_forever, remember_with_ttl, CacheDirective, CacheTtl};
use crate::client::OpenAlex;
use crate::clients::{HttpClient, HttpRequest};
use crate::error::OpenAlexError;
use crate::models::FromResponse;
use crate::query::dynamic::FilterMethod;
use crate::query::{Cursor, Page, QueryParams, SortDirection};

/// Accumulates query intent for one collection and executes it.
///
/// `T` is the record each result maps onto: a typed entity such as
/// [`Work`](crate::models::Work), or [`Record`](crate::models::Record)
/// for collections chosen by name.
pub struct QueryBuilder<T> {
    client: OpenAlex,
    entity_type: String,
    params: QueryParams,
    cache: CacheDirective,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for QueryBuilder<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            entity_type: self.entity_type.clone(),
            params: self.params.clone(),
            cache: self.cache,
            _record: PhantomData,
        }
    }
}

impl<T> fmt::Debug for QueryBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("entity_type", &self.entity_type)
            .field("params", &self.params)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl<T> QueryBuilder<T> {
    pub(crate) fn new(client: OpenAlex, entity_type: impl Into<String>) -> Self {
        Self {
            client,
            entity_type: entity_type.into(),
            params: QueryParams::default(),
            cache: CacheDirective::Disabled,
            _record: PhantomData,
        }
    }

    /// The collection this builder queries, e.g. `works`.
    #[must_use]
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    /// The accumulated filter, search, sort and select state.
    #[must_use]
    pub const fn params(&self) -> &QueryParams {
        &self.params
    }

    /// How responses for this query are cached.
    #[must_use]
    pub const fn cache_directive(&self) -> CacheDirective {
        self.cache
    }

    /// Adds a `key:value` filter clause.
    #[must_use]
    pub fn filter(mut self, key: impl AsRef<str>, value: impl fmt::Display) -> Self {
        self.params.push_filter(key.as_ref(), &value.to_string());
        self
    }

    /// Adds a filter clause matching any of `values` (`key:a|b|c`).
    #[must_use]
    pub fn filter_in<I>(mut self, key: impl AsRef<str>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        let joined = values
            .into_iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join("|");
        self.params.push_filter(key.as_ref(), &joined);
        self
    }

    /// Adds a filter on a related entity, e.g. `("authorships.author.id", "A1")`.
    #[must_use]
    pub fn filter_has(self, relation: impl AsRef<str>, value: impl fmt::Display) -> Self {
        self.filter(relation, value)
    }

    /// Dispatches a filter method by name.
    ///
    /// `where`, `whereIn` and `whereHas` behave like [`filter`](Self::filter),
    /// [`filter_in`](Self::filter_in) and [`filter_has`](Self::filter_has);
    /// any other `where<Field>` takes one value and filters on the
    /// snake_cased field.
    ///
    /// ```rust
    /// use openalex::OpenAlex;
    ///
    /// let url = OpenAlex::default()
    ///     .works()
    ///     .call("wherePublicationYear", &["2023"])
    ///     .unwrap()
    ///     .to_url();
    /// assert_eq!(url, "https://api.openalex.org/works?filter=publication_year%3A2023");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`OpenAlexError::UnsupportedOperation`] for any other method
    /// name or a wrong number of arguments.
    pub fn call(self, method: &str, args: &[&str]) -> Result<Self, OpenAlexError> {
        match (FilterMethod::parse(method), args) {
            (Some(FilterMethod::Where), [key, value]) => Ok(self.filter(key, value)),
            (Some(FilterMethod::WhereIn), [key, values @ ..]) if !values.is_empty() => {
                Ok(self.filter_in(key, values))
            }
            (Some(FilterMethod::WhereHas), [relation, value]) => {
                Ok(self.filter_has(relation, value))
            }
            (Some(FilterMethod::WhereField(key)), [value]) => Ok(self.filter(key, value)),
            _ => Err(OpenAlexError::UnsupportedOperation {
                method: method.to_string(),
            }),
        }
    }

    /// Sets the full-text search term, replacing any previous one.
    #[must_use]
    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.params.set_search(query.into());
        self
    }

    /// Sorts by `key`. Sorting by the same key again replaces its direction.
    #[must_use]
    pub fn sort_by(mut self, key: impl Into<String>, direction: SortDirection) -> Self {
        self.params.set_sort(key.into(), direction);
        self
    }

    /// Sorts by `relevance_score`, descending. Only meaningful with a search.
    #[must_use]
    pub fn sort_by_relevance(self) -> Self {
        self.sort_by("relevance_score", SortDirection::Desc)
    }

    /// Limits the returned fields, replacing any previous selection.
    #[must_use]
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params
            .set_select(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Caches responses for `ttl` after they are stored.
    #[must_use]
    pub const fn cache_for(mut self, ttl: Duration) -> Self {
        self.cache = CacheDirective::Ttl(CacheTtl::Relative(ttl));
        self
    }

    /// Caches responses until `seconds` from now.
    #[must_use]
    pub fn cache_for_secs(mut self, seconds: u64) -> Self {
        self.cache = CacheDirective::Ttl(CacheTtl::seconds_from_now(seconds));
        self
    }

    /// Caches responses until `deadline`.
    #[must_use]
    pub const fn cache_until(mut self, deadline: DateTime<Utc>) -> Self {
        self.cache = CacheDirective::Ttl(CacheTtl::Until(deadline));
        self
    }

    /// Caches responses with no expiry.
    #[must_use]
    pub const fn cache_forever(mut self) -> Self {
        self.cache = CacheDirective::Forever;
        self
    }

    #[must_use]
    pub const fn disable_cache(mut self) -> Self {
        self.cache = CacheDirective::Disabled;
        self
    }

    /// The collection URL with the rendered query string, without sending it.
    #[must_use]
    pub fn to_url(&self) -> String {
        self.collection_request(Vec::new()).full_url()
    }

    fn collection_url(&self) -> String {
        self.client.config().base_url().join(&self.entity_type)
    }

    fn collection_request(&self, extra: Vec<(String, String)>) -> HttpRequest {
        let mut params = self.params.to_pairs();
        params.extend(extra);
        HttpRequest::builder(self.collection_url())
            .query(params)
            .retry_policy(*self.client.config().retry_policy())
            .build()
    }

    fn lookup_request(&self, segment: &str) -> HttpRequest {
        let url = self
            .client
            .config()
            .base_url()
            .join(&format!("{}/{segment}", self.entity_type));
        HttpRequest::builder(url)
            .retry_policy(*self.client.config().retry_policy())
            .build()
    }

    /// Runs a request through the cache directive. `None` means 404.
    async fn execute(&self, request: HttpRequest) -> Result<Option<Value>, OpenAlexError> {
        let http = self.client.http();
        match self.cache {
            CacheDirective::Disabled => fetch_json(http, request).await,
            CacheDirective::Ttl(ttl) => {
                let key = cache_key(&request.full_url());
                remember_with_ttl(self.client.cache(), &key, ttl, || fetch_json(http, request))
                    .await
            }
            CacheDirective::Forever => {
                let key = cache_key(&request.full_url());
                remember_forever(self.client.cache(), &key, || fetch_json(http, request)).await
            }
        }
    }

    /// Runs a collection request, where a 404 is an error like any other.
    async fn execute_collection(&self, request: HttpRequest) -> Result<Value, OpenAlexError> {
        self.execute(request).await?.ok_or_else(|| OpenAlexError::Api {
            status: 404,
            reason: "Not Found".to_string(),
        })
    }
}

impl<T: FromResponse> QueryBuilder<T> {
    /// Fetches one entity by its OpenAlex id (`W2741809807` or the full
    /// `https://openalex.org/...` URI).
    ///
    /// Returns `Ok(None)` when the API answers 404.
    ///
    /// # Errors
    ///
    /// Returns [`OpenAlexError::Api`] for any other failed status,
    /// [`OpenAlexError::Transport`] if the API cannot be reached, and
    /// [`OpenAlexError::Mapping`] if the record cannot be built.
    pub async fn find(&self, id: &str) -> Result<Option<T>, OpenAlexError> {
        self.find_segment(id).await
    }

    /// Fetches one entity by an external id, e.g. `("doi", "10.1234/x")`
    /// or `("ror", "03vek6s52")`.
    ///
    /// # Errors
    ///
    /// Same contract as [`find`](Self::find).
    pub async fn find_by(&self, id_type: &str, id_value: &str) -> Result<Option<T>, OpenAlexError> {
        self.find_segment(&format!("{id_type}:{id_value}")).await
    }

    /// Shortcut for `find_by("doi", doi)`.
    ///
    /// # Errors
    ///
    /// Same contract as [`find`](Self::find).
    pub async fn find_by_doi(&self, doi: &str) -> Result<Option<T>, OpenAlexError> {
        self.find_by("doi", doi).await
    }

    /// Shortcut for `find_by("orcid", orcid)`.
    ///
    /// # Errors
    ///
    /// Same contract as [`find`](Self::find).
    pub async fn find_by_orcid(&self, orcid: &str) -> Result<Option<T>, OpenAlexError> {
        self.find_by("orcid", orcid).await
    }

    async fn find_segment(&self, segment: &str) -> Result<Option<T>, OpenAlexError> {
        let request = self.lookup_request(segment);
        match self.execute(request).await? {
            Some(body) => T::from_response(&self.entity_type, body).map(Some),
            None => Ok(None),
        }
    }

    /// Runs the accumulated query and maps the first page of `results`.
    ///
    /// # Errors
    ///
    /// Returns [`OpenAlexError::Api`] for any failed status (404 included),
    /// [`OpenAlexError::Transport`] if the API cannot be reached, and
    /// [`OpenAlexError::Mapping`] if a result cannot be mapped.
    pub async fn get(&self) -> Result<Vec<T>, OpenAlexError> {
        let mut body = self.execute_collection(self.collection_request(Vec::new())).await?;
        self.map_results(&mut body)
    }

    /// Fetches one page with explicit `per-page` and `page` parameters.
    ///
    /// # Errors
    ///
    /// Same contract as [`get`](Self::get).
    pub async fn paginate(&self, per_page: u32, page: u32) -> Result<Page<T>, OpenAlexError> {
        let (items, total) = self.fetch_page(per_page, page).await?;
        Ok(Page::new(items, total, per_page, page))
    }

    /// Walks every page lazily, 200 results per request by default.
    #[must_use]
    pub fn cursor(&self) -> Cursor<T> {
        Cursor::new(self.clone())
    }

    /// Fetches one page and returns its mapped items and `meta.count`.
    pub(crate) async fn fetch_page(
        &self,
        per_page: u32,
        page: u32,
    ) -> Result<(Vec<T>, u64), OpenAlexError> {
        let request = self.collection_request(vec![
            ("per-page".to_string(), per_page.to_string()),
            ("page".to_string(), page.to_string()),
        ]);
        let mut body = self.execute_collection(request).await?;
        let total = body
            .pointer("/meta/count")
            .and_then(Value::as_u64)
            .unwrap_or_default();
        Ok((self.map_results(&mut body)?, total))
    }

    fn map_results(&self, body: &mut Value) -> Result<Vec<T>, OpenAlexError> {
        match body.get_mut("results").map(Value::take) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| T::from_response(&self.entity_type, item))
                .collect(),
            Some(_) => Err(OpenAlexError::Mapping {
                entity: "Response",
                field: "results".to_string(),
                reason: "expected an array".to_string(),
            }),
        }
    }
}

/// Sends one request and interprets the final status.
async fn fetch_json(http: &HttpClient, request: HttpRequest) -> Result<Option<Value>, OpenAlexError> {
    let response = http.request(request).await?;

    if response.code == 404 {
        tracing::debug!(request_id = ?response.request_id(), "OpenAlex returned 404");
        return Ok(None);
    }
    if !response.is_ok() {
        return Err(OpenAlexError::Api {
            status: response.code,
            reason: response.reason(),
        });
    }

    Ok(Some(response.json()?))
}
