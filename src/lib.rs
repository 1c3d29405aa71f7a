//! # OpenAlex API client
//!
//! A fluent, async client for the [OpenAlex](https://openalex.org) scholarly
//! catalogue: build filtered and sorted queries, map JSON responses onto
//! typed records, paginate or stream whole result sets, and cache raw
//! responses.
//!
//! ## Overview
//!
//! This crate provides:
//! - Configuration via [`OpenAlexConfig`] and [`OpenAlexConfigBuilder`], or
//!   from the `OPENALEX_BASE_URL` / `OPENALEX_MAILTO_EMAIL` environment
//! - A session factory, [`OpenAlex`], handing out one [`QueryBuilder`] per
//!   collection (`works`, `authors`, `sources`, `institutions`, `topics`,
//!   or any collection by name)
//! - Typed records in [`models`] with dotted-path JSON mapping
//! - Single-page pagination ([`Page`]) and lazy full-result iteration
//!   ([`Cursor`])
//! - Optional caching of raw responses through a pluggable [`CacheStore`]
//! - Automatic retries for 429, 5xx and connection failures
//!
//! ## Quick Start
//!
//! ```rust
//! use openalex::{MailtoEmail, OpenAlex, OpenAlexConfig, SortDirection};
//!
//! let config = OpenAlexConfig::builder()
//!     .email(MailtoEmail::new("me@example.com").unwrap())
//!     .build()
//!     .unwrap();
//! let openalex = OpenAlex::new(config);
//!
//! let query = openalex
//!     .works()
//!     .filter("publication_year", 2023)
//!     .search("graphene")
//!     .sort_by("cited_by_count", SortDirection::Desc);
//!
//! assert_eq!(
//!     query.to_url(),
//!     "https://api.openalex.org/works?filter=publication_year%3A2023&search=graphene&sort=cited_by_count%3Adesc"
//! );
//! ```
//!
//! ## Lookups
//!
//! Single-entity lookups return `Ok(None)` when the API answers 404:
//!
//! ```rust,no_run
//! use openalex::OpenAlex;
//!
//! # async fn example() -> Result<(), openalex::OpenAlexError> {
//! let openalex = OpenAlex::default();
//!
//! if let Some(work) = openalex.works().find_by_doi("10.7717/peerj.4375").await? {
//!     println!("{}", work.to_bibtex());
//! }
//!
//! let author = openalex.authors().find("A5023888391").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Caching
//!
//! Cache directives are per builder. The raw JSON is cached, keyed on the
//! full request URL, and mapped after retrieval:
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use openalex::OpenAlex;
//!
//! # async fn example() -> Result<(), openalex::OpenAlexError> {
//! let openalex = OpenAlex::default();
//! let recent = openalex
//!     .works()
//!     .filter("from_publication_date", "2024-01-01")
//!     .cache_for(Duration::from_secs(3600))
//!     .paginate(50, 1)
//!     .await?;
//!
//! println!("{} of {}", recent.len(), recent.total());
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod query;

pub use cache::{CacheDirective, CacheStore, CacheTtl, InMemoryCache};
pub use client::OpenAlex;
pub use config::{BaseUrl, MailtoEmail, OpenAlexConfig, OpenAlexConfigBuilder};
pub use error::{ConfigError, OpenAlexError};
pub use query::{Cursor, Page, QueryBuilder, SortDirection};

// Re-export HTTP layer types
pub use clients::{
    HttpClient, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, RetryPolicy,
    TransportError,
};
