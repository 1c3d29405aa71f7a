//! Lazy page-by-page iteration over a whole result set.

use std::collections::VecDeque;

use futures_util::stream::{self, Stream};

use crate::error::OpenAlexError;
use crate::models::FromResponse;
use crate::query::QueryBuilder;

/// Largest `per-page` the API accepts.
pub const MAX_PAGE_SIZE: u32 = 200;

/// Walks every page of a query, one request per page.
///
/// A page is requested only once the previous page's items have all been
/// handed out, and iteration ends at the first empty page. A cursor is
/// single-pass: call [`QueryBuilder::cursor`] again to start over.
/// Dropping it stops further requests.
///
/// # Example
///
/// ```rust,no_run
/// use openalex::OpenAlex;
///
/// # async fn example() -> Result<(), openalex::OpenAlexError> {
/// let mut cursor = OpenAlex::default()
///     .works()
///     .filter("authorships.institutions.ror", "03vek6s52")
///     .cursor();
///
/// while let Some(work) = cursor.next().await? {
///     println!("{}", work.display_name);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Cursor<T> {
    builder: QueryBuilder<T>,
    page_size: u32,
    next_page: u32,
    buffer: VecDeque<T>,
    total: Option<u64>,
    done: bool,
}

impl<T> std::fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("builder", &self.builder)
            .field("page_size", &self.page_size)
            .field("next_page", &self.next_page)
            .field("buffered", &self.buffer.len())
            .field("done", &self.done)
            .finish()
    }
}

impl<T: FromResponse> Cursor<T> {
    pub(crate) fn new(builder: QueryBuilder<T>) -> Self {
        Self {
            builder,
            page_size: MAX_PAGE_SIZE,
            next_page: 1,
            buffer: VecDeque::new(),
            total: None,
            done: false,
        }
    }

    /// Sets the page size, clamped to `1..=200`. Ignored once the first
    /// page has been requested.
    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        if self.next_page == 1 {
            self.page_size = size.clamp(1, MAX_PAGE_SIZE);
        }
        self
    }

    /// `meta.count` of the last fetched page, if any page was fetched.
    #[must_use]
    pub const fn total(&self) -> Option<u64> {
        self.total
    }

    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Returns the next record, fetching the next page if the buffer is empty.
    ///
    /// After an error the cursor is finished and yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns the page request's error, as for [`QueryBuilder::get`].
    pub async fn next(&mut self) -> Result<Option<T>, OpenAlexError> {
        if self.buffer.is_empty() && !self.done {
            self.fetch_next_page().await?;
        }
        Ok(self.buffer.pop_front())
    }

    async fn fetch_next_page(&mut self) -> Result<(), OpenAlexError> {
        let page = self.next_page;
        tracing::debug!(
            entity = self.builder.entity_type(),
            page,
            per_page = self.page_size,
            "Fetching OpenAlex cursor page"
        );

        let (items, total) = match self.builder.fetch_page(self.page_size, page).await {
            Ok(fetched) => fetched,
            Err(e) => {
                self.done = true;
                return Err(e);
            }
        };

        self.total = Some(total);
        self.next_page += 1;
        if items.is_empty() {
            self.done = true;
        }
        self.buffer.extend(items);
        Ok(())
    }

    /// Drains the remaining records into a `Vec`.
    ///
    /// # Errors
    ///
    /// Returns the first page request error.
    pub async fn collect_all(mut self) -> Result<Vec<T>, OpenAlexError> {
        let mut records = Vec::new();
        while let Some(record) = self.next().await? {
            records.push(record);
        }
        Ok(records)
    }

    /// Adapts the cursor into a [`Stream`]. An error is yielded once and
    /// ends the stream.
    pub fn into_stream(self) -> impl Stream<Item = Result<T, OpenAlexError>> {
        stream::unfold(self, |mut cursor| async move {
            match cursor.next().await {
                Ok(Some(record)) => Some((Ok(record), cursor)),
                Ok(None) => None,
                Err(e) => Some((Err(e), cursor)),
            }
        })
    }
}
