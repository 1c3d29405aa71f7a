//! Query building and execution.
//!
//! A [`QueryBuilder`] is obtained from [`OpenAlex`](crate::OpenAlex), chained
//! with filters, search, sort, select and cache settings, and finished with
//! a terminal method. Collection queries render canonically as
//! `{base_url}/{entity}?filter=..&search=..&sort=..&select=..`.

mod builder;
mod cursor;
mod dynamic;
mod page;
mod params;

pub use builder::QueryBuilder;
pub use cursor::{Cursor, MAX_PAGE_SIZE};
pub use dynamic::snake_case;
pub use page::Page;
pub use params::{QueryParams, SortDirection};
