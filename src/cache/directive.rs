//! Cache directives carried by a query builder.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// How long a cached response stays valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheTtl {
    /// Valid for this long after it is stored.
    Relative(Duration),
    /// Valid until this instant, however late it is stored.
    Until(DateTime<Utc>),
}

impl CacheTtl {
    /// Resolves a relative second count against the current time.
    #[must_use]
    pub fn seconds_from_now(seconds: u64) -> Self {
        let seconds = i64::try_from(seconds).unwrap_or(i64::MAX);
        let deadline = chrono::Duration::try_seconds(seconds)
            .and_then(|delta| Utc::now().checked_add_signed(delta))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self::Until(deadline)
    }

    /// Time left at `now`. `None` once an absolute deadline has passed.
    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        match self {
            Self::Relative(duration) => Some(*duration),
            Self::Until(deadline) => (*deadline - now).to_std().ok().filter(|d| !d.is_zero()),
        }
    }
}

impl From<Duration> for CacheTtl {
    fn from(duration: Duration) -> Self {
        Self::Relative(duration)
    }
}

impl From<DateTime<Utc>> for CacheTtl {
    fn from(deadline: DateTime<Utc>) -> Self {
        Self::Until(deadline)
    }
}

/// A query builder's caching mode. The modes are mutually exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CacheDirective {
    /// Every call goes to the API.
    #[default]
    Disabled,
    /// Responses are cached with a time-to-live.
    Ttl(CacheTtl),
    /// Responses are cached until evicted.
    Forever,
}

impl CacheDirective {
    /// Returns `true` unless caching is disabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }
}
