//! Retry policy applied by [`HttpClient`](crate::clients::HttpClient).

use std::time::Duration;

/// Default number of attempts per request.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default delay before the first retry.
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(100);

/// How often, and how patiently, a request is retried.
///
/// Retried outcomes are HTTP 429, HTTP 5xx, and transport errors that
/// [`TransportError::is_retryable`](crate::clients::TransportError::is_retryable)
/// accepts. Every other status is final on the first attempt.
///
/// The delay before retry `n` (1-based) is `initial_backoff * multiplier^(n-1)`.
///
/// # Example
///
/// ```rust
/// use openalex::clients::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts(), 3);
/// assert_eq!(policy.backoff_for(1), Duration::from_millis(100));
/// assert_eq!(policy.backoff_for(2), Duration::from_millis(200));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_backoff: Duration,
    multiplier: u32,
}

impl RetryPolicy {
    /// Creates a policy with doubling backoff.
    #[must_use]
    pub const fn new(max_attempts: u32, initial_backoff: Duration) -> Self {
        Self {
            max_attempts,
            initial_backoff,
            multiplier: 2,
        }
    }

    /// A policy that sends each request exactly once.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Sets the backoff multiplier (1 gives a fixed delay).
    #[must_use]
    pub const fn with_multiplier(mut self, multiplier: u32) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Total attempts, including the first.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay before the first retry.
    #[must_use]
    pub const fn initial_backoff(&self) -> Duration {
        self.initial_backoff
    }

    /// Returns `true` if a response with this status should be retried.
    #[must_use]
    pub const fn should_retry_status(&self, status: u16) -> bool {
        status == 429 || (status >= 500 && status <= 599)
    }

    /// Delay to wait after the given (1-based) failed attempt.
    #[must_use]
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        let factor = self.multiplier.saturating_pow(exponent);
        self.initial_backoff.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_INITIAL_BACKOFF)
    }
}
