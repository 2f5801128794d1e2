use std::time::Duration;

/// High-level classification of a fetch error for retry purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operation timed out (connect/read/low-speed).
    Timeout,
    /// Server asked us to slow down (429, 503).
    Throttled,
    /// Network-level failure (connection reset, DNS, etc.).
    Connection,
    /// 5xx other than 503.
    Http5xx(u16),
    /// Any other non-2xx status (404, 403, ...). CDNs return these transiently
    /// often enough that they are still retried.
    HttpOther(u16),
    /// 2xx with a zero-length body.
    EmptyBody,
    /// Local disk failure. Never retried.
    Storage,
    Other,
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry this error.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Per-segment retry policy with capped exponential backoff.
///
/// `max_attempts: None` retries until the segment succeeds. That keeps flaky
/// CDNs working without tuning, but a permanently unreachable segment then
/// holds one worker forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first); `None` = unlimited.
    pub max_attempts: Option<u32>,
    /// Base delay for backoff.
    pub base_delay: Duration,
    /// Upper bound on backoff delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: None,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Unlimited attempts with no delay between them.
    pub fn immediate() -> Self {
        Self {
            max_attempts: None,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts.filter(|n| *n > 0);
        self
    }

    /// Decide what to do after attempt `attempt` (1-based) failed with `kind`.
    pub fn decide(&self, attempt: u32, kind: ErrorKind) -> RetryDecision {
        if kind == ErrorKind::Storage {
            return RetryDecision::NoRetry;
        }
        if let Some(max) = self.max_attempts {
            if attempt >= max {
                return RetryDecision::NoRetry;
            }
        }

        // base * 2^(attempt-1), capped; throttling starts one step further out.
        let step = match kind {
            ErrorKind::Throttled => attempt,
            _ => attempt.saturating_sub(1),
        };
        let exp = 1u32 << step.min(8);
        let delay = self.base_delay.saturating_mul(exp).min(self.max_delay);
        RetryDecision::RetryAfter(delay)
    }
}
