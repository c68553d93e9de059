//! Retry policy for transient HTTP failures.

use reqwest::Method;
use std::time::Duration;

const RETRYABLE_STATUSES: [u16; 7] = [408, 413, 429, 500, 502, 503, 504];

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Extra attempts after the first one.
    pub limit: u32,

    /// Delay before the first retry.
    pub base_delay: Duration,

    /// Backoff multiplier applied per attempt.
    pub multiplier: u32,

    /// Upper bound for any single delay, including `Retry-After`.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            limit: 2,
            base_delay: Duration::from_millis(300),
            multiplier: 2,
            max_delay: Duration::from_secs(3),
        }
    }
}

impl RetryPolicy {
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    // Only idempotent or safe methods are resent automatically.
    pub fn allows_method(&self, method: &Method) -> bool {
        [
            Method::GET,
            Method::PUT,
            Method::HEAD,
            Method::DELETE,
            Method::OPTIONS,
            Method::TRACE,
        ]
        .contains(method)
    }

    pub fn allows_status(&self, status: u16) -> bool {
        RETRYABLE_STATUSES.contains(&status)
    }

    /// `attempts` is the number of attempts already made (1-indexed).
    pub fn should_retry(&self, method: &Method, status: u16, attempts: u32) -> bool {
        attempts <= self.limit && self.allows_method(method) && self.allows_status(status)
    }

    /// Delay before the next attempt: `base_delay * multiplier^(attempts - 1)`,
    /// or the server's `Retry-After` when given, capped at `max_delay` either way.
    pub fn next_delay(&self, attempts: u32, retry_after: Option<Duration>) -> Duration {
        let delay = match retry_after {
            Some(delay) => delay,
            None => {
                let factor = self.multiplier.saturating_pow(attempts.saturating_sub(1));
                self.base_delay.saturating_mul(factor)
            }
        };
        delay.min(self.max_delay)
    }
}

// Only the delta-seconds form is honored; HTTP dates fall back to backoff.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}
