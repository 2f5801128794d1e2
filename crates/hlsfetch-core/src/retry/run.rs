//! Retry loop: run an attempt closure until success or the policy says stop.

use super::classify;
use super::error::FetchError;
use super::policy::{RetryDecision, RetryPolicy};
use std::fmt;

/// Terminal failure of a retry loop: the policy gave up after `attempts` tries.
#[derive(Debug)]
pub struct RetryExhausted {
    pub attempts: u32,
    pub last_error: FetchError,
}

impl fmt::Display for RetryExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gave up after {} attempt(s): {}", self.attempts, self.last_error)
    }
}

impl std::error::Error for RetryExhausted {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.last_error)
    }
}

/// Calls `f(attempt)` (attempt is 1-based) until it succeeds or the retry
/// policy says to stop, sleeping for the backoff delay between attempts.
/// Returns the number of attempts used on success.
pub fn run_with_retry<F>(policy: &RetryPolicy, mut f: F) -> Result<u32, RetryExhausted>
where
    F: FnMut(u32) -> Result<(), FetchError>,
{
    let mut attempt = 1u32;
    loop {
        match f(attempt) {
            Ok(()) => return Ok(attempt),
            Err(e) => {
                let kind = classify::classify(&e);
                match policy.decide(attempt, kind) {
                    RetryDecision::NoRetry => {
                        return Err(RetryExhausted {
                            attempts: attempt,
                            last_error: e,
                        })
                    }
                    RetryDecision::RetryAfter(d) => {
                        if !d.is_zero() {
                            std::thread::sleep(d);
                        }
                        attempt = attempt.saturating_add(1);
                    }
                }
            }
        }
    }
}
