//! Bounded retry with exponential backoff for backend calls.
//!
//! Both the completion gateway and the search gateway go through [`with_retry`]. Only
//! errors for which [`AgentError::is_retryable`] holds are retried; once the attempts run
//! out the last error is wrapped in [`AgentError::RetriesExhausted`].

use crate::error::{AgentError, Result};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Retry strategy for backend calls.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Max attempts per call (values below 1 are treated as 1).
    pub max_attempts: usize,
    /// Delay before the first retry.
    pub initial_backoff: Duration,
    /// Max backoff cap.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// A policy that makes exactly one attempt.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    fn attempts(&self) -> usize {
        self.max_attempts.max(1)
    }

    /// Delay before retry number `retry_index` (0-based), doubling up to the cap.
    pub fn backoff(&self, retry_index: usize) -> Duration {
        let cap = self.max_backoff.max(self.initial_backoff);
        let shift = retry_index.min(20) as u32;
        let factor = 1u32.checked_shl(shift).unwrap_or(u32::MAX);
        self.initial_backoff.saturating_mul(factor).min(cap)
    }
}

/// Run `call` until it succeeds, fails with a non-retryable error, or the policy runs out.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, operation: &str, mut call: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = policy.attempts();
    let mut attempt = 1;

    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) if attempt >= max_attempts => {
                if max_attempts == 1 {
                    return Err(e);
                }
                return Err(AgentError::RetriesExhausted {
                    operation: operation.to_string(),
                    attempts: attempt,
                    source: Box::new(e),
                });
            }
            Err(e) => {
                let delay = policy.backoff(attempt - 1);
                warn!(
                    operation = operation,
                    attempt = attempt,
                    max_attempts = max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Transient backend failure, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn fast_policy(max_attempts: usize) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(2),
        }
    }

    fn unavailable() -> AgentError {
        AgentError::ApiError {
            status: 503,
            message: "unavailable".to_string(),
        }
    }

    #[test]
    fn test_backoff_doubles_up_to_cap() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.backoff(0), Duration::from_millis(250));
        assert_eq!(policy.backoff(1), Duration::from_millis(500));
        assert_eq!(policy.backoff(2), Duration::from_secs(1));
        assert_eq!(policy.backoff(3), Duration::from_secs(2));
        assert_eq!(policy.backoff(50), Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let calls = AtomicUsize::new(0);
        let counter = &calls;

        let result = with_retry(&fast_policy(3), "completion", || async move {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(unavailable())
            } else {
                Ok("done")
            }
        })
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhaustion_wraps_last_error() {
        let calls = AtomicUsize::new(0);
        let counter = &calls;

        let result: Result<()> = with_retry(&fast_policy(2), "search", || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(unavailable())
        })
        .await;

        match result {
            Err(AgentError::RetriesExhausted {
                operation,
                attempts,
                ..
            }) => {
                assert_eq!(operation, "search");
                assert_eq!(attempts, 2);
            }
            other => panic!("Expected RetriesExhausted, got {:?}", other),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_non_retryable_error_is_returned_immediately() {
        let calls = AtomicUsize::new(0);
        let counter = &calls;

        let result: Result<()> = with_retry(&fast_policy(5), "completion", || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(AgentError::ApiError {
                status: 401,
                message: "bad key".to_string(),
            })
        })
        .await;

        assert!(matches!(result, Err(AgentError::ApiError { status: 401, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_single_attempt_policy_returns_raw_error() {
        let result: Result<()> = tokio_test::block_on(with_retry(
            &RetryPolicy::none(),
            "completion",
            || async { Err(unavailable()) },
        ));

        assert!(matches!(result, Err(AgentError::ApiError { status: 503, .. })));
    }
}
