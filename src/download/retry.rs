//! Bounded re-attempts of a fallible async operation.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use crate::error::{Error, Result};

/// Attempts made for every item download.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Re-runs an operation until it succeeds or the attempt budget is spent.
///
/// The policy only bounds the attempt count. With the default zero delay
/// attempts follow each other immediately and any backoff is left to the
/// HTTP layer underneath.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl RetryPolicy {
    /// A policy making up to `max_attempts` attempts (at least one).
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay: Duration::ZERO,
        }
    }

    /// Wait `delay` between consecutive attempts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run `operation` (given the 1-based attempt number) until it succeeds.
    ///
    /// On exhaustion the returned [`Error::RetriesExhausted`] wraps the error
    /// of the last attempt.
    pub async fn attempt<T, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1;

        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= self.max_attempts => {
                    return Err(Error::RetriesExhausted {
                        attempts: attempt,
                        source: Box::new(e),
                    });
                }
                Err(e) => {
                    tracing::debug!("attempt {}/{} failed: {}", attempt, self.max_attempts, e);
                }
            }

            if !self.delay.is_zero() {
                sleep(self.delay).await;
            }
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Instant;

    #[tokio::test]
    async fn test_first_success_returns_immediately() {
        let calls = AtomicU32::new(0);
        let result = RetryPolicy::new(5)
            .attempt(|_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok::<_, Error>(42) }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_succeeds_on_fifth_attempt() {
        let calls = AtomicU32::new(0);
        let result = RetryPolicy::new(5)
            .attempt(|attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt < 5 {
                        Err(Error::Download(format!("failure {}", attempt)))
                    } else {
                        Ok(())
                    }
                }
            })
            .await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_exhaustion_wraps_last_error() {
        let calls = AtomicU32::new(0);
        let err = RetryPolicy::new(3)
            .attempt(|attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move { Err::<(), _>(Error::Download(format!("failure {}", attempt))) }
            })
            .await
            .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        match err {
            Error::RetriesExhausted { attempts, source } => {
                assert_eq!(attempts, 3);
                assert_eq!(source.to_string(), "Download failed: failure 3");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_attempts_means_one() {
        let policy = RetryPolicy::new(0);
        assert_eq!(policy.max_attempts(), 1);
    }

    #[tokio::test]
    async fn test_delay_between_attempts() {
        let start = Instant::now();
        let result = RetryPolicy::new(3)
            .with_delay(Duration::from_millis(20))
            .attempt(|_| async { Err::<(), _>(Error::Download("nope".into())) })
            .await;

        assert!(result.is_err());
        assert!(start.elapsed() >= Duration::from_millis(40));
    }
}
