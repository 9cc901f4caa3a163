//! Exponential backoff retry for quota / rate-limit errors.

use drift_core::{Error, ErrorKind, Result};
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct BackoffPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_millis(100),
        }
    }
}

/// A provider-reported status code worth retrying: throttling or a
/// transient server fault. Anything else (auth, not-found, validation) is
/// returned to the caller immediately.
pub fn is_retryable(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::Network | ErrorKind::Timeout)
}

pub async fn retry<F, Fut, T>(policy: BackoffPolicy, mut attempt: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut last_err: Option<Error> = None;
    for attempt_number in 0..policy.max_attempts {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(err) if is_retryable(err.kind) && attempt_number + 1 < policy.max_attempts => {
                let delay = policy.base_delay * 2u32.pow(attempt_number);
                tracing::debug!(attempt = attempt_number, ?delay, "retrying after retryable error");
                tokio::time::sleep(delay).await;
                last_err = Some(err);
            }
            Err(err) => return Err(err),
        }
    }
    Err(last_err.unwrap_or_else(|| Error::internal("retry loop exited without an attempt")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn retries_until_success_within_the_attempt_budget() {
        let policy = BackoffPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
        };
        let calls = AtomicU32::new(0);

        let result: Result<&'static str> = retry(policy, || async {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                Err(Error::new(ErrorKind::Network, "throttled"))
            } else {
                Ok("done")
            }
        })
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn non_retryable_errors_fail_on_first_attempt() {
        let policy = BackoffPolicy::default();
        let calls = AtomicU32::new(0);

        let result: Result<()> = retry(policy, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::validation("bad request"))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
