//! Bounded retry with exponential backoff for remote gateway calls.

use std::future::Future;
use std::time::Duration;

use crate::gateway::GatewayError;

/// Backoff schedule for one remote call.
///
/// Attempt `i` (zero-based) waits `min(initial_backoff * 2^i, max_backoff)`
/// before retrying, up to `max_retries` retries after the first attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the initial attempt.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_backoff: Duration,
    /// Ceiling on the doubled delay.
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// Returns the delay before the retry following attempt `attempt`.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.initial_backoff
            .checked_mul(factor)
            .map_or(self.max_backoff, |delay| delay.min(self.max_backoff))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(300),
            max_backoff: Duration::from_secs(2),
        }
    }
}

/// Timeout and retry bounds applied to every remote call individually.
///
/// Retries apply per call, never to the saga as a whole, so one saga run
/// is bounded by the sum of its per-call budgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallPolicy {
    /// Per-attempt timeout; expiry counts as a retryable failure.
    pub timeout: Duration,
    /// Backoff schedule between attempts.
    pub retry: RetryPolicy,
}

impl Default for CallPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(2),
            retry: RetryPolicy::default(),
        }
    }
}

/// Runs `op` under the policy's timeout, retrying transient failures with
/// backoff until the retry budget runs out.
///
/// Non-retryable errors (conflicts, invalid transitions) return
/// immediately. The last error is returned once retries are exhausted.
pub async fn call_with_retry<T, F, Fut>(
    policy: &CallPolicy,
    op_name: &str,
    mut op: F,
) -> Result<T, GatewayError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GatewayError>>,
{
    let mut attempt: u32 = 0;
    loop {
        let outcome = match tokio::time::timeout(policy.timeout, op()).await {
            Ok(result) => result,
            Err(_) => Err(GatewayError::Timeout),
        };

        match outcome {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < policy.retry.max_retries => {
                let backoff = policy.retry.backoff_for(attempt);
                tracing::debug!(
                    op = op_name,
                    attempt,
                    backoff_ms = backoff.as_millis() as u64,
                    error = %err,
                    "retrying gateway call"
                );
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
