//! Retry loop: run an async operation until success or the policy says stop.

use super::error::RetryError;
use super::policy::{RetryDecision, RetryPolicy};
use std::fmt::Display;
use std::future::Future;

/// Runs `op` until it succeeds or the retry policy says to stop.
///
/// `op` receives the 1-based attempt number. Failures before the last allowed
/// attempt are logged at warn and followed by the policy delay; the final
/// failure is logged at error and returned as [`RetryError`].
pub async fn run_with_retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    mut op: F,
) -> Result<T, RetryError<E>>
where
    E: Display,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_attempts = policy.attempts();
    let mut attempt = 1u32;
    loop {
        match op(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!(attempt, max_attempts, "succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) => match policy.decide(attempt) {
                RetryDecision::NoRetry => {
                    tracing::error!(attempt, max_attempts, error = %e, "attempt failed; giving up");
                    return Err(RetryError { attempts: attempt, last: e });
                }
                RetryDecision::RetryAfter(d) => {
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        delay_ms = d.as_millis() as u64,
                        error = %e,
                        "attempt failed; retrying"
                    );
                    if !d.is_zero() {
                        tokio::time::sleep(d).await;
                    }
                    attempt += 1;
                }
            },
        }
    }
}
