use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How the delay between attempts evolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backoff {
    /// Wait `base_delay` after every failed attempt.
    #[default]
    Fixed,
    /// Wait `base_delay * 2^(attempt-1)`, capped at `max_delay`.
    Exponential,
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry; the last error is final.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Bounded retry policy for extraction attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first). Zero behaves like one.
    pub max_attempts: u32,
    /// Delay after a failed attempt (fixed), or the first delay (exponential).
    pub base_delay: Duration,
    /// Upper bound on any single delay.
    pub max_delay: Duration,
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(30),
            backoff: Backoff::Fixed,
        }
    }
}

impl RetryPolicy {
    /// Same policy with a different attempt cap.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Policy that retries without sleeping; used by tests and dry runs.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff: Backoff::Fixed,
        }
    }

    /// Effective attempt cap (at least one attempt is always made).
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Decide what to do after failed attempt number `attempt` (1-based).
    pub fn decide(&self, attempt: u32) -> RetryDecision {
        if attempt >= self.attempts() {
            return RetryDecision::NoRetry;
        }
        RetryDecision::RetryAfter(self.delay_for(attempt))
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed => self.base_delay,
            Backoff::Exponential => {
                let exp = 1u32 << attempt.saturating_sub(1).min(8);
                self.base_delay.saturating_mul(exp).min(self.max_delay)
            }
        }
    }
}
