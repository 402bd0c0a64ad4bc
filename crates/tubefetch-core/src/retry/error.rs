//! Terminal error of a retry loop.

use std::fmt;

/// Returned by [`super::run_with_retry`] when every allowed attempt failed.
#[derive(Debug)]
pub struct RetryError<E> {
    /// Number of attempts actually made.
    pub attempts: u32,
    /// Error from the final attempt.
    pub last: E,
}

impl<E: fmt::Display> fmt::Display for RetryError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed after {} attempt(s): {}", self.attempts, self.last)
    }
}

impl<E> std::error::Error for RetryError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.last)
    }
}
