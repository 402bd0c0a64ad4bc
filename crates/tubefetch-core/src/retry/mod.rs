//! Retry and backoff policy.
//!
//! Bounds how many times an extraction attempt is made and how long to wait
//! between attempts, so the orchestrator and the CLI share one policy built
//! from configuration.

mod error;
mod policy;
mod run;

pub use error::RetryError;
pub use policy::{Backoff, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
