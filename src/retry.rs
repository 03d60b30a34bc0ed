//! Retry logic with exponential backoff
//!
//! Bounded, cancellable retries for transient failures. The delay before
//! retry `n` grows as `initial_delay * backoff_multiplier^(n-1)`, capped at
//! `max_delay`, with optional jitter.
//!
//! # Example
//!
//! ```no_run
//! use person_roster::config::RetryConfig;
//! use person_roster::retry::{IsRetryable, with_retry};
//! use tokio_util::sync::CancellationToken;
//!
//! #[derive(Debug)]
//! struct Flaky;
//!
//! impl std::fmt::Display for Flaky {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         write!(f, "flaky")
//!     }
//! }
//!
//! impl IsRetryable for Flaky {
//!     fn is_retryable(&self) -> bool {
//!         true
//!     }
//! }
//!
//! # async fn example() {
//! let config = RetryConfig::default();
//! let cancel = CancellationToken::new();
//! let result = with_retry(&config, &cancel, || async { Ok::<_, Flaky>(42) }).await;
//! # }
//! ```

use crate::config::RetryConfig;
use crate::error::Error;
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Trait for errors that can be classified as retryable or not
pub trait IsRetryable {
    /// Returns true if the error is transient and the operation should be retried
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for Error {
    fn is_retryable(&self) -> bool {
        match self {
            // Connect, timeout and body read failures
            Error::Network(_) => true,
            // Any non-2xx answer from the source
            Error::HttpStatus { .. } => true,
            // Truncated or wrongly shaped payloads are fetched again
            Error::MalformedBody(_) | Error::Serialization(_) => true,
            Error::Config { .. }
            | Error::Database(_)
            | Error::Sqlx(_)
            | Error::FetchExhausted { .. }
            | Error::Cancelled
            | Error::Io(_) => false,
        }
    }
}

/// Why a retried operation gave up
#[derive(Debug)]
pub enum RetryError<E> {
    /// The cancellation token fired during an attempt or a backoff sleep
    Cancelled,
    /// Every attempt failed with a retryable error
    Exhausted {
        /// Number of attempts made
        attempts: u32,
        /// Error from the final attempt
        last: E,
    },
    /// An attempt failed with a non-retryable error
    Fatal(E),
}

/// Delay to wait before the given zero-based attempt
///
/// Attempt 0 runs immediately; attempt `n > 0` waits
/// `initial_delay * backoff_multiplier^(n-1)`, never more than `max_delay`.
pub fn backoff_delay(config: &RetryConfig, attempt: u32) -> Duration {
    if attempt == 0 {
        return Duration::ZERO;
    }

    let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
    let secs = config.initial_delay.as_secs_f64() * config.backoff_multiplier.powi(exponent);
    if !secs.is_finite() || secs >= config.max_delay.as_secs_f64() {
        return config.max_delay;
    }
    Duration::from_secs_f64(secs)
}

/// Execute an async operation with exponential backoff retry logic
///
/// Runs `operation` up to `config.max_attempts` times. Both the operation and
/// the backoff sleep race against `cancel`. Each failed attempt logs one
/// warning; reporting exhaustion is left to the caller.
pub async fn with_retry<F, Fut, T, E>(
    config: &RetryConfig,
    cancel: &CancellationToken,
    mut operation: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: IsRetryable + std::fmt::Display,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        if attempt > 0 {
            let delay = backoff_delay(config, attempt);
            let delay = if config.jitter {
                add_jitter(delay)
            } else {
                delay
            };

            tokio::select! {
                _ = cancel.cancelled() => return Err(RetryError::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
        }

        let result = tokio::select! {
            _ = cancel.cancelled() => return Err(RetryError::Cancelled),
            result = operation() => result,
        };

        match result {
            Ok(value) => {
                if attempt > 0 {
                    tracing::info!(attempts = attempt + 1, "Operation succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) if e.is_retryable() => {
                attempt += 1;

                if attempt < max_attempts {
                    tracing::warn!(
                        error = %e,
                        attempt = attempt,
                        max_attempts = max_attempts,
                        delay_ms = backoff_delay(config, attempt).as_millis() as u64,
                        "Operation failed, retrying"
                    );
                } else {
                    tracing::warn!(
                        error = %e,
                        attempt = attempt,
                        max_attempts = max_attempts,
                        "Operation failed"
                    );
                    return Err(RetryError::Exhausted {
                        attempts: attempt,
                        last: e,
                    });
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Operation failed with non-retryable error");
                return Err(RetryError::Fatal(e));
            }
        }
    }
}

/// Add random jitter to a delay
///
/// The result lies between `delay` and `2 * delay`.
fn add_jitter(delay: Duration) -> Duration {
    let mut rng = rand::thread_rng();
    let jitter_factor: f64 = rng.gen_range(0.0..=1.0);
    Duration::from_secs_f64(delay.as_secs_f64() * (1.0 + jitter_factor))
}
