//! # person-roster
//!
//! Fetches a JSON array of person records over HTTP, stores them in SQLite
//! and reports them ordered by last name, then first name.
//!
//! ## Pipeline
//!
//! - **Fetch** - bounded retries with exponential backoff; network errors,
//!   non-success statuses and malformed bodies are all retried
//! - **Store** - names split on the first space into first/last columns
//! - **Report** - one JSON line per record, in name order
//!
//! ## Quick Start
//!
//! ```no_run
//! use person_roster::{Config, Pipeline};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = Pipeline::new(Config::default())?;
//!     let outcome = pipeline
//!         .run(std::io::stdout(), &CancellationToken::new())
//!         .await?;
//!     std::process::exit(outcome.exit_code().into());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Name collation
pub mod collation;
/// Configuration types
pub mod config;
/// Database persistence layer
pub mod db;
/// Error types
pub mod error;
/// HTTP source fetching
pub mod fetcher;
/// Diagnostic subscriber setup
pub mod logging;
/// Fetch, store and report orchestration
pub mod pipeline;
/// Report output
pub mod reporter;
/// Retry logic with exponential backoff
pub mod retry;
/// Core record types
pub mod types;

// Re-export commonly used types
pub use config::{Collation, Config, FetchConfig, RetryConfig, StoreConfig, StoreLocation};
pub use db::Database;
pub use error::{DatabaseError, Error, Result};
pub use fetcher::Fetcher;
pub use pipeline::{Pipeline, RunOutcome};
pub use reporter::Reporter;
pub use types::{NameParts, Person};

use tokio_util::sync::CancellationToken;

/// Cancel `token` when a termination signal arrives.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
pub async fn cancel_on_signal(token: CancellationToken) {
    wait_for_signal().await;
    token.cancel();
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Signal registration may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), _) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            if let Ok(mut sigint) = signal(SignalKind::interrupt()) {
                sigint.recv().await;
                tracing::info!("Received SIGINT signal (Ctrl+C)");
            } else {
                ctrl_c_fallback().await;
            }
        }
        (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                sigterm.recv().await;
                tracing::info!("Received SIGTERM signal");
            } else {
                ctrl_c_fallback().await;
            }
        }
    }
}

#[cfg(unix)]
async fn ctrl_c_fallback() {
    tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
    if tokio::signal::ctrl_c().await.is_err() {
        // Never cancel if no signal source is available
        std::future::pending::<()>().await;
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
            std::future::pending::<()>().await;
        }
    }
}
