//! Fetch, store and report in sequence

use crate::config::Config;
use crate::db::Database;
use crate::fetcher::Fetcher;
use crate::reporter::Reporter;
use crate::types::Person;
use crate::Result;
use std::io::Write;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Result of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Records were stored and reported
    Reported {
        /// Number of report lines written
        count: usize,
    },
    /// The fetch produced no records; nothing was stored or reported
    NoRecords,
}

impl RunOutcome {
    /// Process exit status for this outcome
    pub fn exit_code(&self) -> u8 {
        match self {
            RunOutcome::Reported { .. } => 0,
            RunOutcome::NoRecords => 1,
        }
    }
}

/// Fetcher → store → reporter
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    /// Create a pipeline after validating the configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run once, writing report lines to `out`
    ///
    /// An empty fetch result (retries exhausted or an empty array) ends the
    /// run with [`RunOutcome::NoRecords`] before the store is opened.
    ///
    /// # Errors
    /// [`crate::Error::Cancelled`] if `cancel` fires while fetching; store and
    /// output failures are returned as-is.
    pub async fn run<W: Write>(&self, out: W, cancel: &CancellationToken) -> Result<RunOutcome> {
        let fetcher = Fetcher::new(self.config.fetch.clone())?;
        let people = fetcher.fetch(cancel).await?;

        if people.is_empty() {
            error!(url = fetcher.source_url(), "No person records fetched");
            return Ok(RunOutcome::NoRecords);
        }

        let db = Database::open(&self.config.store).await?;
        let result = Self::store_and_report(&db, &people, out).await;
        db.close().await;

        let count = result?;
        info!(count, "Reported person records");
        Ok(RunOutcome::Reported { count })
    }

    async fn store_and_report<W: Write>(db: &Database, people: &[Person], out: W) -> Result<usize> {
        db.insert_people(people).await?;

        let ordered = db.people_by_name().await?;
        let mut reporter = Reporter::new(out);
        reporter.report_all(&ordered)?;
        Ok(reporter.written())
    }
}
