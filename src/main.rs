use clap::{Parser, ValueEnum};
use person_roster::config::DEFAULT_SOURCE_URL;
use person_roster::{Collation, Config, Error, Pipeline, StoreLocation};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;

/// Exit status when the run is interrupted by a signal
const EXIT_CANCELLED: u8 = 130;

#[derive(Clone, Copy, ValueEnum)]
enum CollationArg {
    /// Case-insensitive, accented letters sort with their base letter
    Folded,
    /// Byte order
    Binary,
}

impl From<CollationArg> for Collation {
    fn from(arg: CollationArg) -> Self {
        match arg {
            CollationArg::Folded => Collation::Folded,
            CollationArg::Binary => Collation::Binary,
        }
    }
}

/// Fetch person records, store them and print them sorted by last name, then first name
#[derive(Parser)]
#[command(version)]
struct Args {
    /// URL of the JSON array of person records
    #[arg(long, default_value = DEFAULT_SOURCE_URL)]
    source_url: String,

    /// SQLite file to store records in (default: private in-memory store)
    #[arg(long)]
    database: Option<PathBuf>,

    /// Total fetch attempts before giving up
    #[arg(long, default_value_t = 3)]
    max_attempts: u32,

    /// Name ordering
    #[arg(long, value_enum, default_value_t = CollationArg::Folded)]
    collation: CollationArg,
}

impl Args {
    fn into_config(self) -> Config {
        let mut config = Config::default();
        config.fetch.source_url = self.source_url;
        config.fetch.retry.max_attempts = self.max_attempts;
        config.store.collation = self.collation.into();
        if let Some(path) = self.database {
            config.store.location = StoreLocation::File(path);
        }
        config
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = person_roster::logging::init() {
        eprintln!("Failed to install log subscriber: {}", e);
    }

    let config = Args::parse().into_config();

    let pipeline = match Pipeline::new(config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let cancel = CancellationToken::new();
    tokio::spawn(person_roster::cancel_on_signal(cancel.clone()));

    match pipeline.run(std::io::stdout(), &cancel).await {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(Error::Cancelled) => {
            tracing::warn!("Run cancelled");
            ExitCode::from(EXIT_CANCELLED)
        }
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            ExitCode::FAILURE
        }
    }
}
