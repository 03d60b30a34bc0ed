//! Diagnostic subscriber setup.
//!
//! Report lines go to stdout; everything logged here goes to the writer
//! the subscriber is built with (stderr for the binary).

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "info";

/// Build a formatting subscriber writing to `writer`
///
/// `ansi` controls color escape codes; pass `false` for anything that is not
/// an interactive terminal.
pub fn subscriber<W>(
    filter: EnvFilter,
    writer: W,
    ansi: bool,
) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .finish()
}

/// Filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber on stderr
///
/// Colors are only enabled when stderr is a terminal.
pub fn init() -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let ansi = std::io::stderr().is_terminal();
    tracing::subscriber::set_global_default(subscriber(env_filter(), std::io::stderr, ansi))
}
