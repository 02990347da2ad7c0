use std::io;

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::console::Console;

const DEFAULT_LEVEL: &str = "warn";

/// Builds the stderr filter: an explicit level wins, then `RUST_LOG`,
/// then `warn`.
pub fn filter(level: Option<&str>) -> EnvFilter {
    match level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL)),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL)),
    }
}

/// Stderr behind a [`Console`], so log lines written while the keyboard
/// holds the terminal in raw mode still start at column zero.
pub fn terminal_stderr() -> Console<io::Stderr> {
    let raw = crossterm::terminal::is_raw_mode_enabled().unwrap_or(false);
    Console::new(io::stderr(), raw)
}

fn subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false)
        .finish()
}

/// Installs the global subscriber. Diagnostics go to stderr so stdout stays
/// the mirror of the output file.
pub fn init_tracing(level: Option<&str>) {
    let _ = subscriber(filter(level), terminal_stderr).try_init();
}
