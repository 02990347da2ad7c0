use std::path::PathBuf;

use clap::Parser;

/// Command-line flags. Each one that is given skips or overrides the
/// matching prompt or setting.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "fibts",
    version,
    about = "Endless Fibonacci generator with daytime conversion and digit scanning"
)]
pub struct Cli {
    /// Base name for the output file (`{BASE}_output.txt`); skips the prompt
    #[arg(short, long, value_name = "BASE")]
    pub output: Option<String>,

    /// Mode: 1 plain, 2 daytime, 3 digit scan; skips the prompt
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=3))]
    pub mode: Option<u8>,

    /// Stop on its own after this many iterations
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: Option<u64>,

    /// Pause between iterations in milliseconds
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Configuration file (defaults to ./fibts.toml when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level for diagnostics on stderr; RUST_LOG is used when absent
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}
