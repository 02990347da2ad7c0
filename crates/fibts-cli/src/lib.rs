//! Interactive front end for fibts.

pub mod cli;
pub mod console;
pub mod keyboard;
pub mod logging;
pub mod prompt;

use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use fibts_config::Settings;
use fibts_core::{output_path, Either, Mode, RunOptions, RunSummary, StopAfter, StopSignal};
use tracing::{info, warn};

pub use cli::Cli;
use console::Console;
use keyboard::KeyboardStop;
use prompt::{base_name_or_default, menu, Prompter, BASE_NAME_PROMPT, MODE_PROMPT};

pub const CLOSING_BANNER: &str =
    "Program has stopped. Thank you for using the Fibonacci generator.";

/// Runs the program. Every failure is reported on the console; the process
/// always finishes with the closing banner and a zero exit status.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.log_level.as_deref());

    println!("Fibonacci Sequence Generator");
    println!("----------------------------");

    if let Err(e) = session(&cli) {
        warn!("session ended with error: {e:#}");
        println!("An error occurred: {e:#}");
    }

    println!("{CLOSING_BANNER}");
    Ok(())
}

fn session(cli: &Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref()).context("could not load settings")?;
    let options = run_options(&settings, cli);

    let mut prompter = if cli.output.is_none() || cli.mode.is_none() {
        Some(Prompter::new()?)
    } else {
        None
    };
    let mut ask = |prompt: &str| {
        prompter
            .as_mut()
            .map(|p| p.ask(prompt))
            .unwrap_or_default()
    };

    let default_base = settings.expanded_base_file_name();
    let base = match &cli.output {
        Some(base) => base_name_or_default(base, &default_base),
        None => base_name_or_default(&ask(BASE_NAME_PROMPT), &default_base),
    };

    let mode = match cli.mode {
        Some(number) => Mode::from_number(i64::from(number)),
        None => {
            print!("{}", menu(&settings.scan_target));
            Mode::from_selection(&ask(MODE_PROMPT))
        }
    };

    let key = settings.stop_key();
    println!(
        "\nPress '{}' or '{}' anytime to stop the program.",
        key.to_ascii_uppercase(),
        key
    );

    let keyboard = if io::stdin().is_terminal() {
        KeyboardStop::enable(key)
            .map_err(|e| warn!("keyboard stop unavailable: {e}"))
            .ok()
    } else {
        None
    };
    if keyboard.is_none() && cli.limit.is_none() {
        warn!("no keyboard and no --limit; the run only ends when the process is killed");
    }

    let raw = keyboard.is_some();
    let mut stop = Either(keyboard, cli.limit.map(StopAfter::new));
    let mut console = Console::new(io::stdout().lock(), raw);
    let summary = write_run(mode, &options, &output_path(&base), &mut console, &mut stop);
    console.flush().ok();
    // Leave raw mode before the closing banner.
    drop(console);
    drop(stop);

    let summary = summary?;
    info!(
        %mode,
        iterations = summary.iterations,
        lines = summary.lines_written,
        stop = ?summary.stop,
        "run complete"
    );
    Ok(())
}

/// Creates (or truncates) the output file at `path` and runs `mode` into it.
pub fn write_run<C, S>(
    mode: Mode,
    options: &RunOptions,
    path: &Path,
    console: &mut C,
    stop: &mut S,
) -> Result<RunSummary>
where
    C: Write,
    S: StopSignal + ?Sized,
{
    let file = File::create(path)
        .with_context(|| format!("failed to create output file {}", path.display()))?;
    info!(path = %path.display(), "output file created");
    Ok(fibts_core::run(mode, options, file, console, stop))
}

/// Merges settings with command-line overrides.
pub fn run_options(settings: &Settings, cli: &Cli) -> RunOptions {
    let delay = cli.delay_ms.map(Duration::from_millis);
    RunOptions {
        flush_every: settings.flush_every,
        delay: delay.unwrap_or_else(|| settings.delay()),
        scan_delay: delay.unwrap_or_else(|| settings.scan_delay()),
        scan_target: settings.scan_target.clone(),
        scan_width: settings.scan_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_settings() {
        let options = run_options(&Settings::default(), &Cli::default());
        assert_eq!(options, RunOptions::default());
    }

    #[test]
    fn test_delay_flag_overrides_both_loops() {
        let cli = Cli {
            delay_ms: Some(5),
            ..Cli::default()
        };
        let options = run_options(&Settings::default(), &cli);
        assert_eq!(options.delay, Duration::from_millis(5));
        assert_eq!(options.scan_delay, Duration::from_millis(5));
    }
}
