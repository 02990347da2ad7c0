//! Runs driven the way the binary drives them, minus the terminal.

use std::fs;
use std::time::Duration;

use clap::Parser;
use fibts_cli::{run_options, write_run, Cli};
use fibts_config::Settings;
use fibts_core::{output_path, Mode, StopAfter, StopReason};

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("fibts").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_plain_run_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(output_path("Fibonacci_Output"));
    let options = run_options(&Settings::default(), &cli(&["--delay-ms", "0"]));
    let mut console = Vec::new();

    let summary = write_run(Mode::Plain, &options, &path, &mut console, &mut StopAfter::new(5))
        .unwrap();

    assert_eq!(summary.stop, StopReason::Requested);
    assert_eq!(
        fs::read_to_string(&path).unwrap().lines().collect::<Vec<_>>(),
        ["Fibonacci: 1", "Fibonacci: 2", "Fibonacci: 3", "Fibonacci: 5", "Fibonacci: 8"]
    );

    // The console mirrors the file and adds the stop banner.
    let console = String::from_utf8(console).unwrap();
    assert!(console.starts_with("Fibonacci: 1\nFibonacci: 2\n"));
    assert!(console.ends_with("Stopping the program...\n"));
}

#[test]
fn test_existing_file_is_truncated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("old_output.txt");
    fs::write(&path, "stale line 1\nstale line 2\nstale line 3\n").unwrap();

    let options = run_options(&Settings::default(), &cli(&["--delay-ms", "0"]));
    write_run(Mode::Daytime, &options, &path, &mut Vec::new(), &mut StopAfter::new(1)).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap().trim_end(),
        "Fibonacci: 1, Daytime: Time 00:00:01"
    );
}

#[test]
fn test_unwritable_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("x_output.txt");
    let options = run_options(&Settings::default(), &Cli::default());

    let err = write_run(Mode::Plain, &options, &path, &mut Vec::new(), &mut StopAfter::new(1))
        .unwrap_err();
    assert!(format!("{err:#}").contains("failed to create output file"));
}

#[test]
fn test_settings_file_shapes_scan_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("fibts.toml");
    fs::write(&config, "scan_target = \"1\"\nscan_width = 1\nscan_delay_ms = 0\n").unwrap();

    let settings = Settings::load(Some(config.as_path())).unwrap();
    let options = run_options(&settings, &Cli::default());
    assert_eq!(options.scan_delay, Duration::ZERO);

    let path = dir.path().join("scan_output.txt");
    let summary = write_run(
        Mode::SubstringScan,
        &options,
        &path,
        &mut Vec::new(),
        &mut StopAfter::new(12),
    )
    .unwrap();

    assert_eq!(summary.lines_written, 2);
    assert_eq!(
        fs::read_to_string(&path).unwrap().lines().next(),
        Some("Sequence found! Following numbers: 3, Iteration: 6, Found #1")
    );
}
