//! The run loops: one shared presenter for plain/daytime output and a
//! separate loop for substring scanning.

use std::io::Write;
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::{Result, RunError};
use crate::mode::{LineFormat, Mode};
use crate::scanner::{SubstringScanner, DEFAULT_TARGET, DEFAULT_WIDTH};
use crate::sequence::SequenceState;
use crate::sink::{FlushPolicy, LineSink};
use crate::stop::StopSignal;

pub const STOPPING_BANNER: &str = "Stopping the program...";

/// Tunables for the run loops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Lines between explicit flushes in plain/daytime mode.
    pub flush_every: usize,
    /// Pause after each plain/daytime iteration.
    pub delay: Duration,
    /// Pause after each scan iteration.
    pub scan_delay: Duration,
    pub scan_target: String,
    pub scan_width: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            flush_every: 10,
            delay: Duration::from_millis(200),
            scan_delay: Duration::ZERO,
            scan_target: DEFAULT_TARGET.to_string(),
            scan_width: DEFAULT_WIDTH,
        }
    }
}

/// Why a loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    Requested,
    Failed(String),
}

/// What a finished loop reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub mode: Mode,
    pub iterations: u64,
    pub lines_written: u64,
    pub stop: StopReason,
}

enum Step {
    Continue,
    Stop,
}

/// Runs `mode` until the stop signal fires or an iteration fails.
///
/// Errors never escape: they are reported on `console` and recorded in the
/// summary. `output` is flushed and released before returning.
///
/// # Arguments
///
/// * `mode` - plain and daytime share one loop; the scan restarts from the seed
/// * `output` - the output file, or any writer standing in for it
/// * `console` - mirror of every line plus the batch and stop banners
/// * `stop` - polled once per iteration, after the line is written
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use fibts_core::{run, Mode, RunOptions, StopAfter, StopReason};
///
/// let options = RunOptions { delay: Duration::ZERO, ..RunOptions::default() };
/// let mut file = Vec::new();
/// let summary = run(Mode::Plain, &options, &mut file, &mut Vec::new(), &mut StopAfter::new(3));
///
/// assert_eq!(summary.stop, StopReason::Requested);
/// assert_eq!(String::from_utf8_lossy(&file).lines().last(), Some("Fibonacci: 3"));
/// ```
pub fn run<W, C, S>(
    mode: Mode,
    options: &RunOptions,
    output: W,
    console: &mut C,
    stop: &mut S,
) -> RunSummary
where
    W: Write,
    C: Write,
    S: StopSignal + ?Sized,
{
    info!(%mode, "starting run");
    let summary = match mode.line_format() {
        Some(format) => {
            let sink = LineSink::new(output, FlushPolicy::Batched(options.flush_every));
            Presenter::new(format, options.delay, sink).run(console, stop)
        }
        None => {
            let scanner = SubstringScanner::new(options.scan_target.clone(), options.scan_width);
            let sink = LineSink::new(output, FlushPolicy::EveryLine);
            Scan::new(scanner, options.scan_delay, sink).run(console, stop)
        }
    };
    info!(
        iterations = summary.iterations,
        lines = summary.lines_written,
        "run finished"
    );
    summary
}

/// Per-iteration print-and-log loop for plain and daytime modes.
struct Presenter<W: Write> {
    format: LineFormat,
    delay: Duration,
    sink: LineSink<W>,
    state: SequenceState,
}

impl<W: Write> Presenter<W> {
    fn new(format: LineFormat, delay: Duration, sink: LineSink<W>) -> Self {
        Self {
            format,
            delay,
            sink,
            state: SequenceState::seed(),
        }
    }

    fn run<C, S>(mut self, console: &mut C, stop: &mut S) -> RunSummary
    where
        C: Write,
        S: StopSignal + ?Sized,
    {
        let mut outcome = StopReason::Requested;
        loop {
            match self.step(console, stop) {
                Ok(Step::Continue) => {
                    if !self.delay.is_zero() {
                        thread::sleep(self.delay);
                    }
                }
                Ok(Step::Stop) => break,
                Err(e) => {
                    warn!("presenter loop failed: {e}");
                    let _ = writeln!(console, "An error occurred: {e}");
                    outcome = StopReason::Failed(e.to_string());
                    break;
                }
            }
        }
        finish(
            self.format.mode(),
            self.state.iteration() - 1,
            self.sink,
            console,
            outcome,
            "An error occurred",
        )
    }

    fn step<C, S>(&mut self, console: &mut C, stop: &mut S) -> Result<Step>
    where
        C: Write,
        S: StopSignal + ?Sized,
    {
        let (term, next) = self.state.advance();
        self.state = next;

        let line = self.format.format(&term.value);

        writeln!(console, "{line}").map_err(RunError::Console)?;
        let flushed = self.sink.write_line(&line).map_err(RunError::Sink)?;
        if flushed {
            if let FlushPolicy::Batched(n) = self.sink.policy() {
                writeln!(console, "Saved the last {n} Fibonacci results to the file.")
                    .map_err(RunError::Console)?;
            }
        }

        poll_stop(console, stop)
    }
}

/// Self-contained scan loop; restarts the sequence from the seed.
struct Scan<W: Write> {
    scanner: SubstringScanner,
    delay: Duration,
    sink: LineSink<W>,
    state: SequenceState,
}

impl<W: Write> Scan<W> {
    fn new(scanner: SubstringScanner, delay: Duration, sink: LineSink<W>) -> Self {
        Self {
            scanner,
            delay,
            sink,
            state: SequenceState::seed(),
        }
    }

    fn run<C, S>(mut self, console: &mut C, stop: &mut S) -> RunSummary
    where
        C: Write,
        S: StopSignal + ?Sized,
    {
        let intro = writeln!(
            console,
            "Checking for Fibonacci numbers that contain the sequence '{}'...",
            self.scanner.target()
        )
        .and_then(|_| {
            writeln!(
                console,
                "Writing the next {} digits, the iteration, and occurrence number to the file.",
                self.scanner.width()
            )
        });

        let mut outcome = StopReason::Requested;
        let mut result = intro.map_err(RunError::Console).map(|_| Step::Continue);
        while let Ok(Step::Continue) = result {
            result = self.step(console, stop);
            if let Ok(Step::Continue) = result {
                if !self.delay.is_zero() {
                    thread::sleep(self.delay);
                }
            }
        }
        if let Err(e) = result {
            warn!("scan loop failed: {e}");
            let prefix = if e.is_file_error() {
                "File writing error"
            } else {
                "An error occurred"
            };
            let _ = writeln!(console, "{prefix}: {e}");
            outcome = StopReason::Failed(e.to_string());
        }
        finish(
            Mode::SubstringScan,
            self.state.iteration() - 1,
            self.sink,
            console,
            outcome,
            "File writing error",
        )
    }

    fn step<C, S>(&mut self, console: &mut C, stop: &mut S) -> Result<Step>
    where
        C: Write,
        S: StopSignal + ?Sized,
    {
        let (term, next) = self.state.advance();
        self.state = next;

        let digits = term.value.to_string();
        if let Some(found) = self.scanner.scan(&digits, term.iteration) {
            let line = found.to_string();
            writeln!(console, "{line}").map_err(RunError::Console)?;
            self.sink.write_line(&line).map_err(RunError::Sink)?;
        }

        poll_stop(console, stop)
    }
}

fn poll_stop<C, S>(console: &mut C, stop: &mut S) -> Result<Step>
where
    C: Write,
    S: StopSignal + ?Sized,
{
    if stop.stop_requested() {
        writeln!(console, "{STOPPING_BANNER}").map_err(RunError::Console)?;
        return Ok(Step::Stop);
    }
    Ok(Step::Continue)
}

/// Closes the sink. A close failure is reported on the console only when
/// the loop itself ended cleanly; after a failed write the buffered line
/// fails again here and has already been reported.
fn finish<W, C>(
    mode: Mode,
    iterations: u64,
    sink: LineSink<W>,
    console: &mut C,
    mut stop: StopReason,
    file_error_prefix: &str,
) -> RunSummary
where
    W: Write,
    C: Write,
{
    let lines_written = sink.lines_written();
    if let Err(e) = sink.close() {
        warn!("closing output failed: {e}");
        if stop == StopReason::Requested {
            let _ = writeln!(console, "{file_error_prefix}: {e}");
            stop = StopReason::Failed(e.to_string());
        }
    }
    RunSummary {
        mode,
        iterations,
        lines_written,
        stop,
    }
}
